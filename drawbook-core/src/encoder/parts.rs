//! Package parts shared by every deck: master, layout, theme and the
//! relationship/content-type plumbing around them.

use quick_xml::escape::escape;

pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub const NS_DECLS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Empty group properties every shape tree starts with
pub const SP_TREE_HEADER: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

/// Escape text for XML content or attributes.
///
/// Control characters XML 1.0 cannot represent, even as references, are
/// dropped; tab, newline and carriage return are kept.
pub fn xml_text(text: &str) -> String {
    let cleaned: String = text.chars().filter(|&c| is_xml_char(c)).collect();
    escape(cleaned.as_str()).into_owned()
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// A relationship entry
pub struct Relationship {
    pub id: String,
    pub kind: String,
    pub target: String,
}

impl Relationship {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            target: target.into(),
        }
    }
}

/// Render a `.rels` part
pub fn relationships(rels: &[Relationship]) -> String {
    let mut xml = format!(
        "{}\n<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
        XML_HEADER
    );
    for rel in rels {
        xml.push_str(&format!(
            "<Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>",
            rel.id,
            rel.kind,
            xml_text(&rel.target)
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// `[Content_Types].xml` for a deck with `slide_count` slides
pub fn content_types(slide_count: usize) -> String {
    let mut xml = format!(
        r#"{}
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="jpeg" ContentType="image/jpeg"/><Default Extension="gif" ContentType="image/gif"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#,
        XML_HEADER
    );
    for n in 1..=slide_count {
        xml.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>",
            n
        ));
    }
    xml.push_str("</Types>");
    xml
}

/// Package-level relationships
pub fn root_relationships() -> String {
    relationships(&[
        Relationship::new(
            "rId1",
            format!("{}/officeDocument", REL_BASE),
            "ppt/presentation.xml",
        ),
        Relationship::new(
            "rId2",
            "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            "docProps/core.xml",
        ),
        Relationship::new(
            "rId3",
            format!("{}/extended-properties", REL_BASE),
            "docProps/app.xml",
        ),
    ])
}

/// `ppt/presentation.xml`; slide relationships start at `rId3`
pub fn presentation(slide_count: usize, width: i64, height: i64) -> String {
    let slide_ids: String = (0..slide_count)
        .map(|i| format!("<p:sldId id=\"{}\" r:id=\"rId{}\"/>", 256 + i, i + 3))
        .collect();
    let slide_list = if slide_ids.is_empty() {
        String::new()
    } else {
        format!("<p:sldIdLst>{}</p:sldIdLst>", slide_ids)
    };
    format!(
        r#"{}
<p:presentation {} saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{}<p:sldSz cx="{}" cy="{}"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
        XML_HEADER, NS_DECLS, slide_list, width, height
    )
}

/// Relationships of `ppt/presentation.xml`
pub fn presentation_relationships(slide_count: usize) -> String {
    let mut rels = vec![
        Relationship::new(
            "rId1",
            format!("{}/slideMaster", REL_BASE),
            "slideMasters/slideMaster1.xml",
        ),
        Relationship::new("rId2", format!("{}/theme", REL_BASE), "theme/theme1.xml"),
    ];
    for n in 1..=slide_count {
        rels.push(Relationship::new(
            format!("rId{}", n + 2),
            format!("{}/slide", REL_BASE),
            format!("slides/slide{}.xml", n),
        ));
    }
    rels.push(Relationship::new(
        format!("rId{}", slide_count + 3),
        format!("{}/presProps", REL_BASE),
        "presProps.xml",
    ));
    relationships(&rels)
}

pub fn presentation_properties() -> String {
    format!("{}\n<p:presentationPr {}/>", XML_HEADER, NS_DECLS)
}

pub fn slide_master() -> String {
    format!(
        r#"{}
<p:sldMaster {}><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>{}</p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst><p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles></p:sldMaster>"#,
        XML_HEADER, NS_DECLS, SP_TREE_HEADER
    )
}

pub fn slide_master_relationships() -> String {
    relationships(&[
        Relationship::new("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
        Relationship::new("rId2", format!("{}/theme", REL_BASE), "../theme/theme1.xml"),
    ])
}

/// The single blank layout every slide uses
pub fn slide_layout() -> String {
    format!(
        r#"{}
<p:sldLayout {} type="blank" preserve="1"><p:cSld name="Blank"><p:spTree>{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        XML_HEADER, NS_DECLS, SP_TREE_HEADER
    )
}

pub fn slide_layout_relationships() -> String {
    relationships(&[Relationship::new(
        "rId1",
        format!("{}/slideMaster", REL_BASE),
        "../slideMasters/slideMaster1.xml",
    )])
}

/// Document properties: title, author and creation time
pub fn core_properties(title: &str, author: Option<&str>, created: &str) -> String {
    let creator = author
        .map(|a| format!("<dc:creator>{}</dc:creator>", xml_text(a)))
        .unwrap_or_default();
    format!(
        r#"{}
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title>{}<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified></cp:coreProperties>"#,
        XML_HEADER,
        xml_text(title),
        creator,
        created,
        created
    )
}

pub fn app_properties(slide_count: usize) -> String {
    format!(
        r#"{}
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>drawbook</Application><Slides>{}</Slides></Properties>"#,
        XML_HEADER, slide_count
    )
}

/// Minimal complete Office theme
pub fn theme() -> String {
    format!(
        r#"{}
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Drawbook"><a:themeElements><a:clrScheme name="Drawbook"><a:dk1><a:srgbClr val="000000"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="3E2A1E"/></a:dk2><a:lt2><a:srgbClr val="FFF8EC"/></a:lt2><a:accent1><a:srgbClr val="8B5E3C"/></a:accent1><a:accent2><a:srgbClr val="E07A5F"/></a:accent2><a:accent3><a:srgbClr val="3D405B"/></a:accent3><a:accent4><a:srgbClr val="81B29A"/></a:accent4><a:accent5><a:srgbClr val="F2CC8F"/></a:accent5><a:accent6><a:srgbClr val="6D597A"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme><a:fontScheme name="Drawbook"><a:majorFont><a:latin typeface="Noteworthy"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Geneva"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Drawbook"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#,
        XML_HEADER
    )
}
