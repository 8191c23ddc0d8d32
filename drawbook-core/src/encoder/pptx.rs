//! PPTX encoder implementation
//!
//! Writes a deck as an Office Open XML presentation: one blank-layout slide
//! per deck slide, with text boxes, a decorative border and embedded
//! pictures.

use super::parts::{
    self, xml_text, Relationship, NS_DECLS, REL_IMAGE, REL_SLIDE_LAYOUT, SP_TREE_HEADER,
    XML_HEADER,
};
use crate::error::ExportError;
use crate::layout::{Align, Deck, Picture, Rect, Shape, Slide, TextBox, TextRole};
use image::ImageFormat;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Border line width (3pt)
const BORDER_WIDTH: i64 = 38_100;
const BORDER_COLOR: &str = "8B5E3C";

/// Encoder for PowerPoint decks
pub struct PptxEncoder {
    compression: CompressionMethod,
}

/// An image ready to embed
struct EmbeddedImage {
    extension: &'static str,
    data: Vec<u8>,
    width: u32,
    height: u32,
}

/// Media part written alongside the slides
struct MediaPart {
    name: String,
    data: Vec<u8>,
}

impl PptxEncoder {
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    /// Store parts without compression
    pub fn stored(mut self) -> Self {
        self.compression = CompressionMethod::Stored;
        self
    }

    /// Render one slide, collecting its relationships and media
    fn slide_to_xml(
        &self,
        number: usize,
        slide: &Slide,
        media: &mut Vec<MediaPart>,
    ) -> (String, Vec<Relationship>) {
        let mut rels = vec![Relationship::new(
            "rId1",
            REL_SLIDE_LAYOUT,
            "../slideLayouts/slideLayout1.xml",
        )];
        let mut shapes = String::new();
        let mut shape_id = 2;

        for shape in &slide.shapes {
            match shape {
                Shape::Border(frame) => {
                    shapes.push_str(&border_xml(shape_id, frame));
                }
                Shape::Text(text) => {
                    shapes.push_str(&text_box_xml(shape_id, text));
                }
                Shape::Picture(picture) => match load_picture(&picture.path) {
                    Ok(image) => {
                        let media_name =
                            format!("image{}.{}", media.len() + 1, image.extension);
                        let rel_id = format!("rId{}", rels.len() + 1);
                        rels.push(Relationship::new(
                            &rel_id,
                            REL_IMAGE,
                            format!("../media/{}", media_name),
                        ));
                        let frame = picture.frame.fit(image.width, image.height);
                        shapes.push_str(&picture_xml(shape_id, picture, &frame, &rel_id));
                        media.push(MediaPart {
                            name: media_name,
                            data: image.data,
                        });
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Could not add illustration on slide {} ({}): {}",
                            number,
                            picture.path.display(),
                            e
                        );
                        continue;
                    }
                },
            }
            shape_id += 1;
        }

        let xml = format!(
            r#"{}
<p:sld {}><p:cSld><p:spTree>{}{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
            XML_HEADER, NS_DECLS, SP_TREE_HEADER, shapes
        );
        (xml, rels)
    }
}

impl Default for PptxEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Encoder for PptxEncoder {
    fn encode(&self, deck: &Deck, writer: &mut dyn Write) -> Result<(), ExportError> {
        let options = FileOptions::default().compression_method(self.compression);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let slide_count = deck.slides.len();
        let created = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

        add_part(
            &mut zip,
            options,
            "[Content_Types].xml",
            &parts::content_types(slide_count),
        )?;
        add_part(&mut zip, options, "_rels/.rels", &parts::root_relationships())?;
        add_part(
            &mut zip,
            options,
            "docProps/core.xml",
            &parts::core_properties(&deck.title, deck.author.as_deref(), &created),
        )?;
        add_part(&mut zip, options, "docProps/app.xml", &parts::app_properties(slide_count))?;
        add_part(
            &mut zip,
            options,
            "ppt/presentation.xml",
            &parts::presentation(slide_count, deck.width, deck.height),
        )?;
        add_part(
            &mut zip,
            options,
            "ppt/_rels/presentation.xml.rels",
            &parts::presentation_relationships(slide_count),
        )?;
        add_part(&mut zip, options, "ppt/presProps.xml", &parts::presentation_properties())?;
        add_part(
            &mut zip,
            options,
            "ppt/slideMasters/slideMaster1.xml",
            &parts::slide_master(),
        )?;
        add_part(
            &mut zip,
            options,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &parts::slide_master_relationships(),
        )?;
        add_part(
            &mut zip,
            options,
            "ppt/slideLayouts/slideLayout1.xml",
            &parts::slide_layout(),
        )?;
        add_part(
            &mut zip,
            options,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &parts::slide_layout_relationships(),
        )?;
        add_part(&mut zip, options, "ppt/theme/theme1.xml", &parts::theme())?;

        let mut media = Vec::new();
        for (i, slide) in deck.slides.iter().enumerate() {
            let number = i + 1;
            let (xml, rels) = self.slide_to_xml(number, slide, &mut media);
            add_part(&mut zip, options, &format!("ppt/slides/slide{}.xml", number), &xml)?;
            add_part(
                &mut zip,
                options,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                &parts::relationships(&rels),
            )?;
        }

        // Images are already compressed
        let media_options = FileOptions::default().compression_method(CompressionMethod::Stored);
        for part in &media {
            zip.start_file(format!("ppt/media/{}", part.name), media_options)?;
            zip.write_all(&part.data)?;
        }

        let cursor = zip.finish()?;
        writer.write_all(&cursor.into_inner())?;
        writer.flush()?;
        Ok(())
    }

    fn file_extension(&self) -> &str {
        "pptx"
    }
}

fn add_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    options: FileOptions,
    name: &str,
    content: &str,
) -> Result<(), ExportError> {
    zip.start_file(name, options)?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

/// Read an illustration and work out how to embed it.
///
/// PNG, JPEG and GIF are embedded as-is; other decodable formats are
/// re-encoded as PNG.
fn load_picture(path: &Path) -> Result<EmbeddedImage, ExportError> {
    let data = std::fs::read(path)?;
    let format = image::guess_format(&data)
        .map_err(|e| ExportError::UnsupportedImage(e.to_string()))?;
    let decoded = image::load_from_memory_with_format(&data, format)
        .map_err(|e| ExportError::UnsupportedImage(e.to_string()))?;
    let (width, height) = (decoded.width(), decoded.height());

    let (extension, data) = match format {
        ImageFormat::Png => ("png", data),
        ImageFormat::Jpeg => ("jpeg", data),
        ImageFormat::Gif => ("gif", data),
        _ => {
            let mut png = Cursor::new(Vec::new());
            decoded
                .write_to(&mut png, ImageFormat::Png)
                .map_err(|e| ExportError::UnsupportedImage(e.to_string()))?;
            ("png", png.into_inner())
        }
    };

    Ok(EmbeddedImage {
        extension,
        data,
        width,
        height,
    })
}

fn xfrm(frame: &Rect) -> String {
    format!(
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        frame.x, frame.y, frame.width, frame.height
    )
}

fn border_xml(id: usize, frame: &Rect) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Border {id}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr>{}<a:prstGeom prst="roundRect"><a:avLst/></a:prstGeom><a:noFill/><a:ln w="{}"><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:prstDash val="dash"/></a:ln></p:spPr></p:sp>"#,
        xfrm(frame),
        BORDER_WIDTH,
        BORDER_COLOR,
    )
}

fn text_box_xml(id: usize, text: &TextBox) -> String {
    let name = match text.role {
        TextRole::Title => "Title",
        TextRole::Author => "Author",
        TextRole::Body => "Text",
        TextRole::PageNumber => "Page Number",
    };
    let align = match text.align {
        Align::Left => "l",
        Align::Center => "ctr",
        Align::Right => "r",
    };

    let mut paragraphs = String::new();
    for paragraph in &text.paragraphs {
        paragraphs.push_str(&format!("<a:p><a:pPr algn=\"{}\"/>", align));
        for run in &paragraph.runs {
            paragraphs.push_str(&format!(
                r#"<a:r><a:rPr lang="en-US" sz="{}" dirty="0"><a:latin typeface="{}"/></a:rPr><a:t>{}</a:t></a:r>"#,
                run.size * 100,
                xml_text(&run.font),
                xml_text(&run.text)
            ));
        }
        paragraphs.push_str("</a:p>");
    }
    // A text body needs at least one paragraph
    if paragraphs.is_empty() {
        paragraphs.push_str("<a:p><a:endParaRPr lang=\"en-US\" dirty=\"0\"/></a:p>");
    }

    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name} {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="square" rtlCol="0" anchor="ctr"><a:normAutofit/></a:bodyPr><a:lstStyle/>{}</p:txBody></p:sp>"#,
        xfrm(&text.frame),
        paragraphs
    )
}

fn picture_xml(id: usize, picture: &Picture, frame: &Rect, rel_id: &str) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture {id}" descr="{}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
        xml_text(&picture.description),
        rel_id,
        xfrm(frame)
    )
}
