//! Writing a book to a deck file

use crate::encoder::{Encoder, PptxEncoder};
use crate::layout::BookLayout;
use crate::types::Book;
use crate::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Lay out `book` and write it with `encoder`.
///
/// With no `path` a fresh temporary file is kept and used. Parent
/// directories of an explicit path are created. Returns the absolute path
/// of the written file.
pub fn export_with(
    book: &Book,
    path: Option<&Path>,
    layout: &BookLayout,
    encoder: &dyn Encoder,
) -> Result<PathBuf> {
    let deck = layout.layout(book);

    let output = match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut writer = BufWriter::new(File::create(path)?);
            encoder.encode(&deck, &mut writer)?;
            writer.flush()?;
            path.to_path_buf()
        }
        None => {
            let mut file = tempfile::Builder::new()
                .prefix("drawbook-")
                .suffix(&format!(".{}", encoder.file_extension()))
                .tempfile()?;
            encoder.encode(&deck, file.as_file_mut())?;
            let (_, path) = file.keep().map_err(|e| e.error)?;
            path
        }
    };

    let output = output.canonicalize()?;
    tracing::info!(
        "Book '{}' exported to: {} ({} slides)",
        book.title,
        output.display(),
        deck.slides.len()
    );
    Ok(output)
}

impl Book {
    /// Export the book as a PowerPoint deck.
    ///
    /// Illustrations that are pending, disabled or unreadable are left out;
    /// a bad picture never fails the export.
    pub fn export(&self, path: Option<&Path>) -> Result<PathBuf> {
        export_with(self, path, &BookLayout::new(), &PptxEncoder::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deeper/book.pptx");

        let book = Book::new("Nested", vec!["Hello.".into()]);
        let written = book.export(Some(&target)).unwrap();

        assert!(written.is_absolute());
        assert!(target.exists());
        assert!(fs::metadata(&target).unwrap().len() > 0);
    }

    #[test]
    fn test_export_without_path_uses_temp_file() {
        let book = Book::new("Temporary", Vec::new());
        let written = book.export(None).unwrap();

        assert!(written.exists());
        assert_eq!(written.extension().and_then(|e| e.to_str()), Some("pptx"));
        fs::remove_file(written).unwrap();
    }
}
