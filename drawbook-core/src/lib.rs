//! Drawbook Core Library
//!
//! This crate provides the book model for children's picture books, the
//! slide layout rules used to render them, a PowerPoint encoder, and an
//! optional step that fills in missing illustrations with a remote
//! image-generation service.

pub mod encoder;
pub mod error;
pub mod export;
pub mod generate;
pub mod layout;
pub mod types;

pub use error::{DrawbookError, ExportError, GenerationError, Result};
pub use export::export_with;
pub use generate::{GenerationReport, GeneratorConfig, IllustrationGenerator};
pub use layout::{BookLayout, Deck};
pub use types::{Book, Illustration, IllustrationStyle, SlotId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_creation() {
        let book = Book::new("Test Book", vec!["Once upon a time.".to_string()]);
        assert_eq!(book.title, "Test Book");
        assert_eq!(book.len(), 1);
    }
}
