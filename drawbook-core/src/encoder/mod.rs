//! Encoders for writing a laid-out deck to an output format

mod parts;
mod pptx;

pub use pptx::PptxEncoder;

use crate::error::ExportError;
use crate::layout::Deck;
use std::io::Write;

/// Trait for encoding decks to output formats
pub trait Encoder: Send + Sync {
    /// Encode a deck to a writer
    fn encode(&self, deck: &Deck, writer: &mut dyn Write) -> Result<(), ExportError>;

    /// File extension for this format, used for temporary output files
    fn file_extension(&self) -> &str;
}
