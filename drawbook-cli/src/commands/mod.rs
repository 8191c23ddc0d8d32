//! CLI command implementations

mod export;
mod illustrate;
mod info;

pub use export::export;
pub use illustrate::illustrate;
pub use info::info;

use anyhow::{Context, Result};
use drawbook_core::Book;
use std::path::Path;

/// Load a book description, with the file name in any error
fn load_book(input: &str) -> Result<Book> {
    Book::from_json_file(Path::new(input))
        .with_context(|| format!("Failed to load book description: {}", input))
}
