//! Export command implementation

use anyhow::{Context, Result};
use std::path::Path;

/// Export a book description to a deck
pub fn export(input: &str, output: Option<&str>) -> Result<()> {
    let book = super::load_book(input)?;

    tracing::info!("Loaded '{}' with {} pages", book.title, book.len());

    let written = book
        .export(output.map(Path::new))
        .with_context(|| format!("Failed to export {}", input))?;

    println!("Book exported to: {}", written.display());
    Ok(())
}
