//! Info command implementation

use anyhow::Result;
use drawbook_core::Illustration;
use serde::Serialize;

/// Book info output
#[derive(Serialize)]
struct BookInfo {
    title: String,
    author: Option<String>,
    style: String,
    pages: usize,
    illustrated: usize,
    pending: usize,
    disabled: usize,
}

/// Display information about a book description
pub fn info(input: &str, json: bool) -> Result<()> {
    let book = super::load_book(input)?;

    let count = |pred: fn(&Illustration) -> bool| {
        book.slots().filter(|(_, slot)| pred(slot)).count()
    };
    let info = BookInfo {
        title: book.title.clone(),
        author: book.author.clone(),
        style: book.style.to_string(),
        pages: book.len(),
        illustrated: count(|slot| slot.path().is_some()),
        pending: count(Illustration::is_pending),
        disabled: count(Illustration::is_disabled),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Title:       {}", info.title);
        if let Some(author) = &info.author {
            println!("Author:      {}", author);
        }
        println!("Style:       {}", info.style);
        println!("Pages:       {}", info.pages);
        println!("Illustrated: {}", info.illustrated);
        println!("Pending:     {}", info.pending);
        println!("Disabled:    {}", info.disabled);
    }

    Ok(())
}
