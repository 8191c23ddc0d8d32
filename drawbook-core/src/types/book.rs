//! The main Book type

use super::{Illustration, IllustrationStyle, SlotId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Title used when none is given
pub const DEFAULT_TITLE: &str = "Untitled Book";

/// A children's picture book: a title page plus one page per text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "BookFile")]
pub struct Book {
    /// Book title, shown on the title page
    pub title: String,

    /// Author, shown as "Written by ..." when present
    pub author: Option<String>,

    /// Text of each content page, in page order
    pub pages: Vec<String>,

    /// Illustration slot for each content page; always as long as `pages`
    pub illustrations: Vec<Illustration>,

    /// Illustration slot for the title page
    pub title_illustration: Illustration,

    /// Style requested when generating illustrations
    pub style: IllustrationStyle,
}

impl Book {
    /// Create a book with every illustration pending
    pub fn new(title: impl Into<String>, pages: Vec<String>) -> Self {
        Self::with_illustrations(title, pages, Vec::new())
    }

    /// Create a book with some illustrations supplied up front.
    ///
    /// Missing trailing slots are padded with [`Illustration::Pending`];
    /// surplus slots beyond the page count are dropped.
    pub fn with_illustrations(
        title: impl Into<String>,
        pages: Vec<String>,
        mut illustrations: Vec<Illustration>,
    ) -> Self {
        illustrations.resize(pages.len(), Illustration::Pending);
        Self {
            title: title.into(),
            author: None,
            pages,
            illustrations,
            title_illustration: Illustration::Pending,
            style: IllustrationStyle::default(),
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the title page illustration
    pub fn with_title_illustration(mut self, illustration: Illustration) -> Self {
        self.title_illustration = illustration;
        self
    }

    /// Set the illustration style
    pub fn with_style(mut self, style: impl Into<IllustrationStyle>) -> Self {
        self.style = style.into();
        self
    }

    /// Number of content pages (the title page is not counted)
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Every slot in generation order: the title first, then each page
    pub fn slots(&self) -> impl Iterator<Item = (SlotId, &Illustration)> {
        std::iter::once((SlotId::Title, &self.title_illustration)).chain(
            self.illustrations
                .iter()
                .enumerate()
                .map(|(index, slot)| (SlotId::Page(index), slot)),
        )
    }

    /// Slots still waiting for an illustration, in generation order
    pub fn pending_slots(&self) -> Vec<SlotId> {
        self.slots()
            .filter(|(_, slot)| slot.is_pending())
            .map(|(id, _)| id)
            .collect()
    }

    /// Get a slot's state
    pub fn slot(&self, id: SlotId) -> Option<&Illustration> {
        match id {
            SlotId::Title => Some(&self.title_illustration),
            SlotId::Page(index) => self.illustrations.get(index),
        }
    }

    /// Get a slot's state for modification
    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut Illustration> {
        match id {
            SlotId::Title => Some(&mut self.title_illustration),
            SlotId::Page(index) => self.illustrations.get_mut(index),
        }
    }

    /// Text an illustration for this slot should depict
    pub fn slot_text(&self, id: SlotId) -> Option<&str> {
        match id {
            SlotId::Title => Some(&self.title),
            SlotId::Page(index) => self.pages.get(index).map(|s| s.as_str()),
        }
    }

    /// Load a book description from a JSON file
    pub fn from_json_file(path: &Path) -> crate::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Save the book description as pretty-printed JSON
    pub fn save_json(&self, path: &Path) -> crate::Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, Vec::new())
    }
}

/// On-disk form of a book; every field but the pages is optional
#[derive(Deserialize)]
struct BookFile {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    pages: Vec<String>,
    #[serde(default)]
    illustrations: Vec<Illustration>,
    #[serde(default)]
    title_illustration: Illustration,
    #[serde(default)]
    style: IllustrationStyle,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl From<BookFile> for Book {
    fn from(file: BookFile) -> Self {
        let mut book = Book::with_illustrations(file.title, file.pages, file.illustrations)
            .with_title_illustration(file.title_illustration)
            .with_style(file.style);
        book.author = file.author;
        book
    }
}
