//! Deterministic slide model for a book
//!
//! Laying a book out produces a [`Deck`]: plain data describing every shape
//! on every slide. Encoders turn a deck into a file; nothing here touches the
//! filesystem, so the placement rules can be tested exactly.

mod book;
mod text;

pub use book::{BookLayout, LayoutConfig};
pub use text::{drop_cap_runs, split_sentences};

use std::path::PathBuf;

/// English Metric Units per inch, the unit of slide geometry
pub const EMU_PER_INCH: i64 = 914_400;

/// Slide width (10in)
pub const SLIDE_WIDTH: i64 = 10 * EMU_PER_INCH;

/// Slide height (7.5in)
pub const SLIDE_HEIGHT: i64 = 7 * EMU_PER_INCH + EMU_PER_INCH / 2;

/// Convert inches to EMU
pub fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH as f64).round() as i64
}

/// Axis-aligned box in EMU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from inch measurements
    pub fn from_inches(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(inches(x), inches(y), inches(width), inches(height))
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }

    /// Largest rect with the given aspect ratio that fits inside this one,
    /// centered in it
    pub fn fit(&self, pixel_width: u32, pixel_height: u32) -> Rect {
        if pixel_width == 0 || pixel_height == 0 {
            return *self;
        }
        let scale = f64::min(
            self.width as f64 / pixel_width as f64,
            self.height as f64 / pixel_height as f64,
        );
        let width = (pixel_width as f64 * scale).round() as i64;
        let height = (pixel_height as f64 * scale).round() as i64;
        Rect::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }
}

/// A laid-out book, ready for encoding
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    /// Document title (package metadata)
    pub title: String,

    /// Document author (package metadata)
    pub author: Option<String>,

    pub width: i64,
    pub height: i64,

    /// Title slide first, then one slide per content page
    pub slides: Vec<Slide>,
}

/// One slide and its shapes, in z-order
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub kind: SlideKind,
    pub shapes: Vec<Shape>,
}

impl Slide {
    /// First text box with the given role
    pub fn text(&self, role: TextRole) -> Option<&TextBox> {
        self.shapes.iter().find_map(|shape| match shape {
            Shape::Text(text) if text.role == role => Some(text),
            _ => None,
        })
    }

    pub fn picture(&self) -> Option<&Picture> {
        self.shapes.iter().find_map(|shape| match shape {
            Shape::Picture(picture) => Some(picture),
            _ => None,
        })
    }

    pub fn has_border(&self) -> bool {
        self.shapes.iter().any(|shape| matches!(shape, Shape::Border(_)))
    }

    /// Where the body text sits, for content pages
    pub fn placement(&self) -> Option<TextPlacement> {
        match self.kind {
            SlideKind::Title => None,
            SlideKind::Page { placement, .. } => Some(placement),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Title,
    /// Content page; `number` is 1-indexed
    Page {
        number: usize,
        placement: TextPlacement,
    },
}

/// Vertical position of the page text relative to the illustration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPlacement {
    Top,
    Bottom,
}

impl TextPlacement {
    /// Text sits on top for even 0-indexed pages, below for odd ones
    pub fn for_page(index: usize) -> Self {
        if index % 2 == 0 {
            TextPlacement::Top
        } else {
            TextPlacement::Bottom
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Decorative frame around the slide content
    Border(Rect),
    Text(TextBox),
    Picture(Picture),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Author,
    Body,
    PageNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub role: TextRole,
    pub frame: Rect,
    pub align: Align,
    pub paragraphs: Vec<Paragraph>,
}

impl TextBox {
    /// Paragraph texts, one entry per displayed line
    pub fn lines(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::text).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Styled span of text
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub font: String,
    /// Size in points
    pub size: u32,
}

impl Run {
    pub fn new(text: impl Into<String>, font: impl Into<String>, size: u32) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size,
        }
    }
}

/// Illustration to place inside `frame`, scaled to fit
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub frame: Rect,
    pub path: PathBuf,
    /// Alternative text
    pub description: String,
}
