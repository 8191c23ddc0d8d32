//! Placement rules for title and content pages

use super::{
    drop_cap_runs, split_sentences, Align, Deck, Paragraph, Picture, Rect, Run, Shape, Slide,
    SlideKind, TextBox, TextPlacement, TextRole, SLIDE_HEIGHT, SLIDE_WIDTH,
};
use crate::types::{Book, Illustration};

/// Fonts and sizes used on the slides
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Font for the title
    pub title_font: String,
    /// Font for page text, author line and page numbers
    pub body_font: String,
    /// Title size in points
    pub title_size: u32,
    /// Size of the enlarged first letter of the title
    pub title_initial_size: u32,
    /// Page text size in points
    pub body_size: u32,
    /// Size of the enlarged first letter on the first page
    pub body_initial_size: u32,
    pub author_size: u32,
    pub page_number_size: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            title_font: "Noteworthy".to_string(),
            body_font: "Geneva".to_string(),
            title_size: 44,
            title_initial_size: 60,
            body_size: 28,
            body_initial_size: 40,
            author_size: 24,
            page_number_size: 16,
        }
    }
}

// Geometry, in inches, on a 10in x 7.5in slide.
const BORDER: (f64, f64, f64, f64) = (0.25, 0.25, 9.5, 7.0);
const TITLE_TEXT: (f64, f64, f64, f64) = (0.5, 0.6, 9.0, 1.4);
const TITLE_PICTURE: (f64, f64, f64, f64) = (2.0, 2.2, 6.0, 3.9);
const AUTHOR_TEXT: (f64, f64, f64, f64) = (0.5, 6.3, 9.0, 0.6);
const BODY_X: f64 = 0.5;
const BODY_WIDTH: f64 = 9.0;
const BODY_HEIGHT: f64 = 1.3;
const BODY_TOP_Y: f64 = 0.5;
const BODY_BOTTOM_Y: f64 = 5.4;
const PICTURE_X: f64 = 1.0;
const PICTURE_WIDTH: f64 = 8.0;
const PICTURE_HEIGHT: f64 = 4.7;
const PICTURE_BELOW_TEXT_Y: f64 = 1.95;
const PICTURE_ABOVE_TEXT_Y: f64 = 0.5;
const PAGE_NUMBER: (f64, f64, f64, f64) = (4.5, 6.75, 1.0, 0.4);

fn rect((x, y, width, height): (f64, f64, f64, f64)) -> Rect {
    Rect::from_inches(x, y, width, height)
}

/// Turns a [`Book`] into a [`Deck`]
#[derive(Debug, Clone, Default)]
pub struct BookLayout {
    pub config: LayoutConfig,
}

impl BookLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set fonts and sizes
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Lay out the title page followed by every content page
    pub fn layout(&self, book: &Book) -> Deck {
        let mut slides = Vec::with_capacity(book.len() + 1);
        slides.push(self.title_slide(book));
        for (index, (text, illustration)) in
            book.pages.iter().zip(&book.illustrations).enumerate()
        {
            slides.push(self.page_slide(index, text, illustration));
        }

        Deck {
            title: book.title.clone(),
            author: book.author.clone(),
            width: SLIDE_WIDTH,
            height: SLIDE_HEIGHT,
            slides,
        }
    }

    fn title_slide(&self, book: &Book) -> Slide {
        let config = &self.config;
        let mut shapes = vec![Shape::Border(rect(BORDER))];

        shapes.push(Shape::Text(TextBox {
            role: TextRole::Title,
            frame: rect(TITLE_TEXT),
            align: Align::Center,
            paragraphs: vec![Paragraph::new(drop_cap_runs(
                &book.title,
                &config.title_font,
                config.title_size,
                config.title_initial_size,
            ))],
        }));

        if let Illustration::Resolved(path) = &book.title_illustration {
            shapes.push(Shape::Picture(Picture {
                frame: rect(TITLE_PICTURE),
                path: path.clone(),
                description: book.title.clone(),
            }));
        }

        if let Some(author) = &book.author {
            shapes.push(Shape::Text(TextBox {
                role: TextRole::Author,
                frame: rect(AUTHOR_TEXT),
                align: Align::Center,
                paragraphs: vec![Paragraph::new(vec![Run::new(
                    format!("Written by {}", author),
                    &config.body_font,
                    config.author_size,
                )])],
            }));
        }

        Slide {
            kind: SlideKind::Title,
            shapes,
        }
    }

    fn page_slide(&self, index: usize, text: &str, illustration: &Illustration) -> Slide {
        let config = &self.config;
        let placement = TextPlacement::for_page(index);
        let (text_y, picture_y) = match placement {
            TextPlacement::Top => (BODY_TOP_Y, PICTURE_BELOW_TEXT_Y),
            TextPlacement::Bottom => (BODY_BOTTOM_Y, PICTURE_ABOVE_TEXT_Y),
        };

        let paragraphs = split_sentences(text)
            .into_iter()
            .enumerate()
            .map(|(line, sentence)| {
                if index == 0 && line == 0 {
                    Paragraph::new(drop_cap_runs(
                        &sentence,
                        &config.body_font,
                        config.body_size,
                        config.body_initial_size,
                    ))
                } else {
                    Paragraph::new(vec![Run::new(sentence, &config.body_font, config.body_size)])
                }
            })
            .collect();

        let mut shapes = vec![
            Shape::Border(rect(BORDER)),
            Shape::Text(TextBox {
                role: TextRole::Body,
                frame: Rect::from_inches(BODY_X, text_y, BODY_WIDTH, BODY_HEIGHT),
                align: Align::Center,
                paragraphs,
            }),
        ];

        if let Illustration::Resolved(path) = illustration {
            shapes.push(Shape::Picture(Picture {
                frame: Rect::from_inches(PICTURE_X, picture_y, PICTURE_WIDTH, PICTURE_HEIGHT),
                path: path.clone(),
                description: format!("Illustration for page {}", index + 1),
            }));
        }

        shapes.push(Shape::Text(TextBox {
            role: TextRole::PageNumber,
            frame: rect(PAGE_NUMBER),
            align: Align::Center,
            paragraphs: vec![Paragraph::new(vec![Run::new(
                (index + 1).to_string(),
                &config.body_font,
                config.page_number_size,
            )])],
        }));

        Slide {
            kind: SlideKind::Page {
                number: index + 1,
                placement,
            },
            shapes,
        }
    }
}
