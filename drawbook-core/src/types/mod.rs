//! Core types for the Drawbook book model

mod book;
mod illustration;
mod style;

pub use book::{Book, DEFAULT_TITLE};
pub use illustration::{Illustration, SlotId};
pub use style::{IllustrationStyle, DEFAULT_STYLE};
