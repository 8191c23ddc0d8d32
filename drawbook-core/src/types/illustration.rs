//! Illustration slots and their three states

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// State of a single illustration slot (a content page or the title page)
///
/// In JSON a slot is written the loose way: a path string when resolved,
/// `null` while pending and `false` when disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LooseIllustration", into = "LooseIllustration")]
pub enum Illustration {
    /// No illustration yet; eligible for generation
    #[default]
    Pending,

    /// Explicitly no illustration; never generated, never rendered
    Disabled,

    /// Path to a generated or supplied image
    Resolved(PathBuf),
}

impl Illustration {
    /// Create a resolved slot pointing at an image file
    pub fn resolved(path: impl Into<PathBuf>) -> Self {
        Illustration::Resolved(path.into())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Illustration::Pending)
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Illustration::Disabled)
    }

    /// Path of the image, if the slot is resolved
    pub fn path(&self) -> Option<&Path> {
        match self {
            Illustration::Resolved(path) => Some(path),
            _ => None,
        }
    }
}

impl From<PathBuf> for Illustration {
    fn from(path: PathBuf) -> Self {
        Illustration::Resolved(path)
    }
}

impl From<&str> for Illustration {
    fn from(path: &str) -> Self {
        Illustration::Resolved(PathBuf::from(path))
    }
}

impl fmt::Display for Illustration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Illustration::Pending => f.write_str("pending"),
            Illustration::Disabled => f.write_str("disabled"),
            Illustration::Resolved(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Identifies one slot of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotId {
    Title,
    /// 0-indexed content page
    Page(usize),
}

impl SlotId {
    /// File stem used when the slot's illustration is saved
    pub fn file_stem(&self) -> String {
        match self {
            SlotId::Title => "title".to_string(),
            SlotId::Page(index) => format!("page_{}", index + 1),
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotId::Title => f.write_str("title page"),
            SlotId::Page(index) => write!(f, "page {}", index + 1),
        }
    }
}

/// Wire form of an illustration slot
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LooseIllustration {
    Path(PathBuf),
    Flag(bool),
    Pending,
}

impl TryFrom<LooseIllustration> for Illustration {
    type Error = String;

    fn try_from(loose: LooseIllustration) -> Result<Self, Self::Error> {
        match loose {
            LooseIllustration::Path(path) => Ok(Illustration::Resolved(path)),
            LooseIllustration::Flag(false) => Ok(Illustration::Disabled),
            LooseIllustration::Flag(true) => Err(
                "`true` is not a valid illustration; use a path, null or false".to_string(),
            ),
            LooseIllustration::Pending => Ok(Illustration::Pending),
        }
    }
}

impl From<Illustration> for LooseIllustration {
    fn from(illustration: Illustration) -> Self {
        match illustration {
            Illustration::Pending => LooseIllustration::Pending,
            Illustration::Disabled => LooseIllustration::Flag(false),
            Illustration::Resolved(path) => LooseIllustration::Path(path),
        }
    }
}
