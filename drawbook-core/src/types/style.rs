//! Illustration style selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Style used when no style is chosen
pub const DEFAULT_STYLE: &str = "alvdansen/littletinies";

/// Phrasing used for styles without a canned template
const FALLBACK_TEMPLATE: &str = "Children's book illustration of: {subject}";

/// Known styles and their prompt templates. `{subject}` is replaced with the
/// page text or its description.
const KNOWN_STYLES: &[(&str, &str)] = &[
    (
        "alvdansen/littletinies",
        "a hand drawn illustration of {subject}, in the style of littletinies",
    ),
    (
        "alvdansen/soft-and-squishy-linework",
        "a dreamy, soft line drawing of {subject}, in the style of softlinework",
    ),
    (
        "SebastianBodza/Flux_Aquarell_Watercolor_v2",
        "AQUACOLTOK, a watercolor painting of {subject}, white background",
    ),
    (
        "prithivMLmods/Yarn-Art-Flux-LoRA",
        "Yarn Art Style, a knitted picture of {subject}",
    ),
];

/// Identifier of the remote model or LoRA used for illustrations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IllustrationStyle(String);

impl IllustrationStyle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Remote identifier, e.g. `alvdansen/littletinies`
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Whether this style has its own prompt phrasing
    pub fn is_known(&self) -> bool {
        KNOWN_STYLES.iter().any(|(id, _)| *id == self.0)
    }

    /// Build the final image prompt for a subject
    pub fn prompt_for(&self, subject: &str) -> String {
        let template = KNOWN_STYLES
            .iter()
            .find(|(id, _)| *id == self.0)
            .map(|(_, template)| *template)
            .unwrap_or(FALLBACK_TEMPLATE);
        template.replace("{subject}", subject.trim())
    }

    /// All styles with canned phrasing
    pub fn known() -> impl Iterator<Item = IllustrationStyle> {
        KNOWN_STYLES.iter().map(|(id, _)| IllustrationStyle::new(*id))
    }
}

impl Default for IllustrationStyle {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE)
    }
}

impl fmt::Display for IllustrationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IllustrationStyle {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for IllustrationStyle {
    fn from(id: String) -> Self {
        Self(id)
    }
}
