//! Strategies for turning page text into an image prompt

use super::TextService;
use crate::error::GenerationError;
use crate::types::IllustrationStyle;
use async_trait::async_trait;

/// Derives the image prompt for one slot
#[async_trait]
pub trait PromptStrategy: Send + Sync {
    async fn prompt(
        &self,
        text: &str,
        style: &IllustrationStyle,
    ) -> Result<String, GenerationError>;
}

/// Apply the style template directly to the page text
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectPrompt;

#[async_trait]
impl PromptStrategy for DirectPrompt {
    async fn prompt(
        &self,
        text: &str,
        style: &IllustrationStyle,
    ) -> Result<String, GenerationError> {
        Ok(style.prompt_for(text))
    }
}

/// Ask a text model to describe the scene first, then apply the style
/// template to that description
pub struct DescribeThenStylize {
    describer: Box<dyn TextService>,
}

impl DescribeThenStylize {
    pub fn new(describer: impl TextService + 'static) -> Self {
        Self {
            describer: Box::new(describer),
        }
    }
}

#[async_trait]
impl PromptStrategy for DescribeThenStylize {
    async fn prompt(
        &self,
        text: &str,
        style: &IllustrationStyle,
    ) -> Result<String, GenerationError> {
        let description = self.describer.describe(text).await?;
        let description = description.trim().trim_end_matches('.');
        if description.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        tracing::debug!("Described {:?} as {:?}", text, description);
        Ok(style.prompt_for(description))
    }
}
