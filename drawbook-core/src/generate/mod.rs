//! Filling in pending illustrations with a remote image service
//!
//! Slots are processed one at a time, title first, then pages in order.
//! A failure on one slot is logged and leaves that slot pending; the run
//! carries on with the next one.

mod config;
mod huggingface;
mod prompt;

pub use config::{
    GeneratorConfig, DEFAULT_IMAGE_ENDPOINT, DEFAULT_TEXT_ENDPOINT, DEFAULT_TEXT_MODEL,
};
pub use huggingface::{HfImageClient, HfTextClient};
pub use prompt::{DescribeThenStylize, DirectPrompt, PromptStrategy};

use crate::error::GenerationError;
use crate::types::{Book, Illustration, IllustrationStyle, SlotId};
use crate::Result;
use async_trait::async_trait;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// Text-to-image capability
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Generate an image for `prompt` using the model or LoRA named by `style`
    async fn generate(
        &self,
        prompt: &str,
        style: &str,
    ) -> std::result::Result<Vec<u8>, GenerationError>;
}

/// Text description capability used by [`DescribeThenStylize`]
#[async_trait]
pub trait TextService: Send + Sync {
    /// Describe what an illustration of `text` should show
    async fn describe(&self, text: &str) -> std::result::Result<String, GenerationError>;
}

/// Outcome of a generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Directory illustrations were saved to; `None` when nothing was pending
    pub output_dir: Option<PathBuf>,

    /// Slots that received an illustration
    pub resolved: Vec<SlotId>,

    /// Slots whose request failed; they are still pending
    pub failed: Vec<SlotId>,

    /// Slots that were already resolved or disabled
    pub skipped: usize,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Generates illustrations for every pending slot of a book
pub struct IllustrationGenerator {
    images: Box<dyn ImageService>,
    prompts: Box<dyn PromptStrategy>,
    progress: ProgressBar,
}

impl IllustrationGenerator {
    /// Create a generator that prompts with the page text directly
    pub fn new(images: impl ImageService + 'static) -> Self {
        Self {
            images: Box::new(images),
            prompts: Box::new(DirectPrompt),
            progress: ProgressBar::hidden(),
        }
    }

    /// Generator backed by the Hugging Face inference API
    pub fn huggingface(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self::new(HfImageClient::new(config)?))
    }

    /// Set how prompts are derived from page text
    pub fn with_prompt_strategy(mut self, strategy: impl PromptStrategy + 'static) -> Self {
        self.prompts = Box::new(strategy);
        self
    }

    /// Report progress on the given bar; its length is set per run
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Generate illustrations for every pending slot of `book`.
    ///
    /// Images are saved as PNG under `output_dir` (created if needed; a new
    /// temporary directory when `None`) and the slots are updated in place.
    /// Only failing to prepare the output directory is an error.
    pub async fn illustrate(
        &self,
        book: &mut Book,
        output_dir: Option<&Path>,
    ) -> Result<GenerationReport> {
        let pending = book.pending_slots();
        let skipped = book.len() + 1 - pending.len();

        if pending.is_empty() {
            tracing::info!("No pending illustrations for '{}'", book.title);
            return Ok(GenerationReport {
                output_dir: None,
                resolved: Vec::new(),
                failed: Vec::new(),
                skipped,
            });
        }

        let output_dir = prepare_output_dir(output_dir)?;

        tracing::info!(
            "Generating {} illustrations in {} (style {})",
            pending.len(),
            output_dir.display(),
            book.style
        );

        let mut report = GenerationReport {
            output_dir: Some(output_dir.clone()),
            resolved: Vec::new(),
            failed: Vec::new(),
            skipped,
        };

        self.progress.set_length(pending.len() as u64);
        self.progress.set_position(0);

        for slot in pending {
            self.progress.set_message(slot.to_string());
            let text = book.slot_text(slot).unwrap_or_default().to_string();
            let path = output_dir.join(format!("{}.png", slot.file_stem()));

            match self.render_slot(&text, &book.style, &path).await {
                Ok(()) => {
                    tracing::debug!("Saved {} illustration to {}", slot, path.display());
                    if let Some(state) = book.slot_mut(slot) {
                        *state = Illustration::Resolved(path);
                    }
                    report.resolved.push(slot);
                }
                Err(e) => {
                    tracing::warn!("Could not generate illustration for {}: {}", slot, e);
                    report.failed.push(slot);
                }
            }
            self.progress.inc(1);
        }

        self.progress.finish_with_message("done");
        tracing::info!(
            "Generated {} illustrations ({} failed, {} skipped)",
            report.resolved.len(),
            report.failed.len(),
            report.skipped
        );
        Ok(report)
    }

    async fn render_slot(
        &self,
        text: &str,
        style: &IllustrationStyle,
        path: &Path,
    ) -> std::result::Result<(), GenerationError> {
        let prompt = self.prompts.prompt(text, style).await?;
        tracing::debug!("Prompt: {}", prompt);

        let bytes = self.images.generate(&prompt, style.id()).await?;
        let image =
            image::load_from_memory(&bytes).map_err(|e| GenerationError::Decode(e.to_string()))?;
        image
            .save(path)
            .map_err(|e| GenerationError::Save(e.to_string()))?;
        Ok(())
    }
}

fn prepare_output_dir(output_dir: Option<&Path>) -> Result<PathBuf> {
    match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            Ok(dir.to_path_buf())
        }
        None => {
            let dir = tempfile::Builder::new()
                .prefix("drawbook-")
                .disable_cleanup(true)
                .tempdir()?;
            Ok(dir.path().to_path_buf())
        }
    }
}

impl Book {
    /// Generate missing illustrations with the Hugging Face inference API
    /// configured from the environment
    pub async fn illustrate(&mut self, output_dir: Option<&Path>) -> Result<GenerationReport> {
        IllustrationGenerator::huggingface(&GeneratorConfig::from_env())?
            .illustrate(self, output_dir)
            .await
    }
}
