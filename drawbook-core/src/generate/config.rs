//! Settings for the remote inference services

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Base URL image models are appended to
pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://router.huggingface.co/hf-inference/models";

/// OpenAI-compatible chat completions endpoint
pub const DEFAULT_TEXT_ENDPOINT: &str = "https://router.huggingface.co/v1/chat/completions";

/// Model asked to describe page text
pub const DEFAULT_TEXT_MODEL: &str = "Qwen/Qwen2.5-72B-Instruct";

/// Remote endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Base URL for image generation; the style id is appended as a path
    pub image_endpoint: String,

    /// Chat completions URL used for page descriptions
    pub text_endpoint: String,

    /// Model used for page descriptions
    pub text_model: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Access token; requests are sent unauthenticated without one
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            image_endpoint: DEFAULT_IMAGE_ENDPOINT.to_string(),
            text_endpoint: DEFAULT_TEXT_ENDPOINT.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            timeout_secs: 120,
            token: None,
        }
    }
}

impl GeneratorConfig {
    /// Build a configuration from the environment.
    ///
    /// The token comes from `HF_TOKEN`, then `HUGGING_FACE_HUB_TOKEN`, then
    /// the token file in the Hugging Face cache directory. Endpoints can be
    /// overridden with `DRAWBOOK_IMAGE_ENDPOINT` and `DRAWBOOK_TEXT_ENDPOINT`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(endpoint) = std::env::var("DRAWBOOK_IMAGE_ENDPOINT") {
            config.image_endpoint = endpoint;
        }
        if let Ok(endpoint) = std::env::var("DRAWBOOK_TEXT_ENDPOINT") {
            config.text_endpoint = endpoint;
        }
        config.token = lookup_token(|key| std::env::var(key).ok());
        config
    }

    /// Set the access token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the image endpoint base URL
    pub fn with_image_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.image_endpoint = endpoint.into();
        self
    }

    /// Set the chat completions URL
    pub fn with_text_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.text_endpoint = endpoint.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Resolve the access token, reading variables through `var`
fn lookup_token<F>(var: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    ["HF_TOKEN", "HUGGING_FACE_HUB_TOKEN"]
        .into_iter()
        .filter_map(|key| var(key))
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
        .or_else(|| cached_token(&token_path(&var)?))
}

fn cached_token(path: &Path) -> Option<String> {
    let token = std::fs::read_to_string(path).ok()?;
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        tracing::debug!("Using access token from {}", path.display());
        Some(token.to_string())
    }
}

/// `$HF_HOME/token`, or `~/.cache/huggingface/token`
fn token_path<F>(var: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(home) = var("HF_HOME") {
        return Some(PathBuf::from(home).join("token"));
    }
    let home = var("HOME").or_else(|| var("USERPROFILE"))?;
    Some(PathBuf::from(home).join(".cache").join("huggingface").join("token"))
}
