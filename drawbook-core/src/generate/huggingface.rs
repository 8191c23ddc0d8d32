//! Hugging Face inference clients

use super::{GeneratorConfig, ImageService, TextService};
use crate::error::GenerationError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

/// Instruction context for page descriptions
const DESCRIBE_INSTRUCTIONS: &str = "You help illustrate children's books. \
Given the text of one page, reply with a single short sentence describing \
what a picture of that page should show: the characters, what they are doing \
and where. Do not mention text, words or speech. Reply with the description only.";

fn build_client(config: &GeneratorConfig) -> Result<Client, GenerationError> {
    Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| GenerationError::Config(format!("Failed to build HTTP client: {}", e)))
}

fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Turn a non-success response into an error
async fn check_status(response: Response) -> Result<Response, GenerationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GenerationError::Status {
        status: status.as_u16(),
        body: body.chars().take(200).collect(),
    })
}

/// Text-to-image client; the style id names the model to call
pub struct HfImageClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HfImageClient {
    /// Build a client; warns when no access token is configured
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        if config.token.is_none() {
            tracing::warn!(
                "No Hugging Face token found; requests may be rate limited or rejected. \
                 Set HF_TOKEN to authenticate."
            );
        }
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.image_endpoint.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn model_url(&self, style: &str) -> String {
        format!("{}/{}", self.endpoint, style)
    }
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    inputs: &'a str,
}

#[async_trait]
impl ImageService for HfImageClient {
    async fn generate(&self, prompt: &str, style: &str) -> Result<Vec<u8>, GenerationError> {
        let url = self.model_url(style);
        tracing::debug!("Requesting illustration from {}", url);

        let request = self.client.post(&url).json(&ImageRequest { inputs: prompt });
        let response = authorize(request, self.token.as_deref()).send().await?;
        let bytes = check_status(response).await?.bytes().await?;
        if bytes.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(bytes.to_vec())
    }
}

/// Chat-completions client that describes page text
pub struct HfTextClient {
    client: Client,
    endpoint: String,
    model: String,
    token: Option<String>,
}

impl HfTextClient {
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.text_endpoint.clone(),
            model: config.text_model.clone(),
            token: config.token.clone(),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[async_trait]
impl TextService for HfTextClient {
    async fn describe(&self, text: &str) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: DESCRIBE_INSTRUCTIONS,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            max_tokens: 100,
        };

        let request = self.client.post(&self.endpoint).json(&body);
        let response = authorize(request, self.token.as_deref()).send().await?;
        let reply: ChatResponse = check_status(response).await?.json().await?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}
