//! Generation tests for drawbook-core
//!
//! The image and text services are faked so the generation loop can be
//! checked precisely: which slots are requested, in what order, and what
//! happens to the book when a request fails.

use async_trait::async_trait;
use drawbook_core::generate::{
    DescribeThenStylize, GeneratorConfig, HfImageClient, HfTextClient, ImageService, TextService,
    DEFAULT_TEXT_MODEL,
};
use drawbook_core::{Book, GenerationError, Illustration, IllustrationGenerator, SlotId};
use std::io::{Cursor, Read};
use std::sync::{Arc, Mutex};

// =============================================================================
// Fakes
// =============================================================================

fn png_bytes() -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image::RgbImage::from_pixel(4, 3, image::Rgb([90, 160, 220]))
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// Returns a small PNG for every prompt, except prompts containing
/// `fail_on`, which get a 503.
#[derive(Clone, Default)]
struct FakeImages {
    prompts: Arc<Mutex<Vec<String>>>,
    fail_on: Option<&'static str>,
}

impl FakeImages {
    fn failing_on(needle: &'static str) -> Self {
        Self {
            fail_on: Some(needle),
            ..Self::default()
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageService for FakeImages {
    async fn generate(&self, prompt: &str, _style: &str) -> Result<Vec<u8>, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.fail_on {
            Some(needle) if prompt.contains(needle) => Err(GenerationError::Status {
                status: 503,
                body: "Model is loading".to_string(),
            }),
            _ => Ok(png_bytes()),
        }
    }
}

/// Returns bytes that are not an image
struct GarbageImages;

#[async_trait]
impl ImageService for GarbageImages {
    async fn generate(&self, _prompt: &str, _style: &str) -> Result<Vec<u8>, GenerationError> {
        Ok(b"<html>rate limited</html>".to_vec())
    }
}

struct UppercaseDescriber;

#[async_trait]
impl TextService for UppercaseDescriber {
    async fn describe(&self, text: &str) -> Result<String, GenerationError> {
        Ok(format!("a scene where {}", text.to_uppercase()))
    }
}

fn pages(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_resolves_every_pending_slot_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let images = FakeImages::default();
    let generator = IllustrationGenerator::new(images.clone());

    let mut book = Book::new("Sam's Trip", pages(&["Sam packed his bag.", "He waved goodbye."]))
        .with_style("custom/model");
    let report = generator.illustrate(&mut book, Some(dir.path())).await.unwrap();

    assert_eq!(
        report.resolved,
        vec![SlotId::Title, SlotId::Page(0), SlotId::Page(1)]
    );
    assert!(report.is_complete());
    assert_eq!(report.skipped, 0);

    assert_eq!(
        images.prompts(),
        vec![
            "Children's book illustration of: Sam's Trip",
            "Children's book illustration of: Sam packed his bag.",
            "Children's book illustration of: He waved goodbye.",
        ]
    );

    assert_eq!(
        book.title_illustration,
        Illustration::Resolved(dir.path().join("title.png"))
    );
    assert_eq!(
        book.illustrations,
        vec![
            Illustration::Resolved(dir.path().join("page_1.png")),
            Illustration::Resolved(dir.path().join("page_2.png")),
        ]
    );
    for slot in book.illustrations.iter().chain([&book.title_illustration]) {
        let path = slot.path().unwrap();
        assert_eq!(image::image_dimensions(path).unwrap(), (4, 3));
    }
}

#[tokio::test]
async fn test_resolved_and_disabled_slots_are_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let existing = dir.path().join("mine.png");
    std::fs::write(&existing, b"hand drawn").unwrap();

    let images = FakeImages::default();
    let generator = IllustrationGenerator::new(images.clone());

    let mut book = Book::with_illustrations(
        "Mixed",
        pages(&["first", "second", "third"]),
        vec![
            Illustration::Resolved(existing.clone()),
            Illustration::Disabled,
            Illustration::Pending,
        ],
    )
    .with_title_illustration(Illustration::Disabled);
    let before = book.clone();

    let report = generator.illustrate(&mut book, Some(dir.path())).await.unwrap();

    assert_eq!(report.resolved, vec![SlotId::Page(2)]);
    assert_eq!(report.skipped, 3);
    assert_eq!(images.prompts().len(), 1);

    assert_eq!(book.title_illustration, before.title_illustration);
    assert_eq!(book.illustrations[0], before.illustrations[0]);
    assert_eq!(book.illustrations[1], before.illustrations[1]);
    assert_eq!(std::fs::read(&existing).unwrap(), b"hand drawn");
    assert!(!dir.path().join("page_1.png").exists());
    assert!(!dir.path().join("page_2.png").exists());
}

#[tokio::test]
async fn test_failed_slot_stays_pending_while_others_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let generator = IllustrationGenerator::new(FakeImages::failing_on("storm"));

    let mut book = Book::new(
        "Weather",
        pages(&["The sun came out.", "A storm rolled in.", "Then a rainbow."]),
    )
    .with_title_illustration(Illustration::Disabled);

    let report = generator.illustrate(&mut book, Some(dir.path())).await.unwrap();

    assert_eq!(report.resolved, vec![SlotId::Page(0), SlotId::Page(2)]);
    assert_eq!(report.failed, vec![SlotId::Page(1)]);
    assert!(!report.is_complete());

    assert!(matches!(book.illustrations[0], Illustration::Resolved(_)));
    assert!(book.illustrations[1].is_pending());
    assert!(matches!(book.illustrations[2], Illustration::Resolved(_)));

    // A second run only retries the slot that failed
    let images = FakeImages::default();
    let retry = IllustrationGenerator::new(images.clone())
        .illustrate(&mut book, Some(dir.path()))
        .await
        .unwrap();
    assert_eq!(retry.resolved, vec![SlotId::Page(1)]);
    assert_eq!(images.prompts().len(), 1);
}

#[tokio::test]
async fn test_undecodable_bytes_leave_slot_pending() {
    let dir = tempfile::tempdir().unwrap();
    let generator = IllustrationGenerator::new(GarbageImages);

    let mut book = Book::new("Garbage", pages(&["page"]));
    let report = generator.illustrate(&mut book, Some(dir.path())).await.unwrap();

    assert_eq!(report.failed, vec![SlotId::Title, SlotId::Page(0)]);
    assert!(book.title_illustration.is_pending());
    assert!(book.illustrations[0].is_pending());
}

#[tokio::test]
async fn test_describe_then_stylize_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let images = FakeImages::default();
    let generator = IllustrationGenerator::new(images.clone())
        .with_prompt_strategy(DescribeThenStylize::new(UppercaseDescriber));

    let mut book = Book::new("Fox", pages(&["the fox ran"]))
        .with_title_illustration(Illustration::Disabled)
        .with_style("custom/model");
    generator.illustrate(&mut book, Some(dir.path())).await.unwrap();

    assert_eq!(
        images.prompts(),
        vec!["Children's book illustration of: a scene where THE FOX RAN"]
    );
}

#[tokio::test]
async fn test_output_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("art/run-1");
    let generator = IllustrationGenerator::new(FakeImages::default());

    let mut book = Book::new("Nested", Vec::new());
    let report = generator.illustrate(&mut book, Some(&nested)).await.unwrap();

    assert_eq!(report.output_dir, Some(nested.clone()));
    assert!(nested.join("title.png").exists());
}

#[tokio::test]
async fn test_temporary_directory_when_none_given() {
    let generator = IllustrationGenerator::new(FakeImages::default());
    let mut book = Book::new("Temp", Vec::new());

    let report = generator.illustrate(&mut book, None).await.unwrap();

    let output_dir = report.output_dir.unwrap();
    assert!(output_dir.is_dir());
    assert!(output_dir.join("title.png").exists());
    std::fs::remove_dir_all(&output_dir).unwrap();
}

#[tokio::test]
async fn test_nothing_pending_creates_no_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("never-made");
    let images = FakeImages::default();
    let generator = IllustrationGenerator::new(images.clone());

    let mut book = Book::with_illustrations(
        "Done",
        pages(&["only page"]),
        vec![Illustration::Disabled],
    )
    .with_title_illustration(Illustration::Disabled);
    let report = generator.illustrate(&mut book, Some(&target)).await.unwrap();

    assert_eq!(report.output_dir, None);
    assert_eq!(report.skipped, 2);
    assert!(report.resolved.is_empty());
    assert!(images.prompts().is_empty());
    assert!(!target.exists());
}

// =============================================================================
// HTTP clients against a local endpoint
// =============================================================================

/// One request as received by the local endpoint
#[derive(Debug)]
struct Received {
    url: String,
    body: String,
    authorization: Option<String>,
}

impl Received {
    fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Serve `responses` in order, then stop; returns the base URL
fn serve(responses: Vec<(u16, Vec<u8>)>) -> (String, std::thread::JoinHandle<Vec<Received>>) {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();

    let handle = std::thread::spawn(move || {
        let mut seen = Vec::new();
        for (status, body) in responses {
            let mut request = server.recv().unwrap();
            let mut content = String::new();
            request.as_reader().read_to_string(&mut content).unwrap();
            let authorization = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Authorization"))
                .map(|header| header.value.as_str().to_string());
            seen.push(Received {
                url: request.url().to_string(),
                body: content,
                authorization,
            });
            let response = tiny_http::Response::from_data(body).with_status_code(status);
            request.respond(response).unwrap();
        }
        seen
    });

    (format!("http://127.0.0.1:{}", port), handle)
}

fn chat_reply(content: &str) -> Vec<u8> {
    serde_json::json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
    .to_string()
    .into_bytes()
}

#[tokio::test]
async fn test_http_client_posts_prompt_to_style_model() {
    let (base, handle) = serve(vec![(200, png_bytes())]);
    let config = GeneratorConfig::default()
        .with_image_endpoint(format!("{}/models", base))
        .with_token("test-token");
    let client = HfImageClient::new(&config).unwrap();

    let bytes = client
        .generate("a hand drawn fox", "alvdansen/littletinies")
        .await
        .unwrap();
    assert_eq!(bytes, png_bytes());

    let seen = handle.join().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].url, "/models/alvdansen/littletinies");
    assert_eq!(seen[0].body, r#"{"inputs":"a hand drawn fox"}"#);
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer test-token"));
}

#[tokio::test]
async fn test_requests_without_token_have_no_authorization() {
    let (base, handle) = serve(vec![(200, png_bytes()), (200, chat_reply("a fox"))]);
    let config = GeneratorConfig::default()
        .with_image_endpoint(format!("{}/models", base))
        .with_text_endpoint(format!("{}/v1/chat/completions", base));

    HfImageClient::new(&config)
        .unwrap()
        .generate("a fox", "custom/model")
        .await
        .unwrap();
    HfTextClient::new(&config)
        .unwrap()
        .describe("The fox ran.")
        .await
        .unwrap();

    let seen = handle.join().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|request| request.authorization.is_none()));
}

#[tokio::test]
async fn test_http_error_status_is_a_generation_failure() {
    let (base, handle) = serve(vec![
        (200, png_bytes()),
        (503, b"{\"error\":\"Model is loading\"}".to_vec()),
    ]);
    let config = GeneratorConfig::default().with_image_endpoint(format!("{}/models", base));
    let generator = IllustrationGenerator::new(HfImageClient::new(&config).unwrap());

    let dir = tempfile::tempdir().unwrap();
    let mut book = Book::new("Served", pages(&["A quiet page."]));
    let report = generator.illustrate(&mut book, Some(dir.path())).await.unwrap();
    handle.join().unwrap();

    assert_eq!(report.resolved, vec![SlotId::Title]);
    assert_eq!(report.failed, vec![SlotId::Page(0)]);
    assert!(book.illustrations[0].is_pending());
}

#[tokio::test]
async fn test_text_client_sends_chat_request() {
    let (base, handle) = serve(vec![(200, chat_reply("a fox running through tall grass"))]);
    let config = GeneratorConfig::default()
        .with_text_endpoint(format!("{}/v1/chat/completions", base))
        .with_token("test-token");
    let client = HfTextClient::new(&config).unwrap();

    let description = client.describe("The fox ran.").await.unwrap();
    assert_eq!(description, "a fox running through tall grass");

    let seen = handle.join().unwrap();
    assert_eq!(seen[0].url, "/v1/chat/completions");
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer test-token"));

    let body = seen[0].json();
    assert_eq!(body["model"], DEFAULT_TEXT_MODEL);
    assert_eq!(body["max_tokens"], 100);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert!(!messages[0]["content"].as_str().unwrap().is_empty());
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "The fox ran.");
}

#[tokio::test]
async fn test_text_client_error_status() {
    let (base, handle) = serve(vec![(500, b"upstream exploded".to_vec())]);
    let config =
        GeneratorConfig::default().with_text_endpoint(format!("{}/v1/chat/completions", base));

    let err = HfTextClient::new(&config)
        .unwrap()
        .describe("The fox ran.")
        .await
        .unwrap_err();
    handle.join().unwrap();

    match err {
        GenerationError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_text_client_empty_replies() {
    let (base, handle) = serve(vec![
        (200, br#"{"choices":[]}"#.to_vec()),
        (200, chat_reply("   ")),
    ]);
    let config =
        GeneratorConfig::default().with_text_endpoint(format!("{}/v1/chat/completions", base));
    let client = HfTextClient::new(&config).unwrap();

    let no_choices = client.describe("The fox ran.").await.unwrap_err();
    assert!(matches!(no_choices, GenerationError::EmptyResponse));
    let blank = client.describe("The fox ran.").await.unwrap_err();
    assert!(matches!(blank, GenerationError::EmptyResponse));

    handle.join().unwrap();
}
