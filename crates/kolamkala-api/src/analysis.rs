//! Image analysis backends
//!
//! The service never inspects pixels itself. An analyzer either returns a
//! fixed sample analysis or forwards the image to an OpenAI-compatible
//! vision model and relays whatever JSON object comes back.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use kolamkala_common::{Error, Result};
use reqwest::{header, Client};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Base64 characters of the image kept in the stored data URL
const STORED_IMAGE_PREFIX: usize = 100;

/// Token budget for one analysis
const MAX_COMPLETION_TOKENS: u32 = 1024;

const SYSTEM_PROMPT: &str = r##"You are an expert in analyzing Kolam patterns, a traditional South Indian floor art.
Analyze the provided image and return a JSON object with the following structure:
{
  "symmetry": ["vertical", "horizontal", "rotational"] (include only detected types),
  "dotMatrix": { "rows": number, "cols": number } or null if no dot grid detected,
  "pattern": { "label": "sikku" | "neli" | "pulli" | "geometric" | "freehand", "confidence": 0-1 },
  "colors": ["#hexcolor1", "#hexcolor2"] (up to 5 primary colors),
  "complexity": 0-100 (percentage indicating design complexity),
  "lineThickness": "thin" | "medium" | "thick",
  "style": "outline" | "filled" | "mixed"
}
Respond with only valid JSON, no additional text."##;

const USER_PROMPT: &str = "Analyze this Kolam pattern image and provide detailed metrics.";

/// An uploaded image
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Full `data:` URL sent to the model
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    /// Shortened `data:` URL kept as the record's image reference
    pub fn stored_url(&self) -> String {
        let encoded = STANDARD.encode(&self.bytes);
        let prefix = &encoded[..encoded.len().min(STORED_IMAGE_PREFIX)];
        format!("data:{};base64,{}...", self.mime_type, prefix)
    }
}

/// What an analyzer produced
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Fixed sample response; nothing is persisted
    Sample(Value),
    /// Response from a vision model, relayed as-is and persisted
    Detected(Value),
}

impl AnalysisOutcome {
    /// The JSON body returned to the client
    pub fn body(&self) -> &Value {
        match self {
            AnalysisOutcome::Sample(body) | AnalysisOutcome::Detected(body) => body,
        }
    }
}

/// Core trait for image analysis backends
#[async_trait]
pub trait PatternAnalyzer: Send + Sync {
    /// Backend identifier (model name, or `canned`)
    fn name(&self) -> &str;

    /// Analyze one image
    async fn analyze(&self, image: &ImageUpload) -> Result<AnalysisOutcome>;
}

/// Serves the same sample analysis for every image
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedAnalyzer;

/// The sample analysis returned when no vision model is configured
pub fn canned_response() -> Value {
    json!({
        "symmetry": ["vertical", "horizontal"],
        "dotMatrix": { "rows": 5, "cols": 5 },
        "pattern": { "label": "sikku", "confidence": 0.85 },
        "colors": ["#8B1E3F", "#D8B75A", "#FFFFFF"],
        "complexity": 65,
        "lineThickness": "medium",
        "style": "outline"
    })
}

#[async_trait]
impl PatternAnalyzer for CannedAnalyzer {
    fn name(&self) -> &str {
        "canned"
    }

    async fn analyze(&self, image: &ImageUpload) -> Result<AnalysisOutcome> {
        debug!(
            "Serving canned analysis for {} byte {} image",
            image.bytes.len(),
            image.mime_type
        );
        Ok(AnalysisOutcome::Sample(canned_response()))
    }
}

/// OpenAI-compatible chat completions backend
pub struct OpenAiAnalyzer {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

impl OpenAiAnalyzer {
    /// Create a new analyzer
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: SecretString,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        })
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request_body(&self, image: &ImageUpload) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: ChatContent::Text(SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: ChatContent::Parts(vec![
                        ContentPart::Text {
                            text: USER_PROMPT.to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image.data_url(),
                            },
                        },
                    ]),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            max_completion_tokens: MAX_COMPLETION_TOKENS,
        }
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    max_completion_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: ChatContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

#[async_trait]
impl PatternAnalyzer for OpenAiAnalyzer {
    fn name(&self) -> &str {
        &self.model
    }

    async fn analyze(&self, image: &ImageUpload) -> Result<AnalysisOutcome> {
        debug!(
            "Sending {} byte {} image to {}",
            image.bytes.len(),
            image.mime_type,
            self.model
        );

        let response = self
            .client
            .post(self.chat_completions_url())
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&self.request_body(image))
            .send()
            .await
            .map_err(|e| Error::Analysis(format!("Vision model unreachable: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Vision model returned HTTP {}: {}", status, body);
            return Err(Error::Analysis(format!("HTTP {}", status)));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Analysis(format!("Malformed completion: {}", e)))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| Error::Analysis("No analysis response from model".to_string()))?;

        let analysis: Value = serde_json::from_str(&content)?;
        if !analysis.is_object() {
            return Err(Error::Analysis(
                "Model response is not a JSON object".to_string(),
            ));
        }

        Ok(AnalysisOutcome::Detected(analysis))
    }
}
