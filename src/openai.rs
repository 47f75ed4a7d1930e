use crate::config::{Settings, IMAGE_SIZE};
use crate::models::GeneratedImage;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("upstream returned status {status}")]
    Status { status: u16, body: Value },
    #[error("upstream response is not JSON: {0}")]
    Decode(String),
    #[error("upstream response has no b64_json or url")]
    MissingImage { body: Value },
}

/// Anything that can turn a prompt into an image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<GeneratedImage, UpstreamError>;
}

pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
    response_format: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'a str>,
}

impl OpenAiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            base_url: settings.api_base.clone(),
            model: settings.model.clone(),
            response_format: settings.response_format.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<GeneratedImage, UpstreamError> {
        let url = self.endpoint();
        let request_body = ImageGenerationRequest {
            model: &self.model,
            prompt,
            size: IMAGE_SIZE,
            response_format: self.response_format.as_deref(),
        };

        info!("🔗 Requesting {} image from {}", self.model, url);

        let response = self.client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Upstream request failed: {}", e);
                UpstreamError::Transport(e.to_string())
            })?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        let response_text = response.text().await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        let parsed = serde_json::from_str::<Value>(&response_text);

        if !status.is_success() {
            error!("❌ API Error response: {}", preview(&response_text, 500));
            let body = parsed.unwrap_or(Value::String(response_text));
            return Err(UpstreamError::Status { status: status.as_u16(), body });
        }

        let body = parsed.map_err(|e| {
            error!("❌ Could not decode upstream body: {}", e);
            UpstreamError::Decode(preview(&response_text, 500))
        })?;

        match extract_image(&body) {
            Some(image) => {
                match &image {
                    GeneratedImage::Base64(b64) => info!("🖼️ Extracted base64 image: {}", preview(b64, 50)),
                    GeneratedImage::Url(url) => info!("🖼️ Extracted hosted image: {}", url),
                }
                Ok(image)
            }
            None => {
                let mut logged = body.clone();
                truncate_base64_in_json(&mut logged);
                warn!("⚠️ No image data found in API response: {}", logged);
                Err(UpstreamError::MissingImage { body })
            }
        }
    }
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct ImageDatum {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Only `data[0]` is read; inline base64 is preferred over a hosted URL.
pub fn extract_image(body: &Value) -> Option<GeneratedImage> {
    let first: ImageDatum = serde_json::from_value(body.pointer("/data/0")?.clone()).ok()?;
    match (first.b64_json, first.url) {
        (Some(b64), _) if !b64.is_empty() => Some(GeneratedImage::Base64(b64)),
        (_, Some(url)) if !url.is_empty() => Some(GeneratedImage::Url(url)),
        _ => None,
    }
}

/// Short, char-safe preview for log lines.
pub fn preview(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        format!("{}...[{} chars total]", s.chars().take(max).collect::<String>(), total)
    }
}

// Keeps multi-megabyte b64 payloads out of the logs.
fn truncate_base64_in_json(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if key == "b64_json" {
                    if let Value::String(s) = val {
                        if s.len() > 100 {
                            let short = preview(s, 50);
                            *val = Value::String(short);
                        }
                    }
                } else {
                    truncate_base64_in_json(val);
                }
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                truncate_base64_in_json(val);
            }
        }
        _ => {}
    }
}
