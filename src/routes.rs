use axum::{body::Bytes, extract::{rejection::BytesRejection, State}, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    config::Settings,
    error::ApiError,
    models::{StickerMeta, StickerRequest, StickerResponse},
    openai::{preview, ImageGenerator},
    prompt::build_sticker_prompt,
};

pub const GENERATE_STICKER_PATH: &str = "/api/generate-sticker";

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub generator: Arc<dyn ImageGenerator>,
}

impl AppState {
    pub fn new(settings: Settings, generator: Arc<dyn ImageGenerator>) -> Self {
        Self { settings: Arc::new(settings), generator }
    }
}

/// Browsers send this before the cross-origin POST; CORS headers are added by the router.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn generate_sticker(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<StickerResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    async move {
        let body = body?;
        let request = parse_body(&body)?;
        let sticker = request.validate().ok_or(ApiError::MissingFields)?;
        let api_key = state.settings.api_key.as_deref().ok_or(ApiError::MissingCredential)?;

        info!("🚀 Generating sticker: shape={} material={}", sticker.shape, sticker.material);
        let prompt = build_sticker_prompt(&sticker);
        info!("🎯 Prompt: {}", preview(&prompt, 120));

        let image = state.generator.generate(api_key, &prompt).await?;
        info!("✅ Sticker generated for shape={} material={}", sticker.shape, sticker.material);

        Ok::<_, ApiError>(Json(StickerResponse {
            image: image.into(),
            meta: StickerMeta { shape: sticker.shape, material: sticker.material },
            prompt: state.settings.echo_prompt.then_some(prompt),
        }))
    }
    .instrument(info_span!("generate_sticker", %request_id))
    .await
}

// An empty body reads as `{}` so it fails on the missing fields, not on parsing.
fn parse_body(body: &[u8]) -> Result<StickerRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StickerRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_parses_as_empty_request() {
        let request = parse_body(b"").unwrap();
        assert!(request.shape.is_none() && request.material.is_none());
        assert!(parse_body(b" \n").is_ok());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let request = parse_body(br#"{"shape":"star","material":"paper","quantity":50}"#).unwrap();
        assert_eq!(request.shape.as_deref(), Some("star"));
        assert_eq!(request.material.as_deref(), Some("paper"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(parse_body(b"{shape:"), Err(ApiError::InvalidBody(_))));
        assert!(matches!(parse_body(br#"{"shape": 5}"#), Err(ApiError::InvalidBody(_))));
        assert!(matches!(parse_body(b"[]"), Err(ApiError::InvalidBody(_))));
    }

    #[test]
    fn null_fields_count_as_absent() {
        let request = parse_body(br#"{"shape":null,"material":"vinyl"}"#).unwrap();
        assert!(request.validate().is_none());
    }
}
