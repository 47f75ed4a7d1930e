pub mod config;
pub mod error;
pub mod models;
pub mod openai;
pub mod prompt;
pub mod routes;

use axum::{http::{header, HeaderValue}, routing::post, Router};
use tower_http::{catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::routes::{generate_sticker, method_not_allowed, preflight, AppState, GENERATE_STICKER_PATH};

/// Router for the sticker endpoint. Every response, errors included, carries the CORS headers.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            GENERATE_STICKER_PATH,
            post(generate_sticker).options(preflight).fallback(method_not_allowed),
        )
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        ))
        .with_state(state)
}
