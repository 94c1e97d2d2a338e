//! Shared-secret authentication: every route requires the configured key in
//! the `X-API-Key` header.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::warn;

use crate::routes::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);

    match presented.as_deref() {
        None => unauthorized("Missing API key. Include X-API-Key header."),
        Some(key) if key != state.api_key.expose_secret() => {
            warn!(event_name = "auth.invalid_key", "request presented an invalid API key");
            unauthorized("Invalid API key")
        }
        Some(_) => next.run(request).await,
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "error": { "code": "UNAUTHORIZED", "message": message }
        })),
    )
        .into_response()
}
