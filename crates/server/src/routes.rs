//! Carrier API routes.
//!
//! All endpoints live under `/api/v1` and require the `X-API-Key` header:
//! - `POST /carriers/{carrier_id}/quote`                       — generate (or replay) a quote
//! - `POST /carriers/{carrier_id}/bind`                        — bind a quote into a policy
//! - `GET  /carriers/{carrier_id}/policies/{policy_id}`        — fetch a policy
//! - `POST /carriers/{carrier_id}/policies/{policy_id}/renew`  — renewal quote
//! - `POST /carriers/{carrier_id}/policies/{policy_id}/endorse`— add an endorsement
//! - `POST /carriers/{carrier_id}/policies/{policy_id}/cancel` — cancel with refund math
//! - `POST /carriers/{carrier_id}/policies/{policy_id}/certificate` — issue a certificate
//! - `GET  /carriers/{carrier_id}/health`                      — carrier service status
//! - `GET  /carriers/cache/stats`                              — quote cache statistics
//! - `POST /carriers/cache/clear`                              — drop the quote cache

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use chrono::Utc;
use secrecy::SecretString;
use serde_json::{json, Value};
use tracing::info;

use carriersim_core::domain::lifecycle::{
    BindRequest, BindResult, CancelRequest, CancellationResult, CertificateRequest,
    CertificateResult, EndorseRequest, EndorsementResult, RenewRequest, RenewalQuote,
};
use carriersim_core::domain::quote::QuoteResponse;
use carriersim_core::domain::request::QuoteRequest;
use carriersim_core::{carrier_config, DomainError, PolicyLifecycle, QuoteEngine};

use crate::auth;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QuoteEngine>,
    pub lifecycle: Arc<PolicyLifecycle>,
    pub api_key: SecretString,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/carriers/{carrier_id}/quote", post(generate_quote))
        .route("/api/v1/carriers/{carrier_id}/bind", post(bind_policy))
        .route("/api/v1/carriers/{carrier_id}/policies/{policy_id}", get(get_policy))
        .route("/api/v1/carriers/{carrier_id}/policies/{policy_id}/renew", post(renew_policy))
        .route("/api/v1/carriers/{carrier_id}/policies/{policy_id}/endorse", post(add_endorsement))
        .route("/api/v1/carriers/{carrier_id}/policies/{policy_id}/cancel", post(cancel_policy))
        .route(
            "/api/v1/carriers/{carrier_id}/policies/{policy_id}/certificate",
            post(generate_certificate),
        )
        .route("/api/v1/carriers/{carrier_id}/health", get(carrier_health))
        .route("/api/v1/carriers/cache/stats", get(cache_stats))
        .route("/api/v1/carriers/cache/clear", post(clear_cache))
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key))
        .with_state(state)
}

/// Domain failures mapped onto the uniform `{success:false, error:{..}}`
/// envelope. Expired quotes additionally surface when and which quote
/// expired.
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::QuoteExpired { .. } => StatusCode::BAD_REQUEST,
            DomainError::CarrierNotFound { .. }
            | DomainError::QuoteNotFound { .. }
            | DomainError::PolicyNotFound { .. } => StatusCode::NOT_FOUND,
        };

        let mut error = json!({
            "code": self.0.code(),
            "message": self.0.to_string(),
        });
        if let DomainError::QuoteExpired { quote_id, expired_at } = &self.0 {
            error["expired_at"] = json!(expired_at);
            error["quote_id"] = json!(quote_id);
        }

        (status, Json(json!({ "success": false, "error": error }))).into_response()
    }
}

async fn generate_quote(
    State(state): State<AppState>,
    Path(carrier_id): Path<String>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let response = state.engine.generate_quote(&carrier_id, &request)?;

    if response.cached {
        info!(
            event_name = "quote.cache_hit",
            carrier_id = %carrier_id,
            cache_key = response.cache_key.as_deref().unwrap_or_default(),
            "quote served from cache"
        );
    } else {
        info!(
            event_name = "quote.synthesized",
            carrier_id = %carrier_id,
            carrier_quote_id = %response.carrier_quote_id,
            coverages = response.quotes.len(),
            "fresh quote synthesized"
        );
    }

    Ok(Json(response))
}

async fn bind_policy(
    State(state): State<AppState>,
    Path(carrier_id): Path<String>,
    Json(request): Json<BindRequest>,
) -> Result<(StatusCode, Json<BindResult>), ApiError> {
    let result = state.lifecycle.bind(&carrier_id, &request)?;

    info!(
        event_name = "policy.bound",
        carrier_id = %carrier_id,
        quote_id = %request.quote_id,
        policy_id = %result.policy.policy_id,
        "quote bound into a policy"
    );

    Ok((StatusCode::CREATED, Json(result)))
}

async fn get_policy(
    State(state): State<AppState>,
    Path((carrier_id, policy_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let view = state.lifecycle.get_policy(&carrier_id, &policy_id)?;
    Ok(Json(json!({ "success": true, "policy": view })))
}

async fn renew_policy(
    State(state): State<AppState>,
    Path((carrier_id, policy_id)): Path<(String, String)>,
    Json(request): Json<RenewRequest>,
) -> Result<Json<RenewalQuote>, ApiError> {
    let result = state.lifecycle.renew(&carrier_id, &policy_id, &request)?;

    info!(
        event_name = "policy.renewal_quoted",
        carrier_id = %carrier_id,
        policy_id = %policy_id,
        renewal_quote_id = %result.renewal_quote_id,
        "renewal quote computed"
    );

    Ok(Json(result))
}

async fn add_endorsement(
    State(state): State<AppState>,
    Path((carrier_id, policy_id)): Path<(String, String)>,
    Json(request): Json<EndorseRequest>,
) -> Result<Json<EndorsementResult>, ApiError> {
    let result = state.lifecycle.endorse(&carrier_id, &policy_id, &request)?;

    info!(
        event_name = "policy.endorsed",
        carrier_id = %carrier_id,
        policy_id = %policy_id,
        endorsement_id = %result.endorsement.endorsement_id,
        "endorsement added"
    );

    Ok(Json(result))
}

async fn cancel_policy(
    State(state): State<AppState>,
    Path((carrier_id, policy_id)): Path<(String, String)>,
    Json(request): Json<CancelRequest>,
) -> Result<Json<CancellationResult>, ApiError> {
    let result = state.lifecycle.cancel(&carrier_id, &policy_id, &request)?;

    info!(
        event_name = "policy.cancellation_quoted",
        carrier_id = %carrier_id,
        policy_id = %policy_id,
        net_refund = result.refund.net_refund,
        "cancellation computed"
    );

    Ok(Json(result))
}

async fn generate_certificate(
    State(state): State<AppState>,
    Path((carrier_id, policy_id)): Path<(String, String)>,
    Json(request): Json<CertificateRequest>,
) -> Result<Json<CertificateResult>, ApiError> {
    let result = state.lifecycle.certificate(&carrier_id, &policy_id, &request)?;

    info!(
        event_name = "policy.certificate_issued",
        carrier_id = %carrier_id,
        policy_id = %policy_id,
        certificate_id = %result.certificate.certificate_id,
        "certificate issued"
    );

    Ok(Json(result))
}

async fn carrier_health(Path(carrier_id): Path<String>) -> Json<Value> {
    let Some(carrier) = carrier_config(&carrier_id) else {
        return Json(json!({
            "status": "unknown",
            "carrier_id": carrier_id,
            "message": "Carrier not found",
        }));
    };

    Json(json!({
        "status": "operational",
        "carrier_id": carrier_id,
        "carrier_name": carrier.name,
        "timestamp": Utc::now(),
        "services": {
            "quoting": "operational",
            "binding": "operational",
            "policy_management": "operational",
            "document_generation": "operational",
        },
        "supported_insurance_types": ["personal", "commercial"],
        "supported_coverages": {
            "personal": ["homeowners", "auto", "renters", "life", "umbrella"],
            "commercial": [
                "general_liability",
                "professional_liability",
                "cyber_liability",
                "workers_comp",
                "commercial_property",
                "business_auto",
                "umbrella",
                "directors_officers",
                "employment_practices",
                "crime",
                "media",
                "fiduciary",
                "employee_benefits",
            ],
        },
    }))
}

async fn cache_stats(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "stats": state.engine.cache_stats(),
        "timestamp": Utc::now(),
    }))
}

async fn clear_cache(State(state): State<AppState>) -> Json<Value> {
    state.engine.clear_cache();
    info!(event_name = "quote.cache_cleared", "quote cache cleared");

    Json(json!({
        "success": true,
        "message": "Cache cleared successfully",
        "timestamp": Utc::now(),
    }))
}
