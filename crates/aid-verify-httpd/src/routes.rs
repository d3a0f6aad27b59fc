//! Axum routes for the verification service.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use aid_verify::{VerificationDepth, VerificationResult};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to verify an agent delegation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// The delegated agent identifier.
    pub agent_aid: String,
    /// The OOR holder claimed as the agent's delegator.
    pub oor_holder_aid: String,
    /// Optional pipeline depth override for this request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<VerificationDepth>,
}

/// Service descriptor returned from `/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    /// Depth used when a request does not name one.
    pub default_depth: VerificationDepth,
    pub endpoints: Vec<String>,
}

/// Liveness payload returned from `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Structured error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code.
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Service information.
async fn index_handler(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "aid-verify".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        default_depth: state.verifier.config().depth,
        endpoints: vec![
            "GET /".to_string(),
            "GET /health".to_string(),
            "POST /verify/agent-delegation".to_string(),
        ],
    })
}

/// Liveness check. Does not touch the store.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Verify an agent delegation and return the structured verdict.
///
/// Both outcomes of a completed run (valid or not) are `200` with the
/// serialized result; `503` means the store could not be read and no
/// verdict exists.
async fn verify_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerificationResult>, (StatusCode, Json<ErrorResponse>)> {
    let depth = request.depth.unwrap_or(state.verifier.config().depth);

    tracing::info!(
        agent_aid = %request.agent_aid,
        oor_holder_aid = %request.oor_holder_aid,
        depth = %depth,
        "verification requested"
    );

    match state
        .verifier
        .verify_at_depth(&request.agent_aid, &request.oor_holder_aid, depth)
        .await
    {
        Ok(result) => {
            tracing::info!(valid = result.valid, "verification completed");
            Ok(Json(result))
        }
        Err(err) => {
            tracing::warn!(error = %err, "verification could not be performed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("STORE_UNAVAILABLE", err.to_string())),
            ))
        }
    }
}

// ============================================================================
// Router Construction
// ============================================================================

/// Create the Axum router for the verification service.
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/verify/agent-delegation", post(verify_handler))
        .with_state(state)
}
