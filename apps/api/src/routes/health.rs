use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;
use crate::storage::ObjectStorage;

/// GET /health
/// Reports liveness plus which optional capabilities this instance has.
/// Always 200: a degraded upload signer or a missing parser token do not make
/// the service unhealthy.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let uploads = match &state.storage {
        ObjectStorage::Available(_) => "available",
        ObjectStorage::Unavailable { .. } => "unavailable",
    };

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "uploads": uploads,
        "resume_parsing": state.config.parser_token().is_some(),
    }))
}
