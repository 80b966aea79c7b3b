//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - basic liveness probe (immediate 200, no checks)
//! - `/healthz` - liveness plus a storage round trip

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

/// GET /livez - returns 200 as soon as the server accepts connections.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - storage reachability probe.
///
/// Reads the cached snapshot; a failing read means the record store is
/// unusable and the instance should be taken out of rotation.
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    match state.cached_events.get_cached_events().await {
        Ok(rows) => (
            StatusCode::OK,
            Json(json!({"status": "ok", "cached_events": rows.len()})),
        ),
        Err(err) => {
            tracing::error!(error = %err, "health check storage probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"status": "unavailable", "error": err.to_string()})),
            )
        }
    }
}
