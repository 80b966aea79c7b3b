use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use stagepass_core::events::EventQueryError;
use stagepass_core::storage::{repository_error_to_status_code, RepositoryError};
use stagepass_core::upstream::{upstream_error_to_status_code, UpstreamError};

/// Application error type that wraps `anyhow::Error`.
///
/// Handlers return `Result<_, AppError>` and use `?` freely; the typed
/// errors from the core crate survive inside the `anyhow::Error` and are
/// downcast here to pick the response status. Anything unrecognized is a
/// plain 500.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(upstream) = self.0.downcast_ref::<UpstreamError>() {
            status_from_u16(upstream_error_to_status_code(upstream))
        } else if let Some(repo) = self.0.downcast_ref::<RepositoryError>() {
            status_from_u16(repository_error_to_status_code(repo))
        } else if self.0.downcast_ref::<EventQueryError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}

fn status_from_u16(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
