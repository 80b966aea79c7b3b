//! Public event listing and the authenticated save flow.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use stagepass_auth::CurrentUser;
use stagepass_core::events::{EventPage, ListEventsQuery};

use crate::state::AppState;

use super::error::AppError;

/// GET /events - one page of the upstream listing, served through the cache.
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<EventPage>, AppError> {
    query.validate()?;
    let page = state.events.list_events(&query).await?;
    Ok(Json(page))
}

/// POST /events/{event_id}/save - bookmark an upstream event.
///
/// The id is verified against the provider before anything is stored;
/// an unknown id surfaces as 404.
pub async fn save_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    state.events.save_event(&event_id, &user).await?;
    Ok(Json(json!({"message": "Event saved!"})))
}
