//! The authenticated saved-events listing.

use axum::{extract::State, Json};
use serde::Serialize;

use stagepass_auth::CurrentUser;
use stagepass_core::events::SavedEvent;

use crate::state::AppState;

use super::error::AppError;

/// Wire shape for one saved event.
///
/// The local row id and owner id stay internal; callers identify events
/// by the provider-assigned id they saved.
#[derive(Debug, Serialize)]
pub struct SavedEventDto {
    pub event_id: String,
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub url: Option<String>,
}

impl From<SavedEvent> for SavedEventDto {
    fn from(event: SavedEvent) -> Self {
        Self {
            event_id: event.event_id,
            name: event.name,
            date: event.date,
            time: event.time,
            venue: event.venue,
            city: event.city,
            url: event.url,
        }
    }
}

/// GET /my/events - everything the current user has saved, in save order.
pub async fn my_events(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<SavedEventDto>>, AppError> {
    let events = state.events.list_saved_events(&user).await?;
    Ok(Json(events.into_iter().map(SavedEventDto::from).collect()))
}
