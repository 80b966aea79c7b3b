//! Axum extractors for authentication.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;

use stagepass_core::auth::{is_session_expired, SessionId};
use stagepass_core::events::User;

use crate::AuthState;

/// Extractor for the authenticated user.
///
/// Rejects with 401 when there is no resolvable session, and with 404
/// when the session points at a user record that no longer exists.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(&auth_state.config.cookie_name)
            .ok_or((StatusCode::UNAUTHORIZED, "Not authenticated"))?;
        let session_id = SessionId::new(cookie.value().to_string());

        let session = auth_state
            .sessions
            .get_session(&session_id)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Session lookup failed"))?
            .ok_or((StatusCode::UNAUTHORIZED, "Session not found"))?;

        if is_session_expired(&session, Utc::now()) {
            return Err((StatusCode::UNAUTHORIZED, "Session expired"));
        }

        let user_id: uuid::Uuid = session
            .user_id
            .parse()
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Invalid user ID"))?;

        let user = auth_state
            .users
            .get_user(user_id)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "User lookup failed"))?
            .ok_or((StatusCode::NOT_FOUND, "User not found"))?;

        Ok(CurrentUser(user))
    }
}
