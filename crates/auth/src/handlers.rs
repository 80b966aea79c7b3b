//! HTTP handlers for the identity exchange.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use openidconnect::PkceCodeChallenge;
use serde::Deserialize;
use serde_json::json;

use stagepass_core::auth::{
    calculate_expiry, generate_session_id, generate_state, validate_return_to, AuthError as CoreError,
    AuthFlowState, OidcClaims, OidcProvider, Session, SessionId,
};
use stagepass_core::events::User;

use crate::error::AuthError;
use crate::extractors::CurrentUser;
use crate::AuthState;

/// Query parameters for the OAuth callback.
#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    pub state: String,
}

/// Query parameters for the login endpoint.
#[derive(Deserialize, Default)]
pub struct LoginQuery {
    /// URL to redirect to after successful authentication.
    pub return_to: Option<String>,
}

/// Creates the auth router.
///
/// Routes:
/// - `GET /login` - Initiate the Google OIDC flow
/// - `GET /auth` - Identity-exchange callback
/// - `POST /logout` - End the current session
pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/login", get(login))
        .route("/auth", get(callback))
        .route("/logout", post(logout))
}

async fn login(
    State(state): State<AuthState>,
    Query(query): Query<LoginQuery>,
) -> Result<Redirect, AuthError> {
    let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
    let csrf_state = generate_state();

    // Validate return_to to prevent open redirects.
    let return_to = query
        .return_to
        .as_deref()
        .and_then(validate_return_to)
        .map(String::from);

    let flow = AuthFlowState {
        pkce_verifier: pkce_verifier.secret().to_string(),
        provider: OidcProvider::Google,
        created_at: Utc::now(),
        return_to,
    };
    state.sessions.store_auth_flow(&csrf_state, &flow).await?;

    let provider = state.get_provider(OidcProvider::Google)?;
    let auth_url = provider
        .authorization_url(&csrf_state, pkce_challenge.as_str())
        .await?;

    Ok(Redirect::to(auth_url.as_str()))
}

async fn callback(
    State(state): State<AuthState>,
    Query(params): Query<CallbackQuery>,
    jar: CookieJar,
) -> Result<(CookieJar, Response), AuthError> {
    // The state parameter is single-use; an unknown one is a replay or an
    // expired flow.
    let flow = state
        .sessions
        .take_auth_flow(&params.state)
        .await?
        .ok_or(AuthError::Core(CoreError::InvalidState))?;

    let provider = state.get_provider(flow.provider)?;
    let claims = provider
        .exchange_code(&params.code, &flow.pkce_verifier)
        .await?;

    let user = find_or_create_user(&state, &claims).await?;

    let now = Utc::now();
    let session = Session {
        id: generate_session_id(),
        user_id: user.id.to_string(),
        provider: claims.provider,
        created_at: now,
        expires_at: calculate_expiry(
            now,
            Duration::seconds(state.config.session_ttl.as_secs() as i64),
        ),
    };
    state.sessions.create_session(&session).await?;
    tracing::info!(user_id = %user.id, "session established");

    let cookie = Cookie::build((state.config.cookie_name.clone(), session.id.to_string()))
        .path("/")
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(
            state.config.session_ttl.as_secs() as i64
        ))
        .build();
    let jar = jar.add(cookie);

    // Browser flows that asked for a destination get redirected; API
    // clients get the confirmation body.
    let response = match flow.return_to {
        Some(return_to) => Redirect::to(&return_to).into_response(),
        None => Json(json!({"message": "Logged in", "user": user.email})).into_response(),
    };
    Ok((jar, response))
}

/// Looks up the user owning the verified email, creating one on first login.
async fn find_or_create_user(state: &AuthState, claims: &OidcClaims) -> Result<User, AuthError> {
    let email = claims
        .email
        .as_deref()
        .ok_or_else(|| AuthError::Core(CoreError::MissingClaim("email".to_string())))?;

    if let Some(user) = state
        .users
        .get_user_by_email(email)
        .await
        .map_err(|e| AuthError::Core(CoreError::Storage(e.to_string())))?
    {
        return Ok(user);
    }

    let user = User::new(email);
    state
        .users
        .create_user(&user)
        .await
        .map_err(|e| AuthError::Core(CoreError::Storage(e.to_string())))?;
    tracing::info!(user_id = %user.id, "created user on first login");

    Ok(user)
}

async fn logout(
    State(state): State<AuthState>,
    CurrentUser(_user): CurrentUser,
    jar: CookieJar,
) -> Result<CookieJar, AuthError> {
    if let Some(cookie) = jar.get(&state.config.cookie_name) {
        let session_id = SessionId::new(cookie.value().to_string());
        state.sessions.delete_session(&session_id).await?;
    }

    let jar = jar.remove(Cookie::from(state.config.cookie_name.clone()));
    Ok(jar)
}
