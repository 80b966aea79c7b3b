//! Google OIDC identity exchange for stagepass.
//!
//! This crate provides:
//! - The login/callback/logout flow against Google (or a mock provider
//!   behind the `mock` feature)
//! - Session storage (in-memory by default, SQLite via `sqlite-sessions`)
//! - Axum extractors for resolving the current user from a session cookie

mod config;
mod error;
mod extractors;
mod handlers;
mod providers;
mod sessions;
mod state;

pub use config::{AuthConfig, ProviderConfig};
pub use error::AuthError;
pub use extractors::CurrentUser;
pub use handlers::auth_routes;
pub use providers::GoogleProvider;
#[cfg(feature = "mock")]
pub use providers::MockProvider;
pub use sessions::InMemorySessionStore;
#[cfg(feature = "sqlite-sessions")]
pub use sessions::SqliteSessionStore;
pub use state::AuthState;
