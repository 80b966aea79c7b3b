//! Shared application state.
//!
//! Every collaborator is constructed once at startup and injected here as
//! a trait object; handlers receive a clone of this struct and nothing
//! reaches for ambient globals. Storage backends are selected at compile
//! time via feature flags.

use std::sync::Arc;

use anyhow::Result;
use reqwest::Url;

use stagepass_auth::{AuthConfig, AuthState};
use stagepass_core::auth::SessionRepository;
use stagepass_core::storage::{CachedEventRepository, SavedEventRepository, UserRepository};
use stagepass_core::upstream::EventsProvider;

use crate::config::Config;
use crate::events::{EventCache, EventService};
use crate::upstream::TicketmasterClient;

/// Shared application state, cloned into each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Event listing, caching, and save operations.
    pub events: Arc<EventService>,
    /// User accounts, shared with the auth layer.
    pub users: Arc<dyn UserRepository>,
    /// Cached snapshot access for the health probe.
    pub cached_events: Arc<dyn CachedEventRepository>,
    /// Session and identity-exchange state.
    pub auth: AuthState,
}

impl AppState {
    /// Builds the state from configuration with the compiled-in storage
    /// backend and the real Ticketmaster client.
    #[cfg(feature = "sqlite")]
    pub async fn from_config(config: Config, auth_config: AuthConfig) -> Result<Self> {
        let repo = Arc::new(crate::storage::SqliteRepository::new(&config.sqlite_path).await?);
        let provider = ticketmaster_provider(&config)?;
        let sessions = session_store(&config).await?;
        Self::with_parts(repo.clone(), repo.clone(), repo, provider, sessions, &config, auth_config)
            .await
    }

    /// Builds the state from configuration with the compiled-in storage
    /// backend and the real Ticketmaster client.
    #[cfg(feature = "inmemory")]
    pub async fn from_config(config: Config, auth_config: AuthConfig) -> Result<Self> {
        let repo = Arc::new(crate::storage::InMemoryRepository::new());
        let provider = ticketmaster_provider(&config)?;
        let sessions = session_store(&config).await?;
        Self::with_parts(repo.clone(), repo.clone(), repo, provider, sessions, &config, auth_config)
            .await
    }

    /// Wires the state from explicit collaborators.
    ///
    /// This is the single assembly point; `from_config` and the tests both
    /// go through it with their own backends.
    pub async fn with_parts(
        users: Arc<dyn UserRepository>,
        saved_events: Arc<dyn SavedEventRepository>,
        cached_events: Arc<dyn CachedEventRepository>,
        provider: Arc<dyn EventsProvider>,
        sessions: Arc<dyn SessionRepository>,
        config: &Config,
        auth_config: AuthConfig,
    ) -> Result<Self> {
        let auth = AuthState::new(sessions, users.clone(), auth_config).await?;

        let cache = EventCache::new(
            cached_events.clone(),
            provider.clone(),
            config.cache_lifetime(),
        );
        let events = Arc::new(EventService::new(cache, provider, saved_events));

        Ok(Self {
            events,
            users,
            cached_events,
            auth,
        })
    }
}

fn ticketmaster_provider(config: &Config) -> Result<Arc<dyn EventsProvider>> {
    let base_url = Url::parse(&config.ticketmaster_base_url)?;
    let client = TicketmasterClient::new(
        base_url,
        config.ticketmaster_api_key.clone(),
        config.upstream_timeout(),
    )?;
    Ok(Arc::new(client))
}

#[cfg(feature = "auth-sqlite")]
async fn session_store(config: &Config) -> Result<Arc<dyn SessionRepository>> {
    let pool = sqlx::SqlitePool::connect(&config.sessions_database_url()).await?;
    let store = stagepass_auth::SqliteSessionStore::new(pool);
    store.migrate().await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "auth-sqlite"))]
async fn session_store(_config: &Config) -> Result<Arc<dyn SessionRepository>> {
    Ok(Arc::new(stagepass_auth::InMemorySessionStore::new()))
}

/// Lets the auth extractors pull their state out of the app state.
impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}
