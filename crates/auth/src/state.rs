//! Shared state for the auth handlers and extractors.

use std::sync::Arc;

use axum::extract::FromRef;

use stagepass_core::auth::{OidcProvider, OidcProviderClient, SessionRepository};
use stagepass_core::storage::UserRepository;

use crate::config::AuthConfig;
use crate::error::AuthError;

#[cfg(not(feature = "mock"))]
use crate::providers::GoogleProvider;

#[cfg(feature = "mock")]
use crate::providers::MockProvider;

/// Shared state for auth handlers.
pub struct AuthState {
    pub sessions: Arc<dyn SessionRepository>,
    pub users: Arc<dyn UserRepository>,
    pub config: AuthConfig,
    #[cfg(not(feature = "mock"))]
    google: Option<Arc<GoogleProvider>>,
    #[cfg(feature = "mock")]
    google: Option<Arc<MockProvider>>,
}

impl AuthState {
    /// Creates a new AuthState, discovering Google's OIDC metadata when a
    /// Google client is configured.
    #[cfg(not(feature = "mock"))]
    pub async fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        let google = if let Some(ref cfg) = config.google {
            Some(Arc::new(GoogleProvider::new(cfg).await?))
        } else {
            None
        };

        Ok(Self {
            sessions,
            users,
            config,
            google,
        })
    }

    /// Creates a new AuthState with the mock provider for development.
    #[cfg(feature = "mock")]
    pub async fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        let google = if config.google.is_some() {
            let redirect_uri = config
                .base_url
                .join("/auth")
                .map_err(|e| AuthError::Config(e.to_string()))?;
            Some(Arc::new(MockProvider::new(redirect_uri)))
        } else {
            None
        };

        Ok(Self {
            sessions,
            users,
            config,
            google,
        })
    }

    /// Gets the client for the given OIDC provider.
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotConfigured` if the provider is not enabled.
    pub fn get_provider(
        &self,
        provider: OidcProvider,
    ) -> Result<&dyn OidcProviderClient, AuthError> {
        match provider {
            OidcProvider::Google => self
                .google
                .as_ref()
                .map(|p| p.as_ref() as &dyn OidcProviderClient)
                .ok_or_else(|| AuthError::ProviderNotConfigured("Google".to_string())),
        }
    }
}

impl Clone for AuthState {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            users: self.users.clone(),
            config: self.config.clone(),
            google: self.google.clone(),
        }
    }
}

/// Allows AuthState to be extracted from a parent state.
impl<S> FromRef<S> for AuthState
where
    S: AsRef<AuthState>,
{
    fn from_ref(state: &S) -> Self {
        state.as_ref().clone()
    }
}
