use std::time::Duration;

use url::Url;

use crate::error::AuthError;

/// Configuration for the Google OIDC client.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: Url,
}

/// Complete auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Google client settings; `None` disables the login flow entirely.
    pub google: Option<ProviderConfig>,
    pub session_ttl: Duration,
    pub base_url: Url,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AUTH_BASE_URL`: Base URL of this service (default: `http://localhost:3000`)
    /// - `GOOGLE_CLIENT_ID`: Google OAuth client ID (optional, enables Google auth)
    /// - `GOOGLE_CLIENT_SECRET`: Google OAuth client secret (required if Google enabled)
    /// - `OAUTH_REDIRECT_URL`: Callback URL registered with the provider
    ///   (default: `{AUTH_BASE_URL}/auth`)
    /// - `SESSION_TTL_DAYS`: Session TTL in days (default: 7)
    /// - `COOKIE_SECURE`: Whether to set the secure flag on cookies (default: true)
    pub fn from_env() -> Result<Self, AuthError> {
        let base_url: Url = std::env::var("AUTH_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .parse()
            .map_err(|e| AuthError::Config(format!("AUTH_BASE_URL is not a valid URL: {e}")))?;

        let google = match std::env::var("GOOGLE_CLIENT_ID") {
            Ok(client_id) => {
                let client_secret = std::env::var("GOOGLE_CLIENT_SECRET").map_err(|_| {
                    AuthError::Config(
                        "GOOGLE_CLIENT_SECRET is required when GOOGLE_CLIENT_ID is set"
                            .to_string(),
                    )
                })?;
                let redirect_uri = match std::env::var("OAUTH_REDIRECT_URL") {
                    Ok(url) => url.parse().map_err(|e| {
                        AuthError::Config(format!("OAUTH_REDIRECT_URL is not a valid URL: {e}"))
                    })?,
                    Err(_) => base_url
                        .join("/auth")
                        .map_err(|e| AuthError::Config(e.to_string()))?,
                };
                Some(ProviderConfig {
                    client_id,
                    client_secret: Some(client_secret),
                    redirect_uri,
                })
            }
            Err(_) => None,
        };

        let session_ttl = std::env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|days| Duration::from_secs(days * 24 * 60 * 60))
            .unwrap_or(Duration::from_secs(7 * 24 * 60 * 60));

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        Ok(Self {
            google,
            session_ttl,
            base_url,
            cookie_name: "session".to_string(),
            cookie_secure,
        })
    }
}
