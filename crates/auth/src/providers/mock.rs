//! Mock OIDC provider for development and testing.
//!
//! Decodes base64-encoded JSON authorization codes instead of talking to a
//! real identity provider, so the full login flow can be exercised offline.

use async_trait::async_trait;
use base64::Engine;
use url::Url;

use stagepass_core::auth::{AuthError, OidcClaims, OidcProvider, OidcProviderClient, Result};

/// Mock OIDC provider.
///
/// Authorization URLs point straight back at the callback, and the
/// "authorization code" is a base64 JSON blob carrying the user info.
pub struct MockProvider {
    redirect_uri: Url,
}

impl MockProvider {
    /// Create a new MockProvider that redirects to the given callback URL.
    pub fn new(redirect_uri: Url) -> Self {
        Self { redirect_uri }
    }
}

#[async_trait]
impl OidcProviderClient for MockProvider {
    async fn authorization_url(&self, state: &str, _pkce_challenge: &str) -> Result<Url> {
        // Short-circuit the IdP hop entirely: send the browser to the
        // callback with a canned code.
        let code = base64::engine::general_purpose::STANDARD.encode(
            serde_json::json!({
                "email": "dev@example.com",
                "provider": "google",
                "sub": "mock-google-dev@example.com",
            })
            .to_string(),
        );

        let mut url = self.redirect_uri.clone();
        url.query_pairs_mut()
            .append_pair("code", &code)
            .append_pair("state", state);

        Ok(url)
    }

    async fn exchange_code(&self, code: &str, _pkce_verifier: &str) -> Result<OidcClaims> {
        // The mock code carries the user info inline
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(code)
            .map_err(|e| AuthError::CodeExchange(e.to_string()))?;

        let json: serde_json::Value =
            serde_json::from_slice(&decoded).map_err(|e| AuthError::CodeExchange(e.to_string()))?;

        match json["provider"].as_str() {
            Some("google") => {}
            _ => {
                return Err(AuthError::CodeExchange(
                    "Invalid provider in mock code".to_string(),
                ))
            }
        }

        Ok(OidcClaims {
            subject: json["sub"].as_str().unwrap_or("mock-user").to_string(),
            email: json["email"].as_str().map(String::from),
            provider: OidcProvider::Google,
        })
    }

    fn provider(&self) -> OidcProvider {
        OidcProvider::Google
    }
}
