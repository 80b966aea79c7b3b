use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Freshness window for the event listing cache in seconds (default: 3600)
    pub cache_lifetime_seconds: u64,
    /// Timeout for upstream provider requests in seconds (default: 10)
    pub upstream_timeout_seconds: u64,
    /// Ticketmaster Discovery API key (default: empty)
    pub ticketmaster_api_key: String,
    /// Base URL of the Ticketmaster Discovery API
    pub ticketmaster_base_url: String,
    /// Path to SQLite database file (default: "stagepass.db")
    pub sqlite_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_LIFETIME_SECS` - Listing cache freshness window in seconds (default: 3600)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream request timeout in seconds (default: 10)
    /// - `TICKETMASTER_API_KEY` - Discovery API key (default: empty)
    /// - `TICKETMASTER_BASE_URL` - Discovery API base URL
    ///   (default: "https://app.ticketmaster.com/discovery/v2")
    /// - `SQLITE_PATH` - SQLite database path (default: "stagepass.db")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// Tests pass a closure instead of touching the process environment.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            cache_lifetime_seconds: get("CACHE_LIFETIME_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3_600),
            upstream_timeout_seconds: get("UPSTREAM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            ticketmaster_api_key: get("TICKETMASTER_API_KEY").unwrap_or_default(),
            ticketmaster_base_url: get("TICKETMASTER_BASE_URL")
                .unwrap_or_else(|| "https://app.ticketmaster.com/discovery/v2".to_string()),
            sqlite_path: get("SQLITE_PATH").unwrap_or_else(|| "stagepass.db".to_string()),
        }
    }

    /// Get the cache freshness window as a chrono Duration.
    ///
    /// Freshness comparisons are on `DateTime<Utc>` stamps, so this is a
    /// `chrono::Duration` rather than a std one.
    pub fn cache_lifetime(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache_lifetime_seconds as i64)
    }

    /// Get the upstream request timeout as a Duration.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }

    /// Connection URL for the sqlx-backed session store.
    ///
    /// Sessions live in the same SQLite file as the main schema;
    /// `mode=rwc` creates the file on first run.
    #[cfg(feature = "auth-sqlite")]
    pub fn sessions_database_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.sqlite_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
