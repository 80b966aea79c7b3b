use async_trait::async_trait;

use crate::events::{EventFilters, NormalizedEvent};

use super::UpstreamError;

/// Result type for upstream provider operations.
pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Abstraction over the external ticketing provider.
#[async_trait]
pub trait EventsProvider: Send + Sync {
    /// Fetches one page of listings matching `filters`, in the provider's
    /// own ordering.
    ///
    /// `page` is 1-based on this boundary; implementations own the
    /// translation to whatever indexing the wire protocol uses.
    async fn list_events(
        &self,
        filters: &EventFilters,
        page: u32,
        size: u32,
    ) -> Result<Vec<NormalizedEvent>>;

    /// Fetches a single event by provider id. Fails with `NotFound` when
    /// the provider reports no such event.
    async fn get_event(&self, event_id: &str) -> Result<NormalizedEvent>;
}
