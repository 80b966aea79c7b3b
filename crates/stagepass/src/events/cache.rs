//! The event cache manager.
//!
//! Owns the caching policy for the shared listing snapshot: decide whether
//! the stored generation is still servable, and mediate the wholesale
//! refresh when it is not. The policy arithmetic itself lives in
//! `stagepass_core::events`; this type wires it to storage and the
//! upstream provider.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use stagepass_core::events::{
    slice_page, snapshot_is_fresh, CachedEvent, EventFilters, EventPage, NormalizedEvent,
};
use stagepass_core::storage::CachedEventRepository;
use stagepass_core::upstream::EventsProvider;

/// Freshness-windowed cache over the upstream event listing.
///
/// Refreshes are serialized through one async mutex: waiters re-check
/// freshness after acquiring it, so a burst of requests against a stale
/// cache coalesces into a single upstream call. The upstream request runs
/// while holding only that mutex, never a storage transaction; the swap
/// itself is the repository's single transactional `replace_cached_events`.
pub struct EventCache {
    repo: Arc<dyn CachedEventRepository>,
    provider: Arc<dyn EventsProvider>,
    freshness_window: Duration,
    refresh_lock: Mutex<()>,
}

impl EventCache {
    pub fn new(
        repo: Arc<dyn CachedEventRepository>,
        provider: Arc<dyn EventsProvider>,
        freshness_window: Duration,
    ) -> Self {
        Self {
            repo,
            provider,
            freshness_window,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Serves one page of events, refreshing the snapshot when needed.
    ///
    /// A cache hit slices the stored snapshot in its stored order; the
    /// request's filters are deliberately ignored on this path (filters
    /// only shape the upstream query that populates the cache). A miss or
    /// `force_refresh` fetches the requested page upstream, swaps the
    /// snapshot wholesale, and returns the upstream page directly.
    ///
    /// The two paths give "page N" different meanings: hit-paging slices
    /// whatever query last filled the cache, miss-paging is the provider's
    /// own pagination of this query.
    pub async fn get_page(
        &self,
        filters: &EventFilters,
        page: u32,
        size: u32,
        force_refresh: bool,
    ) -> Result<EventPage> {
        if !force_refresh {
            let cached = self.repo.get_cached_events().await?;
            if snapshot_is_fresh(&cached, Utc::now(), self.freshness_window) {
                tracing::debug!(rows = cached.len(), page, size, "serving events from cache");
                return Ok(page_from_snapshot(cached, page, size));
            }
        }

        let _guard = self.refresh_lock.lock().await;

        // A refresh may have completed while we waited for the lock;
        // serve its result instead of hitting upstream again.
        if !force_refresh {
            let cached = self.repo.get_cached_events().await?;
            if snapshot_is_fresh(&cached, Utc::now(), self.freshness_window) {
                tracing::debug!(rows = cached.len(), "coalesced into a concurrent refresh");
                return Ok(page_from_snapshot(cached, page, size));
            }
        }

        tracing::info!(page, size, ?filters, "refreshing event cache from upstream");
        let events = self.provider.list_events(filters, page, size).await?;

        let now = Utc::now();
        let snapshot: Vec<CachedEvent> = events
            .iter()
            .cloned()
            .map(|ev| CachedEvent::from_normalized(ev, now))
            .collect();
        self.repo.replace_cached_events(&snapshot).await?;
        tracing::info!(rows = snapshot.len(), "event cache repopulated");

        // Already the requested upstream page; no re-slicing.
        Ok(EventPage::new(page, size, events))
    }
}

fn page_from_snapshot(cached: Vec<CachedEvent>, page: u32, size: u32) -> EventPage {
    let events: Vec<NormalizedEvent> = slice_page(&cached, page, size)
        .iter()
        .cloned()
        .map(CachedEvent::into_normalized)
        .collect();
    EventPage::new(page, size, events)
}
