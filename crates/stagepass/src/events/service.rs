//! Orchestration entry points for event operations.

use std::sync::Arc;

use anyhow::Result;

use stagepass_core::events::{EventPage, ListEventsQuery, SavedEvent, User};
use stagepass_core::storage::SavedEventRepository;
use stagepass_core::upstream::EventsProvider;

use super::EventCache;

/// Composes the cache manager, the upstream provider, and saved-event
/// storage behind the operations the handlers call.
pub struct EventService {
    cache: EventCache,
    provider: Arc<dyn EventsProvider>,
    saved_events: Arc<dyn SavedEventRepository>,
}

impl EventService {
    pub fn new(
        cache: EventCache,
        provider: Arc<dyn EventsProvider>,
        saved_events: Arc<dyn SavedEventRepository>,
    ) -> Self {
        Self {
            cache,
            provider,
            saved_events,
        }
    }

    /// One page of the event listing, served from cache or upstream.
    pub async fn list_events(&self, query: &ListEventsQuery) -> Result<EventPage> {
        self.cache
            .get_page(&query.filters(), query.page, query.size, query.refresh)
            .await
    }

    /// Bookmarks an upstream event for `user`.
    ///
    /// The event is looked up fresh rather than trusting the listing
    /// cache, and stored as a denormalized snapshot. An upstream miss
    /// propagates before anything is written.
    pub async fn save_event(&self, event_id: &str, user: &User) -> Result<SavedEvent> {
        let event = self.provider.get_event(event_id).await?;
        let saved = SavedEvent::from_normalized(user.id, event);
        self.saved_events.create_saved_event(&saved).await?;
        tracing::info!(user_id = %user.id, event_id, "event saved");
        Ok(saved)
    }

    /// Everything `user` has saved, in storage order.
    pub async fn list_saved_events(&self, user: &User) -> Result<Vec<SavedEvent>> {
        Ok(self.saved_events.get_saved_events_for_user(user.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use stagepass_core::events::{CachedEvent, EventFilters, NormalizedEvent};
    use stagepass_core::storage::{self, CachedEventRepository};
    use stagepass_core::upstream::{self, UpstreamError};

    #[derive(Default)]
    struct FakeStore {
        saved: RwLock<Vec<SavedEvent>>,
        cached: RwLock<Vec<CachedEvent>>,
    }

    #[async_trait]
    impl SavedEventRepository for FakeStore {
        async fn create_saved_event(&self, event: &SavedEvent) -> storage::Result<()> {
            self.saved.write().await.push(event.clone());
            Ok(())
        }

        async fn get_saved_events_for_user(
            &self,
            user_id: Uuid,
        ) -> storage::Result<Vec<SavedEvent>> {
            Ok(self
                .saved
                .read()
                .await
                .iter()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl CachedEventRepository for FakeStore {
        async fn get_cached_events(&self) -> storage::Result<Vec<CachedEvent>> {
            Ok(self.cached.read().await.clone())
        }

        async fn replace_cached_events(&self, events: &[CachedEvent]) -> storage::Result<()> {
            *self.cached.write().await = events.to_vec();
            Ok(())
        }
    }

    struct FakeProvider {
        event: Option<NormalizedEvent>,
        get_calls: AtomicUsize,
        list_calls: AtomicUsize,
    }

    #[async_trait]
    impl EventsProvider for FakeProvider {
        async fn list_events(
            &self,
            _filters: &EventFilters,
            _page: u32,
            _size: u32,
        ) -> upstream::Result<Vec<NormalizedEvent>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.event.clone().into_iter().collect())
        }

        async fn get_event(&self, _event_id: &str) -> upstream::Result<NormalizedEvent> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.event.clone().ok_or(UpstreamError::NotFound)
        }
    }

    fn service_with(
        event: Option<NormalizedEvent>,
    ) -> (EventService, Arc<FakeStore>, Arc<FakeProvider>) {
        let store = Arc::new(FakeStore::default());
        let provider = Arc::new(FakeProvider {
            event,
            get_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        });
        let cache = EventCache::new(store.clone(), provider.clone(), Duration::hours(1));
        (
            EventService::new(cache, provider.clone(), store.clone()),
            store,
            provider,
        )
    }

    #[tokio::test]
    async fn test_save_event_stores_denormalized_snapshot() {
        let upstream_event = NormalizedEvent::new("tm-1")
            .with_name("Concert")
            .with_date("2025-05-01")
            .with_venue("Arena")
            .with_city("Austin");
        let (service, store, _) = service_with(Some(upstream_event));
        let user = User::new("alice@example.com");

        let saved = service.save_event("tm-1", &user).await.unwrap();

        assert_eq!(saved.user_id, user.id);
        assert_eq!(saved.event_id, "tm-1");
        assert_eq!(saved.name, Some("Concert".to_string()));

        let rows = store.saved.read().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].venue, Some("Arena".to_string()));
    }

    #[tokio::test]
    async fn test_save_event_without_venue_stores_nulls() {
        let upstream_event = NormalizedEvent::new("evt123")
            .with_name("Concert")
            .with_date("2025-05-01");
        let (service, store, _) = service_with(Some(upstream_event));
        let user = User::new("alice@example.com");

        service.save_event("evt123", &user).await.unwrap();

        let rows = store.saved.read().await;
        assert_eq!(rows[0].venue, None);
        assert_eq!(rows[0].city, None);
        assert_eq!(rows[0].date, Some("2025-05-01".to_string()));
    }

    #[tokio::test]
    async fn test_save_unknown_event_fails_and_writes_nothing() {
        let (service, store, _) = service_with(None);
        let user = User::new("alice@example.com");

        let err = service.save_event("missing", &user).await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<UpstreamError>(),
            Some(&UpstreamError::NotFound)
        );
        assert!(store.saved.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_saved_events_only_returns_own_rows() {
        let (service, store, _) = service_with(Some(NormalizedEvent::new("tm-1")));
        let alice = User::new("alice@example.com");
        let bob = User::new("bob@example.com");

        service.save_event("tm-1", &alice).await.unwrap();
        service.save_event("tm-1", &bob).await.unwrap();

        let mine = service.list_saved_events(&alice).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_id, alice.id);
        assert_eq!(store.saved.read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_query_forces_upstream_call() {
        let (service, _store, provider) = service_with(Some(NormalizedEvent::new("tm-1")));

        // First call populates the cache; the fresh snapshot would satisfy
        // a plain query, but refresh=true must still go upstream.
        service.list_events(&ListEventsQuery::new()).await.unwrap();
        service
            .list_events(&ListEventsQuery::new().with_refresh())
            .await
            .unwrap();

        assert_eq!(provider.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_list_events_delegates_to_cache() {
        let (service, store, _) = service_with(Some(NormalizedEvent::new("tm-1")));

        let page = service
            .list_events(&ListEventsQuery::new())
            .await
            .unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.size, 20);
        assert_eq!(page.events.len(), 1);
        assert_eq!(store.cached.read().await.len(), 1);
    }
}
