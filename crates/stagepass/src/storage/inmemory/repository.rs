//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use stagepass_core::events::{CachedEvent, SavedEvent, User};
use stagepass_core::storage::{
    CachedEventRepository, RepositoryError, Result, SavedEventRepository, UserRepository,
};

/// In-memory storage backend for testing.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
/// Saved events and the cached snapshot are kept as Vecs because both are
/// served back in insertion order.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    saved_events: Arc<RwLock<Vec<SavedEvent>>>,
    cached_events: Arc<RwLock<Vec<CachedEvent>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            saved_events: Arc::new(RwLock::new(Vec::new())),
            cached_events: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.id.to_string(),
            });
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.email.clone(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(())
    }
}

#[async_trait]
impl SavedEventRepository for InMemoryRepository {
    async fn create_saved_event(&self, event: &SavedEvent) -> Result<()> {
        let mut saved = self.saved_events.write().await;
        if saved.iter().any(|e| e.id == event.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "SavedEvent",
                id: event.id.to_string(),
            });
        }
        saved.push(event.clone());
        Ok(())
    }

    async fn get_saved_events_for_user(&self, user_id: Uuid) -> Result<Vec<SavedEvent>> {
        let saved = self.saved_events.read().await;
        Ok(saved
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CachedEventRepository for InMemoryRepository {
    async fn get_cached_events(&self) -> Result<Vec<CachedEvent>> {
        let cached = self.cached_events.read().await;
        Ok(cached.clone())
    }

    async fn replace_cached_events(&self, events: &[CachedEvent]) -> Result<()> {
        let mut cached = self.cached_events.write().await;
        *cached = events.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stagepass_core::events::NormalizedEvent;

    fn event(id: &str) -> NormalizedEvent {
        NormalizedEvent::new(id).with_name("Show")
    }

    // ==================== User Tests ====================

    #[tokio::test]
    async fn test_user_create_and_get() {
        let repo = InMemoryRepository::new();
        let user = User::new("alice@example.com");

        repo.create_user(&user).await.unwrap();

        let retrieved = repo.get_user(user.id).await.unwrap();
        assert_eq!(retrieved, Some(user));
    }

    #[tokio::test]
    async fn test_user_get_nonexistent() {
        let repo = InMemoryRepository::new();
        let result = repo.get_user(Uuid::new_v4()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_user_get_by_email() {
        let repo = InMemoryRepository::new();
        let user = User::new("alice@example.com");

        repo.create_user(&user).await.unwrap();

        let retrieved = repo.get_user_by_email("alice@example.com").await.unwrap();
        assert_eq!(retrieved, Some(user));
    }

    #[tokio::test]
    async fn test_user_get_by_email_nonexistent() {
        let repo = InMemoryRepository::new();
        let result = repo
            .get_user_by_email("nonexistent@example.com")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_user_duplicate_email_rejected() {
        let repo = InMemoryRepository::new();
        repo.create_user(&User::new("alice@example.com"))
            .await
            .unwrap();

        let result = repo.create_user(&User::new("alice@example.com")).await;
        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { .. })
        ));
    }

    // ==================== Saved Event Tests ====================

    #[tokio::test]
    async fn test_saved_event_create_and_list() {
        let repo = InMemoryRepository::new();
        let user_id = Uuid::new_v4();
        let saved = SavedEvent::from_normalized(user_id, event("tm-1"));

        repo.create_saved_event(&saved).await.unwrap();

        let events = repo.get_saved_events_for_user(user_id).await.unwrap();
        assert_eq!(events, vec![saved]);
    }

    #[tokio::test]
    async fn test_saved_events_keep_insertion_order() {
        let repo = InMemoryRepository::new();
        let user_id = Uuid::new_v4();

        for id in ["tm-3", "tm-1", "tm-2"] {
            repo.create_saved_event(&SavedEvent::from_normalized(user_id, event(id)))
                .await
                .unwrap();
        }

        let events = repo.get_saved_events_for_user(user_id).await.unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.event_id.as_str()).collect();
        assert_eq!(ids, vec!["tm-3", "tm-1", "tm-2"]);
    }

    #[tokio::test]
    async fn test_saved_events_scoped_to_user() {
        let repo = InMemoryRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repo.create_saved_event(&SavedEvent::from_normalized(alice, event("tm-1")))
            .await
            .unwrap();

        let events = repo.get_saved_events_for_user(bob).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_saved_event_duplicate_id_rejected() {
        let repo = InMemoryRepository::new();
        let saved = SavedEvent::from_normalized(Uuid::new_v4(), event("tm-1"));

        repo.create_saved_event(&saved).await.unwrap();
        let result = repo.create_saved_event(&saved).await;
        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { .. })
        ));
    }

    // ==================== Cached Event Tests ====================

    #[tokio::test]
    async fn test_cached_events_empty_by_default() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_cached_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_cached_events_swaps_whole_snapshot() {
        let repo = InMemoryRepository::new();
        let now = Utc::now();

        let first: Vec<CachedEvent> = ["a", "b"]
            .iter()
            .map(|id| CachedEvent::from_normalized(event(id), now))
            .collect();
        repo.replace_cached_events(&first).await.unwrap();
        assert_eq!(repo.get_cached_events().await.unwrap(), first);

        let second: Vec<CachedEvent> = ["c"]
            .iter()
            .map(|id| CachedEvent::from_normalized(event(id), now))
            .collect();
        repo.replace_cached_events(&second).await.unwrap();
        assert_eq!(repo.get_cached_events().await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let repo = InMemoryRepository::new();
        let clone = repo.clone();

        let user = User::new("alice@example.com");
        repo.create_user(&user).await.unwrap();

        let retrieved = clone.get_user(user.id).await.unwrap();
        assert_eq!(retrieved, Some(user));
    }
}
