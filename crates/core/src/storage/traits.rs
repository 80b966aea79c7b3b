use async_trait::async_trait;
use uuid::Uuid;

use crate::events::{CachedEvent, SavedEvent, User};

use super::Result;

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Creates a new user. Emails are unique; a duplicate fails with
    /// `AlreadyExists`.
    async fn create_user(&self, user: &User) -> Result<()>;
}

/// Repository for per-user saved events.
#[async_trait]
pub trait SavedEventRepository: Send + Sync {
    /// Persists a new saved event.
    async fn create_saved_event(&self, event: &SavedEvent) -> Result<()>;

    /// Gets all events saved by a user, in storage order.
    async fn get_saved_events_for_user(&self, user_id: Uuid) -> Result<Vec<SavedEvent>>;
}

/// Repository for the shared listing cache.
///
/// The cache is one snapshot generation at a time: the only write is a
/// wholesale swap, so readers can never observe a half-populated set.
#[async_trait]
pub trait CachedEventRepository: Send + Sync {
    /// Gets the full cached snapshot in stored order.
    async fn get_cached_events(&self) -> Result<Vec<CachedEvent>>;

    /// Atomically replaces the snapshot with `events`, preserving their
    /// order. Delete-all plus bulk insert in a single transaction.
    async fn replace_cached_events(&self, events: &[CachedEvent]) -> Result<()>;
}
