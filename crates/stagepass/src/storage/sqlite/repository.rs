//! SQLite repository implementation.
//!
//! Implements the repository traits from `stagepass_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use stagepass_core::events::{CachedEvent, SavedEvent, User};
use stagepass_core::storage::{
    CachedEventRepository, RepositoryError, Result, SavedEventRepository, UserRepository,
};

use super::conversions::{format_datetime, row_to_cached_event, row_to_saved_event, row_to_user};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for users, saved events, and
/// the cached event snapshot.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email_owned = email.to_string();
        let email_for_error = email.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_USER_BY_EMAIL)
                    .map_err(wrap_err)?;
                match stmt.query_row([&email_owned], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", email_for_error))
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let id = user.id.to_string();
        let email = user.email.clone();
        let created_at = format_datetime(&user.created_at);
        let user_id = user.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_USER, rusqlite::params![id, email, created_at])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", user_id))?;

        Ok(())
    }
}

// ============================================================================
// SavedEventRepository implementation
// ============================================================================

#[async_trait]
impl SavedEventRepository for SqliteRepository {
    async fn create_saved_event(&self, event: &SavedEvent) -> Result<()> {
        let id = event.id.to_string();
        let user_id = event.user_id.to_string();
        let event_id = event.event_id.clone();
        let name = event.name.clone();
        let date = event.date.clone();
        let time = event.time.clone();
        let venue = event.venue.clone();
        let city = event.city.clone();
        let url = event.url.clone();
        let saved_id = event.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_SAVED_EVENT,
                    rusqlite::params![id, user_id, event_id, name, date, time, venue, city, url],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "SavedEvent", saved_id))?;

        Ok(())
    }

    async fn get_saved_events_for_user(&self, user_id: Uuid) -> Result<Vec<SavedEvent>> {
        let user_id_str = user_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_SAVED_EVENTS_BY_USER)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&user_id_str], row_to_saved_event)
                    .map_err(wrap_err)?;

                let mut events = Vec::new();
                for row_result in rows {
                    events.push(row_result.map_err(wrap_err)?);
                }
                Ok(events)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// CachedEventRepository implementation
// ============================================================================

#[async_trait]
impl CachedEventRepository for SqliteRepository {
    async fn get_cached_events(&self) -> Result<Vec<CachedEvent>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_CACHED_EVENTS)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([], row_to_cached_event)
                    .map_err(wrap_err)?;

                let mut events = Vec::new();
                for row_result in rows {
                    events.push(row_result.map_err(wrap_err)?);
                }
                Ok(events)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn replace_cached_events(&self, events: &[CachedEvent]) -> Result<()> {
        let events = events.to_vec();

        self.conn
            .call(move |conn| {
                // Delete and insert inside one transaction so readers only
                // ever observe a complete snapshot.
                let tx = conn.transaction().map_err(wrap_err)?;
                tx.execute(schema::DELETE_CACHED_EVENTS, [])
                    .map_err(wrap_err)?;
                for (position, event) in events.iter().enumerate() {
                    tx.execute(
                        schema::INSERT_CACHED_EVENT,
                        rusqlite::params![
                            event.id,
                            event.name,
                            event.date,
                            event.time,
                            event.venue,
                            event.city,
                            event.url,
                            format_datetime(&event.last_updated),
                            position as i64,
                        ],
                    )
                    .map_err(wrap_err)?;
                }
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "CachedEvent"))
    }
}
