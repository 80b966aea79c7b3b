//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use uuid::Uuid;

use stagepass_core::events::{CachedEvent, SavedEvent, User};

/// Convert a SQLite row to a User.
///
/// Expected columns: id, email, created_at
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    let email: String = row.get(1)?;
    let created_at: String = row.get(2)?;

    Ok(User {
        id: parse_uuid(&id)?,
        email,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Convert a SQLite row to a SavedEvent.
///
/// Expected columns: id, user_id, event_id, name, date, time, venue, city, url
pub fn row_to_saved_event(row: &Row) -> rusqlite::Result<SavedEvent> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;

    Ok(SavedEvent {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        event_id: row.get(2)?,
        name: row.get(3)?,
        date: row.get(4)?,
        time: row.get(5)?,
        venue: row.get(6)?,
        city: row.get(7)?,
        url: row.get(8)?,
    })
}

/// Convert a SQLite row to a CachedEvent.
///
/// Expected columns: id, name, date, time, venue, city, url, last_updated
pub fn row_to_cached_event(row: &Row) -> rusqlite::Result<CachedEvent> {
    let last_updated: String = row.get(7)?;

    Ok(CachedEvent {
        id: row.get(0)?,
        name: row.get(1)?,
        date: row.get(2)?,
        time: row.get(3)?,
        venue: row.get(4)?,
        city: row.get(5)?,
        url: row.get(6)?,
        last_updated: parse_datetime(&last_updated)?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Parse a UUID from string.
fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
