//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

-- Saved events table (per-user snapshots of upstream events)
CREATE TABLE IF NOT EXISTS saved_events (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    event_id TEXT NOT NULL,
    name TEXT,
    date TEXT,
    time TEXT,
    venue TEXT,
    city TEXT,
    url TEXT,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Cached events table (shared snapshot of the upstream listing,
-- position preserves upstream ordering across the delete/insert swap)
CREATE TABLE IF NOT EXISTS cached_events (
    id TEXT PRIMARY KEY,
    name TEXT,
    date TEXT,
    time TEXT,
    venue TEXT,
    city TEXT,
    url TEXT,
    last_updated TEXT NOT NULL,
    position INTEGER NOT NULL
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_saved_events_user_id ON saved_events(user_id);
CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (id, email, created_at)
VALUES (?1, ?2, ?3)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, email, created_at
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, email, created_at
FROM users
WHERE email = ?1
"#;

// Saved event queries
pub const INSERT_SAVED_EVENT: &str = r#"
INSERT INTO saved_events (id, user_id, event_id, name, date, time, venue, city, url)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

pub const SELECT_SAVED_EVENTS_BY_USER: &str = r#"
SELECT id, user_id, event_id, name, date, time, venue, city, url
FROM saved_events
WHERE user_id = ?1
ORDER BY rowid ASC
"#;

// Cached event queries
pub const SELECT_CACHED_EVENTS: &str = r#"
SELECT id, name, date, time, venue, city, url, last_updated
FROM cached_events
ORDER BY position ASC
"#;

pub const DELETE_CACHED_EVENTS: &str = r#"
DELETE FROM cached_events
"#;

pub const INSERT_CACHED_EVENT: &str = r#"
INSERT INTO cached_events (id, name, date, time, venue, city, url, last_updated, position)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;
