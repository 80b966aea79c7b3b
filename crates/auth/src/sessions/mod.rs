//! Session storage backends.

mod inmemory;
#[cfg(feature = "sqlite-sessions")]
mod sqlite;

pub use inmemory::InMemorySessionStore;
#[cfg(feature = "sqlite-sessions")]
pub use sqlite::SqliteSessionStore;
