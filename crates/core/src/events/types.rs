use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A provider event reduced to the fixed field set stagepass works with.
///
/// Listing and single-event lookups both normalize into this shape. The
/// provider omits nested structures freely, so every descriptive field is
/// optional; only the provider-assigned `id` is guaranteed. `date` and
/// `time` are passed through as the provider's local-date/local-time
/// strings rather than parsed, so odd upstream values survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub id: String,
    pub name: Option<String>,
    /// Local start date as reported upstream (e.g. `2025-05-01`).
    pub date: Option<String>,
    /// Local start time as reported upstream (e.g. `19:30:00`).
    pub time: Option<String>,
    /// Name of the first embedded venue, when present.
    pub venue: Option<String>,
    /// City of the first embedded venue, when present.
    pub city: Option<String>,
    pub url: Option<String>,
}

impl NormalizedEvent {
    /// Creates an event with only the provider id set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            date: None,
            time: None,
            venue: None,
            city: None,
            url: None,
        }
    }

    /// Sets the event name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the local start date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Sets the local start time.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Sets the venue name.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// Sets the venue city.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the provider URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// One row of the process-wide listing snapshot.
///
/// Rows belong to a single snapshot generation: they are replaced together
/// and never mutated individually. `last_updated` carries the stamp of the
/// refresh that produced the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedEvent {
    pub id: String,
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub url: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl CachedEvent {
    /// Builds a cache row from a normalized event, stamped at `last_updated`.
    pub fn from_normalized(event: NormalizedEvent, last_updated: DateTime<Utc>) -> Self {
        Self {
            id: event.id,
            name: event.name,
            date: event.date,
            time: event.time,
            venue: event.venue,
            city: event.city,
            url: event.url,
            last_updated,
        }
    }

    /// Drops the cache stamp, recovering the normalized view.
    pub fn into_normalized(self) -> NormalizedEvent {
        NormalizedEvent {
            id: self.id,
            name: self.name,
            date: self.date,
            time: self.time,
            venue: self.venue,
            city: self.city,
            url: self.url,
        }
    }
}

/// A user's bookmark of one upstream event.
///
/// Denormalized at save time: the fields are a snapshot of what upstream
/// reported then, not a live reference into the listing cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Provider-assigned event id.
    pub event_id: String,
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub url: Option<String>,
}

impl SavedEvent {
    /// Snapshots a normalized event as a bookmark owned by `user_id`.
    pub fn from_normalized(user_id: Uuid, event: NormalizedEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            event_id: event.id,
            name: event.name,
            date: event.date,
            time: event.time,
            venue: event.venue,
            city: event.city,
            url: event.url,
        }
    }

    /// Sets a specific ID (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// An account keyed by the email the identity provider verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user for the given email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }

    /// Sets a specific ID (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// Filters forwarded to the upstream listing query.
///
/// Absent fields are simply omitted from the upstream request. Values are
/// passed through verbatim; the provider does its own parsing of the
/// date-time bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilters {
    pub keyword: Option<String>,
    pub city: Option<String>,
    pub start_date_time: Option<String>,
    pub end_date_time: Option<String>,
}

impl EventFilters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the keyword filter.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Sets the city filter.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the inclusive lower date-time bound.
    pub fn with_start_date_time(mut self, start: impl Into<String>) -> Self {
        self.start_date_time = Some(start.into());
        self
    }

    /// Sets the inclusive upper date-time bound.
    pub fn with_end_date_time(mut self, end: impl Into<String>) -> Self {
        self.end_date_time = Some(end.into());
        self
    }

    /// Returns true if no filter is set.
    pub fn is_empty(&self) -> bool {
        self.keyword.is_none()
            && self.city.is_none()
            && self.start_date_time.is_none()
            && self.end_date_time.is_none()
    }
}

/// One page of listing results as served to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPage {
    pub page: u32,
    pub size: u32,
    pub events: Vec<NormalizedEvent>,
}

impl EventPage {
    /// Creates a page envelope.
    pub fn new(page: u32, size: u32, events: Vec<NormalizedEvent>) -> Self {
        Self { page, size, events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_event_builder() {
        let event = NormalizedEvent::new("tm-1")
            .with_name("Concert")
            .with_venue("Arena")
            .with_city("Austin");

        assert_eq!(event.id, "tm-1");
        assert_eq!(event.name, Some("Concert".to_string()));
        assert_eq!(event.venue, Some("Arena".to_string()));
        assert_eq!(event.city, Some("Austin".to_string()));
        assert_eq!(event.date, None);
        assert_eq!(event.url, None);
    }

    #[test]
    fn test_cached_event_round_trips_normalized_fields() {
        let event = NormalizedEvent::new("tm-2")
            .with_name("Ballet")
            .with_date("2025-05-01")
            .with_time("19:30:00");
        let stamp = Utc::now();

        let cached = CachedEvent::from_normalized(event.clone(), stamp);
        assert_eq!(cached.last_updated, stamp);
        assert_eq!(cached.into_normalized(), event);
    }

    #[test]
    fn test_saved_event_snapshots_fields() {
        let user_id = Uuid::new_v4();
        let event = NormalizedEvent::new("tm-3")
            .with_name("Standup")
            .with_url("https://example.com/tm-3");

        let saved = SavedEvent::from_normalized(user_id, event);

        assert_eq!(saved.user_id, user_id);
        assert_eq!(saved.event_id, "tm-3");
        assert_eq!(saved.name, Some("Standup".to_string()));
        assert_eq!(saved.url, Some("https://example.com/tm-3".to_string()));
        assert_eq!(saved.venue, None);
    }

    #[test]
    fn test_event_filters_is_empty() {
        assert!(EventFilters::new().is_empty());
        assert!(!EventFilters::new().with_city("Boston").is_empty());
        assert!(!EventFilters::new().with_keyword("rock").is_empty());
    }
}
