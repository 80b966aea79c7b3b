//! Normalization of Ticketmaster Discovery payloads.
//!
//! The Discovery API nests fields several levels deep and omits whole
//! subtrees freely (events without venues, venues without cities). Both the
//! listing endpoint and the single-event endpoint describe events with the
//! same shape, so one extraction function serves both; a missing nested
//! field becomes `None` rather than an error.

use serde_json::Value;

use stagepass_core::events::NormalizedEvent;
use stagepass_core::upstream::UpstreamError;

/// Extracts a normalized event from one Discovery event object.
///
/// `fallback_id` covers the single-event endpoint, where the path parameter
/// is authoritative when the body omits `id`. A listing object with no `id`
/// at all cannot be cached or bookmarked, so it is malformed.
pub fn normalize_event(
    event: &Value,
    fallback_id: Option<&str>,
) -> Result<NormalizedEvent, UpstreamError> {
    let id = event
        .get("id")
        .and_then(Value::as_str)
        .or(fallback_id)
        .ok_or_else(|| UpstreamError::Malformed("event object has no id".to_string()))?;

    let venue = event
        .get("_embedded")
        .and_then(|e| e.get("venues"))
        .and_then(|v| v.get(0));

    Ok(NormalizedEvent {
        id: id.to_string(),
        name: string_field(event, &["name"]),
        date: string_field(event, &["dates", "start", "localDate"]),
        time: string_field(event, &["dates", "start", "localTime"]),
        venue: venue.and_then(|v| string_field(v, &["name"])),
        city: venue.and_then(|v| string_field(v, &["city", "name"])),
        url: string_field(event, &["url"]),
    })
}

/// Extracts every event from a Discovery listing body, in document order.
///
/// A body without `_embedded.events` is a valid empty listing; the API
/// drops the whole `_embedded` subtree when nothing matched.
pub fn normalize_listing(body: &Value) -> Result<Vec<NormalizedEvent>, UpstreamError> {
    let Some(events) = body.get("_embedded").and_then(|e| e.get("events")) else {
        return Ok(Vec::new());
    };

    let events = events.as_array().ok_or_else(|| {
        UpstreamError::Malformed("_embedded.events is not an array".to_string())
    })?;

    events.iter().map(|ev| normalize_event(ev, None)).collect()
}

fn string_field(value: &Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_event() -> Value {
        json!({
            "id": "tm-1",
            "name": "Concert",
            "url": "https://tm.example/tm-1",
            "dates": {"start": {"localDate": "2025-05-01", "localTime": "19:30:00"}},
            "_embedded": {
                "venues": [
                    {"name": "The Fillmore", "city": {"name": "San Francisco"}},
                    {"name": "Second Venue", "city": {"name": "Oakland"}}
                ]
            }
        })
    }

    #[test]
    fn test_normalize_extracts_all_fields() {
        let event = normalize_event(&full_event(), None).unwrap();

        assert_eq!(event.id, "tm-1");
        assert_eq!(event.name, Some("Concert".to_string()));
        assert_eq!(event.date, Some("2025-05-01".to_string()));
        assert_eq!(event.time, Some("19:30:00".to_string()));
        assert_eq!(event.venue, Some("The Fillmore".to_string()));
        assert_eq!(event.city, Some("San Francisco".to_string()));
        assert_eq!(event.url, Some("https://tm.example/tm-1".to_string()));
    }

    #[test]
    fn test_normalize_uses_first_venue_only() {
        let event = normalize_event(&full_event(), None).unwrap();
        assert_eq!(event.venue, Some("The Fillmore".to_string()));
        assert_eq!(event.city, Some("San Francisco".to_string()));
    }

    #[test]
    fn test_missing_venues_become_none() {
        let body = json!({
            "id": "tm-2",
            "name": "Concert",
            "dates": {"start": {"localDate": "2025-05-01"}}
        });

        let event = normalize_event(&body, None).unwrap();
        assert_eq!(event.venue, None);
        assert_eq!(event.city, None);
        assert_eq!(event.time, None);
    }

    #[test]
    fn test_empty_venues_array_becomes_none() {
        let body = json!({"id": "tm-3", "_embedded": {"venues": []}});

        let event = normalize_event(&body, None).unwrap();
        assert_eq!(event.venue, None);
        assert_eq!(event.city, None);
    }

    #[test]
    fn test_venue_without_city_keeps_venue_name() {
        let body = json!({
            "id": "tm-4",
            "_embedded": {"venues": [{"name": "Warehouse"}]}
        });

        let event = normalize_event(&body, None).unwrap();
        assert_eq!(event.venue, Some("Warehouse".to_string()));
        assert_eq!(event.city, None);
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let body = json!({"name": "Concert"});
        let result = normalize_event(&body, None);
        assert!(matches!(result, Err(UpstreamError::Malformed(_))));
    }

    #[test]
    fn test_fallback_id_covers_missing_body_id() {
        let body = json!({"name": "Concert"});
        let event = normalize_event(&body, Some("tm-5")).unwrap();
        assert_eq!(event.id, "tm-5");
        assert_eq!(event.name, Some("Concert".to_string()));
    }

    #[test]
    fn test_body_id_wins_over_fallback() {
        let event = normalize_event(&full_event(), Some("other")).unwrap();
        assert_eq!(event.id, "tm-1");
    }

    #[test]
    fn test_listing_preserves_document_order() {
        let body = json!({
            "_embedded": {
                "events": [
                    {"id": "z"},
                    {"id": "a"},
                    {"id": "m"}
                ]
            }
        });

        let events = normalize_listing(&body).unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_listing_without_embedded_is_empty() {
        let events = normalize_listing(&json!({"page": {"totalElements": 0}})).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_listing_with_non_array_events_is_malformed() {
        let body = json!({"_embedded": {"events": "nope"}});
        assert!(matches!(
            normalize_listing(&body),
            Err(UpstreamError::Malformed(_))
        ));
    }
}
