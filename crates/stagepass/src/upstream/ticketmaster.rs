//! Reqwest-backed client for the Ticketmaster Discovery v2 API.
//!
//! Owns transport details only: query serialization, the 1-based to
//! 0-based page translation, timeout and status mapping, and handing the
//! JSON body to the shared normalizer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use stagepass_core::events::{upstream_page_index, EventFilters, NormalizedEvent};
use stagepass_core::upstream::{EventsProvider, Result, UpstreamError};

use super::normalize::{normalize_event, normalize_listing};

/// Client for the Discovery v2 events endpoints.
pub struct TicketmasterClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl TicketmasterClient {
    /// Builds a client with an explicit request timeout.
    ///
    /// `base_url` is the Discovery v2 root, e.g.
    /// `https://app.ticketmaster.com/discovery/v2`. The API key is sent as
    /// the `apikey` query parameter on every request.
    pub fn new(base_url: Url, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_transport_error)?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        // Url::join treats a path without a trailing slash as a file and
        // would drop the last segment of the base.
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::Malformed("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(path);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<(StatusCode, Value)> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        Ok((status, body))
    }
}

#[async_trait]
impl EventsProvider for TicketmasterClient {
    async fn list_events(
        &self,
        filters: &EventFilters,
        page: u32,
        size: u32,
    ) -> Result<Vec<NormalizedEvent>> {
        let mut url = self.endpoint("events.json")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("apikey", &self.api_key);
            // Discovery pages are 0-based; our API is 1-based.
            query.append_pair("page", &upstream_page_index(page).to_string());
            query.append_pair("size", &size.to_string());
            if let Some(keyword) = &filters.keyword {
                query.append_pair("keyword", keyword);
            }
            if let Some(city) = &filters.city {
                query.append_pair("city", city);
            }
            if let Some(start) = &filters.start_date_time {
                query.append_pair("startDateTime", start);
            }
            if let Some(end) = &filters.end_date_time {
                query.append_pair("endDateTime", end);
            }
        }

        let (status, body) = self.get_json(url).await?;
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Ticketmaster listing failed");
            return Err(UpstreamError::Unavailable {
                status: status.as_u16(),
            });
        }

        normalize_listing(&body)
    }

    async fn get_event(&self, event_id: &str) -> Result<NormalizedEvent> {
        let mut url = self.endpoint(&format!("events/{event_id}.json"))?;
        url.query_pairs_mut().append_pair("apikey", &self.api_key);

        let (status, body) = self.get_json(url).await?;
        if !status.is_success() {
            // Discovery answers 404 for unknown ids but also 401/400 for
            // malformed ones; the save flow treats them all as a miss.
            tracing::warn!(
                status = status.as_u16(),
                event_id,
                "Ticketmaster event lookup failed"
            );
            return Err(UpstreamError::NotFound);
        }

        normalize_event(&body, Some(event_id))
    }
}

fn map_transport_error(err: reqwest::Error) -> UpstreamError {
    UpstreamError::Transport {
        message: err.to_string(),
        timed_out: err.is_timeout(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> TicketmasterClient {
        let base = Url::parse(&server.uri()).unwrap();
        TicketmasterClient::new(base, "test-key".to_string(), Duration::from_secs(2)).unwrap()
    }

    fn listing_body() -> Value {
        json!({
            "_embedded": {
                "events": [
                    {
                        "id": "tm-1",
                        "name": "Concert",
                        "dates": {"start": {"localDate": "2025-05-01"}},
                        "_embedded": {"venues": [{"name": "Arena", "city": {"name": "Austin"}}]}
                    },
                    {"id": "tm-2", "name": "Ballet"}
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_list_events_sends_zero_based_page_and_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events.json"))
            .and(query_param("apikey", "test-key"))
            .and(query_param("page", "2"))
            .and(query_param("size", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let events = client
            .list_events(&EventFilters::new(), 3, 20)
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "tm-1");
        assert_eq!(events[0].venue, Some("Arena".to_string()));
        assert_eq!(events[1].venue, None);
    }

    #[tokio::test]
    async fn test_list_events_forwards_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events.json"))
            .and(query_param("keyword", "rock"))
            .and(query_param("city", "Boston"))
            .and(query_param("startDateTime", "2025-05-01T00:00:00Z"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let filters = EventFilters::new()
            .with_keyword("rock")
            .with_city("Boston")
            .with_start_date_time("2025-05-01T00:00:00Z");

        let events = client.list_events(&filters, 1, 20).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_listing_non_success_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events.json"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"fault": "oops"})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.list_events(&EventFilters::new(), 1, 20).await;

        assert_eq!(result, Err(UpstreamError::Unavailable { status: 500 }));
    }

    #[tokio::test]
    async fn test_get_event_normalizes_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/tm-9.json"))
            .and(query_param("apikey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Standup",
                "dates": {"start": {"localDate": "2025-06-01"}}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let event = client.get_event("tm-9").await.unwrap();

        assert_eq!(event.id, "tm-9");
        assert_eq!(event.name, Some("Standup".to_string()));
        assert_eq!(event.venue, None);
    }

    #[tokio::test]
    async fn test_get_event_non_success_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/missing.json"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"errors": []})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(
            client.get_event("missing").await,
            Err(UpstreamError::NotFound)
        );
    }
}
