//! API request types for event operations.
//!
//! Shared between the server handlers and tests for type-safe query
//! handling. Pure data types with no I/O.

use serde::{Deserialize, Serialize};

use crate::serde::deserialize_optional_string;

use super::{EventFilters, EventQueryError};

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters for the public event listing.
///
/// The date-time bounds keep the provider's camelCase spelling on the wire.
/// Empty-string filter values deserialize to `None`, matching how absent
/// query parameters behave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEventsQuery {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub keyword: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<String>,
    #[serde(
        rename = "startDateTime",
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date_time: Option<String>,
    #[serde(
        rename = "endDateTime",
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date_time: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    /// Force a refetch from the provider even when the cache is fresh.
    #[serde(default)]
    pub refresh: bool,
}

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    20
}

impl Default for ListEventsQuery {
    fn default() -> Self {
        Self {
            keyword: None,
            city: None,
            start_date_time: None,
            end_date_time: None,
            page: default_page(),
            size: default_size(),
            refresh: false,
        }
    }
}

impl ListEventsQuery {
    /// Creates a query with the default paging.
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

    /// Sets the page to request.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Forces a cache refresh.
    pub fn with_refresh(mut self) -> Self {
        self.refresh = true;
        self
    }

    /// Checks the paging bounds: `page >= 1`, `1 <= size <= MAX_PAGE_SIZE`.
    pub fn validate(&self) -> Result<(), EventQueryError> {
        if self.page < 1 {
            return Err(EventQueryError::PageOutOfRange);
        }
        if self.size < 1 || self.size > MAX_PAGE_SIZE {
            return Err(EventQueryError::SizeOutOfRange { max: MAX_PAGE_SIZE });
        }
        Ok(())
    }

    /// The subset of the query forwarded to the upstream provider.
    pub fn filters(&self) -> EventFilters {
        EventFilters {
            keyword: self.keyword.clone(),
            city: self.city.clone(),
            start_date_time: self.start_date_time.clone(),
            end_date_time: self.end_date_time.clone(),
        }
    }
}
