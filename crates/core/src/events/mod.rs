mod error;
mod policy;
mod requests;
mod types;

pub use error::EventQueryError;
pub use policy::{slice_page, snapshot_is_fresh, upstream_page_index};
pub use requests::{ListEventsQuery, MAX_PAGE_SIZE};
pub use types::{CachedEvent, EventFilters, EventPage, NormalizedEvent, SavedEvent, User};
