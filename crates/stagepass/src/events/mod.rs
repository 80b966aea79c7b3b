//! The event cache manager and the service orchestrating it.

mod cache;
mod service;

pub use cache::EventCache;
pub use service::EventService;
