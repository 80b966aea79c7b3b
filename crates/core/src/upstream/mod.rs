mod error;
mod http_mapping;
mod traits;

pub use error::UpstreamError;
pub use http_mapping::upstream_error_to_status_code;
pub use traits::{EventsProvider, Result};
