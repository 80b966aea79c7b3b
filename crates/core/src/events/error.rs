use thiserror::Error;

/// Errors for out-of-range event listing queries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventQueryError {
    #[error("page must be at least 1")]
    PageOutOfRange,
    #[error("size must be between 1 and {max}")]
    SizeOutOfRange { max: u32 },
}
