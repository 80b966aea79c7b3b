//! Functional core for stagepass.
//!
//! Pure domain types and policy for the event cache, plus the trait
//! boundaries the outer crates implement (storage repositories, the
//! upstream events provider, OIDC sessions). Nothing in this crate
//! performs I/O.

#[cfg(feature = "auth")]
pub mod auth;
pub mod events;
pub mod serde;
pub mod storage;
pub mod upstream;
