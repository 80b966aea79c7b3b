//! OIDC provider implementations.

mod google;
#[cfg(feature = "mock")]
mod mock;

pub use google::GoogleProvider;
#[cfg(feature = "mock")]
pub use mock::MockProvider;
