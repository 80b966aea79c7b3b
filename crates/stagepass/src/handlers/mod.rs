pub mod error;
pub mod events;
pub mod health;
pub mod root;
pub mod saved;

pub use error::AppError;
