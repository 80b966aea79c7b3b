//! Upstream event provider: the Ticketmaster Discovery client and the
//! payload normalizer shared by its listing and single-event lookups.

mod normalize;
mod ticketmaster;

pub use normalize::{normalize_event, normalize_listing};
pub use ticketmaster::TicketmasterClient;
