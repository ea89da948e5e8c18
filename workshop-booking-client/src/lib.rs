//! Client side of the workshop booking service.
//!
//! [`store::WorkshopStore`] caches and ranks the workshops, the coordinator
//! methods on it run registrations and admin edits, and [`routes::navigate`]
//! decides where a navigation may go.

pub mod clock;
pub mod coordinator;
pub mod error;
pub mod guard;
pub mod http;
pub mod routes;
pub mod service;
pub mod session;
pub mod status;
pub mod store;
pub mod telemetry;
#[cfg(test)]
mod testing;

pub use workshop_booking_config::{get_config, Config};
pub use workshop_booking_ranking::{compute_view, models, WorkshopView};
