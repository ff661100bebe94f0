// --- File: crates/agenda_booking/src/lib.rs ---
pub mod availability;
pub mod calendar;
#[cfg(test)]
mod calendar_proptest;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod format;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod outbound;
pub mod plans;
pub mod routes;
pub mod wizard;

pub use availability::{AvailabilityProvider, Clock, FixedClock, SystemClock, TimeSlot, WeeklyTemplate};
pub use error::BookingError;
pub use handlers::BookingState;
pub use routes::{routes, routes_with_state};
