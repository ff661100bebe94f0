// --- File: crates/agenda_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP error mapping
pub mod logging; // Logging setup

pub use error::{AgendaError, HttpStatusCode};

pub use logging::{init, init_with_level, log_result};
