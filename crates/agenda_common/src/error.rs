// --- File: crates/agenda_common/src/error.rs ---
use thiserror::Error;

/// The error every HTTP handler ends up returning.
///
/// Domain crates keep their own error enums and implement
/// `From<DomainError> for AgendaError` to pick the status.
#[derive(Error, Debug)]
pub enum AgendaError {
    /// Malformed request data (dates, times, month indices)
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The request was well formed but breaks a booking rule
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFoundError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Maps an error onto an HTTP status code.
pub trait HttpStatusCode {
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for AgendaError {
    fn status_code(&self) -> u16 {
        match self {
            AgendaError::ParseError(_) => 400,
            AgendaError::ConfigError(_) | AgendaError::InternalError(_) => 500,
            AgendaError::ValidationError(_) => 422,
            AgendaError::NotFoundError(_) => 404,
        }
    }
}
