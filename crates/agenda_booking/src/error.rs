// --- File: crates/agenda_booking/src/error.rs ---
use agenda_common::AgendaError;
use thiserror::Error;

use crate::calendar::CalendarError;
use crate::wizard::WizardError;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Plan '{0}' not found")]
    UnknownPlan(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
}

impl From<BookingError> for AgendaError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::UnknownPlan(_) => AgendaError::NotFoundError(err.to_string()),
            BookingError::InvalidConfig(msg) => AgendaError::ConfigError(msg),
            BookingError::InvalidInput(msg) => AgendaError::ParseError(msg),
            BookingError::Calendar(e) => AgendaError::ParseError(e.to_string()),
            BookingError::Wizard(e) => AgendaError::ValidationError(e.to_string()),
        }
    }
}
