// --- File: crates/agenda_booking/src/routes.rs ---

use crate::error::BookingError;
use crate::handlers::{
    create_booking_handler, get_calendar_handler, get_contact_handler, get_plan_handler,
    get_slots_handler, list_plans_handler, BookingState,
};
use agenda_config::AppConfig;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all booking routes.
/// Fails when the configured plans, time slots or time zone are invalid.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, BookingError> {
    let state = BookingState::from_config(config)?;
    Ok(routes_with_state(Arc::new(state)))
}

/// Same routes over an already built state.
pub fn routes_with_state(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/plans", get(list_plans_handler))
        .route("/plans/{plan_id}", get(get_plan_handler))
        .route("/calendar", get(get_calendar_handler))
        .route("/slots", get(get_slots_handler))
        .route("/bookings", post(create_booking_handler))
        .route("/contact", get(get_contact_handler))
        .with_state(state)
}
