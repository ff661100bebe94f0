// File: crates/agenda_booking/src/handlers.rs
use crate::availability::{AvailabilityProvider, Clock, SystemClock, WeeklyTemplate};
use crate::error::BookingError;
use crate::logic::{
    calendar_view, parse_date, process_booking, resolve_month, slots_view,
    BookingConfirmationResponse, BookingRequest, CalendarQuery, CalendarView, PlanNotFoundView,
    PlanView, SlotsQuery, SlotsView,
};
use crate::outbound::{ContactLinks, OutboundChannels};
use crate::plans::PlanCatalog;
use agenda_common::AgendaError;
use agenda_config::AppConfig;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

// Shared, read-only state for the booking handlers
#[derive(Clone)]
pub struct BookingState {
    pub catalog: PlanCatalog,
    pub availability: Arc<dyn AvailabilityProvider>,
    pub clock: Arc<dyn Clock>,
    pub channels: OutboundChannels,
}

impl BookingState {
    /// Builds the state from configuration, validating plans, slots and time zone.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, BookingError> {
        let catalog = PlanCatalog::from_config(&config.plans)?;
        let availability = WeeklyTemplate::from_config(&config.availability)?;
        let clock = SystemClock::from_config(&config.availability)?;
        let channels = OutboundChannels::new(config.contact.clone(), config.bank_transfer.clone());

        Ok(Self {
            catalog,
            availability: Arc::new(availability),
            clock: Arc::new(clock),
            channels,
        })
    }

    /// Replaces the clock, e.g. to pin "today".
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the availability source.
    pub fn with_availability(mut self, availability: Arc<dyn AvailabilityProvider>) -> Self {
        self.availability = availability;
        self
    }
}

fn plan_not_found(plan_id: &str) -> Response {
    warn!("Unknown plan requested: '{}'", plan_id);
    (StatusCode::NOT_FOUND, Json(PlanNotFoundView::new(plan_id))).into_response()
}

fn booking_error_response(err: BookingError) -> Response {
    match err {
        BookingError::UnknownPlan(plan_id) => plan_not_found(&plan_id),
        other => {
            info!("Booking request rejected: {}", other);
            AgendaError::from(other).into_response()
        }
    }
}

/// Handler listing every plan.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/plans",
    responses(
        (status = 200, description = "Plan catalog", body = [PlanView])
    ),
    tag = "Booking"
))]
pub async fn list_plans_handler(State(state): State<Arc<BookingState>>) -> Json<Vec<PlanView>> {
    Json(state.catalog.all().iter().map(PlanView::from).collect())
}

/// Handler for a single plan, as selected by the booking page route.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/plans/{plan_id}",
    params(("plan_id" = String, Path, description = "Plan identifier", example = "pack-4")),
    responses(
        (status = 200, description = "The plan", body = PlanView),
        (status = 404, description = "Plan not found", body = PlanNotFoundView)
    ),
    tag = "Booking"
))]
pub async fn get_plan_handler(
    State(state): State<Arc<BookingState>>,
    Path(plan_id): Path<String>,
) -> Result<Json<PlanView>, Response> {
    state
        .catalog
        .get(&plan_id)
        .map(|plan| Json(PlanView::from(plan)))
        .map_err(booking_error_response)
}

/// Handler for the month grid shown in the date picker.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Month grid with selectable days", body = CalendarView),
        (status = 400, description = "Invalid year or month")
    ),
    tag = "Booking"
))]
pub async fn get_calendar_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarView>, Response> {
    let today = state.clock.today();
    let month = resolve_month(&query, today).map_err(booking_error_response)?;
    Ok(Json(calendar_view(month, state.availability.as_ref(), today)))
}

/// Handler for the hours offered on a date.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/slots",
    params(SlotsQuery),
    responses(
        (status = 200, description = "Offered hours", body = SlotsView),
        (status = 400, description = "Invalid date format"),
        (status = 422, description = "Date is in the past or not a working day")
    ),
    tag = "Booking"
))]
pub async fn get_slots_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsView>, Response> {
    let today = state.clock.today();
    let date = parse_date(&query.date).map_err(booking_error_response)?;
    slots_view(date, state.availability.as_ref(), today)
        .map(Json)
        .map_err(booking_error_response)
}

/// Handler that runs the booking wizard to confirmation.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/bookings",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking confirmed", body = BookingConfirmationResponse),
        (status = 400, description = "Malformed date or time"),
        (status = 404, description = "Plan not found", body = PlanNotFoundView),
        (status = 422, description = "Slot not selectable, or payment/contact incomplete")
    ),
    tag = "Booking"
))]
pub async fn create_booking_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<BookingConfirmationResponse>, Response> {
    let today = state.clock.today();
    let confirmation = process_booking(
        &state.catalog,
        state.availability.clone(),
        &state.channels,
        today,
        payload,
    )
    .map_err(booking_error_response)?;

    Ok(Json(BookingConfirmationResponse::from(&confirmation)))
}

/// Handler for the landing page's contact links.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/contact",
    responses(
        (status = 200, description = "Contact links", body = ContactLinks)
    ),
    tag = "Booking"
))]
pub async fn get_contact_handler(State(state): State<Arc<BookingState>>) -> Json<ContactLinks> {
    Json(state.channels.contact_links())
}
