// File: crates/agenda_booking/src/doc.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::logic::{
    BookingConfirmationResponse, BookingRequest, CalendarCell, CalendarView, MonthRef,
    PlanNotFoundView, PlanView, SlotsView,
};
use crate::outbound::{BankTransferInstructions, ContactLinks};
use crate::wizard::{ContactForm, PaymentMethod, WizardStep};

/// OpenAPI documentation for the booking API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_plans_handler,
        handlers::get_plan_handler,
        handlers::get_calendar_handler,
        handlers::get_slots_handler,
        handlers::create_booking_handler,
        handlers::get_contact_handler,
    ),
    components(
        schemas(
            PlanView,
            PlanNotFoundView,
            CalendarView,
            CalendarCell,
            MonthRef,
            SlotsView,
            BookingRequest,
            BookingConfirmationResponse,
            BankTransferInstructions,
            ContactLinks,
            ContactForm,
            PaymentMethod,
            WizardStep,
        )
    ),
    tags(
        (name = "Booking", description = "Plan catalog, availability and session booking")
    )
)]
pub struct BookingApiDoc;
