// --- File: crates/agenda_booking/src/logic.rs ---
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::availability::{AvailabilityProvider, TimeSlot};
use crate::calendar::{CalendarMonth, DAY_NAMES};
use crate::error::BookingError;
use crate::format::{date_label, format_clp};
use crate::outbound::{BankTransferInstructions, OutboundChannels};
use crate::plans::{Plan, PlanCatalog};
use crate::wizard::{
    BookingWizard, Confirmation, ConfirmationOutcome, ContactForm, PaymentMethod, WizardError,
    WizardStep,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

// --- Data Structures ---

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PlanView {
    #[cfg_attr(feature = "openapi", schema(example = "pack-4"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = "Pack 4 Sesiones"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = 108000))]
    pub price: i64,
    #[cfg_attr(feature = "openapi", schema(example = "$108.000"))]
    pub price_label: String,
    pub currency: String,
    pub sessions: u32,
    pub per_session_price: i64,
    /// Only set for packages.
    #[cfg_attr(feature = "openapi", schema(example = "$27.000"))]
    pub per_session_label: Option<String>,
    pub description: String,
}

impl From<&Plan> for PlanView {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id.clone(),
            name: plan.name.clone(),
            price: plan.price,
            price_label: format_clp(plan.price),
            currency: "CLP".to_string(),
            sessions: plan.sessions,
            per_session_price: plan.per_session_price,
            per_session_label: plan
                .is_package()
                .then(|| format_clp(plan.per_session_price)),
            description: plan.description.clone(),
        }
    }
}

/// Body returned for an unknown plan identifier.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PlanNotFoundView {
    #[cfg_attr(feature = "openapi", schema(example = "Plan no encontrado"))]
    pub title: String,
    pub plan_id: String,
    #[cfg_attr(feature = "openapi", schema(example = "/"))]
    pub back_link: String,
    pub back_label: String,
}

impl PlanNotFoundView {
    pub fn new(plan_id: &str) -> Self {
        Self {
            title: "Plan no encontrado".to_string(),
            plan_id: plan_id.to_string(),
            back_link: "/".to_string(),
            back_label: "← Volver al inicio".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CalendarQuery {
    /// Four-digit year. Defaults to the current year.
    #[cfg_attr(feature = "openapi", schema(example = 2026))]
    pub year: Option<i32>,
    /// Zero-indexed month (0 = January). Defaults to the current month.
    #[cfg_attr(feature = "openapi", schema(example = 9))]
    pub month: Option<u32>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl From<CalendarMonth> for MonthRef {
    fn from(month: CalendarMonth) -> Self {
        Self {
            year: month.year(),
            month: month.month(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CalendarCell {
    /// `None` for alignment placeholders.
    #[cfg_attr(feature = "openapi", schema(example = "2026-10-28"))]
    pub date: Option<String>,
    pub day: Option<u32>,
    pub selectable: bool,
    pub today: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CalendarView {
    pub year: i32,
    /// Zero-indexed.
    pub month: u32,
    #[cfg_attr(feature = "openapi", schema(example = "Octubre 2026"))]
    pub title: String,
    pub can_go_previous: bool,
    pub previous: Option<MonthRef>,
    pub next: MonthRef,
    pub weekday_headers: Vec<String>,
    pub weeks: Vec<Vec<CalendarCell>>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SlotsQuery {
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2026-10-28"))]
    pub date: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SlotsView {
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "Mié 28 de Octubre"))]
    pub label: String,
    #[cfg_attr(feature = "openapi", schema(example = json!(["09:00", "10:00"])))]
    pub slots: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingRequest {
    #[cfg_attr(feature = "openapi", schema(example = "pack-4"))]
    pub plan_id: String,
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2026-10-28"))]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "10:00"))]
    pub time: String,
    pub payment_method: PaymentMethod,
    pub contact: ContactForm,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingConfirmationResponse {
    pub step: WizardStep,
    pub plan: PlanView,
    pub date: String,
    pub time: String,
    #[cfg_attr(feature = "openapi", schema(example = "Mié 28 de Octubre a las 10:00"))]
    pub slot_label: String,
    pub payment_method: PaymentMethod,
    pub total_label: String,
    pub client_name: String,
    /// Set for bank transfer.
    pub bank_transfer: Option<BankTransferInstructions>,
    /// Set for WhatsApp coordination.
    pub message: Option<String>,
    /// Set for WhatsApp coordination; open in a new browsing context.
    pub deep_link: Option<String>,
    pub note: String,
}

impl From<&Confirmation> for BookingConfirmationResponse {
    fn from(confirmation: &Confirmation) -> Self {
        let (bank_transfer, message, deep_link, note) = match &confirmation.outcome {
            ConfirmationOutcome::BankTransfer(details) => (
                Some(details.clone()),
                None,
                None,
                "Realiza la transferencia y envía el comprobante por WhatsApp o email. \
                 Una vez confirmado el pago, recibirás un email de confirmación."
                    .to_string(),
            ),
            ConfirmationOutcome::Message { message, deep_link } => (
                None,
                Some(message.clone()),
                Some(deep_link.clone()),
                "Coordina directamente el pago por WhatsApp.".to_string(),
            ),
        };

        Self {
            step: WizardStep::Confirmed,
            plan: PlanView::from(&confirmation.plan),
            date: confirmation.slot.date.format(DATE_FORMAT).to_string(),
            time: confirmation.slot.time.to_string(),
            slot_label: confirmation.slot.label(),
            payment_method: confirmation.method(),
            total_label: format_clp(confirmation.plan.price),
            client_name: confirmation.contact.name.clone(),
            bank_transfer,
            message,
            deep_link,
            note,
        }
    }
}

// --- Logic ---

pub fn parse_date(value: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| BookingError::InvalidInput(format!("Invalid date '{}' (YYYY-MM-DD)", value)))
}

/// Picks the month to display. Months before today's month show today's month.
pub fn resolve_month(query: &CalendarQuery, today: NaiveDate) -> Result<CalendarMonth, BookingError> {
    let requested = match (query.year, query.month) {
        (None, None) => CalendarMonth::containing(today),
        (Some(year), Some(month)) => CalendarMonth::new(year, month)?,
        _ => {
            return Err(BookingError::InvalidInput(
                "year and month must be given together".to_string(),
            ))
        }
    };
    Ok(requested.clamp_to(today))
}

pub fn calendar_view(
    month: CalendarMonth,
    availability: &dyn AvailabilityProvider,
    today: NaiveDate,
) -> CalendarView {
    let weeks = month
        .grid()
        .iter()
        .map(|week| {
            week.iter()
                .map(|cell| match cell {
                    Some(date) => CalendarCell {
                        date: Some(date.format(DATE_FORMAT).to_string()),
                        day: Some(date.day()),
                        selectable: availability.is_date_available(*date, today),
                        today: *date == today,
                    },
                    None => CalendarCell {
                        date: None,
                        day: None,
                        selectable: false,
                        today: false,
                    },
                })
                .collect()
        })
        .collect();

    let can_go_previous = month.can_go_previous(today);
    CalendarView {
        year: month.year(),
        month: month.month(),
        title: month.title(),
        can_go_previous,
        previous: can_go_previous.then(|| month.previous(today).into()),
        next: month.next().into(),
        weekday_headers: DAY_NAMES.iter().map(|d| d.to_string()).collect(),
        weeks,
    }
}

pub fn slots_view(
    date: NaiveDate,
    availability: &dyn AvailabilityProvider,
    today: NaiveDate,
) -> Result<SlotsView, BookingError> {
    if !availability.is_date_available(date, today) {
        return Err(WizardError::DateUnavailable(date).into());
    }
    Ok(SlotsView {
        date: date.format(DATE_FORMAT).to_string(),
        label: date_label(date),
        slots: availability
            .time_slots(date)
            .iter()
            .map(TimeSlot::to_string)
            .collect(),
    })
}

/// Runs the whole wizard for a single request.
///
/// Nothing is stored: confirming the same slot twice succeeds twice.
pub fn process_booking(
    catalog: &PlanCatalog,
    availability: Arc<dyn AvailabilityProvider>,
    channels: &OutboundChannels,
    today: NaiveDate,
    request: BookingRequest,
) -> Result<Confirmation, BookingError> {
    let plan = catalog.get(&request.plan_id)?.clone();
    let date = parse_date(&request.date)?;
    let time: TimeSlot = request.time.parse()?;

    let mut wizard = BookingWizard::new(plan, availability, today);
    wizard.select_date(date)?;
    wizard.select_time(time)?;
    wizard.continue_to_payment()?;
    wizard.choose_payment_method(request.payment_method)?;
    wizard.update_contact(request.contact)?;
    debug!("Submitting wizard: {:?}", wizard.state());
    let confirmation = wizard.submit(channels)?;

    info!(
        "Booking request accepted: plan={} slot='{}'",
        wizard.plan().id,
        confirmation.slot.label()
    );
    Ok(confirmation)
}
