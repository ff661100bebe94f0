// --- File: crates/agenda_booking/src/wizard.rs ---
//! The booking wizard.
//!
//! ```text
//! CollectingSlot --continue--> CollectingPaymentAndContact --submit--> Confirmed
//!       ^                               |
//!       +------------back---------------+
//! ```
//!
//! Every transition checks its guard and returns a `WizardError` instead of
//! silently ignoring the call. `Confirmed` is terminal.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::availability::{AvailabilityProvider, TimeSlot};
use crate::format::date_label;
use crate::outbound::{BankTransferInstructions, OutboundChannels};
use crate::plans::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum PaymentMethod {
    #[serde(rename = "transferencia")]
    BankTransfer,
    /// Coordinate payment with the practitioner over WhatsApp.
    #[serde(rename = "whatsapp")]
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
        };
        f.write_str(name)
    }
}

/// Client details. All three are required; formats are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl ContactForm {
    pub fn new(name: &str, email: &str, phone: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    /// First blank field, if any.
    pub fn missing_field(&self) -> Option<ContactField> {
        [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Phone, &self.phone),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.email.trim(), self.phone.trim())
    }
}

/// A requested (date, time) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: TimeSlot,
}

impl Slot {
    /// `Mié 28 de Octubre a las 10:00`
    pub fn label(&self) -> String {
        format!("{} a las {}", date_label(self.date), self.time)
    }
}

/// Picks made on the first step. The time only means something for its date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotSelection {
    date: Option<NaiveDate>,
    time: Option<TimeSlot>,
}

impl SlotSelection {
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<TimeSlot> {
        self.time
    }

    pub fn complete(&self) -> Option<Slot> {
        Some(Slot {
            date: self.date?,
            time: self.time?,
        })
    }
}

/// Second-step inputs. Kept when the client goes back to change the slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentDraft {
    pub method: Option<PaymentMethod>,
    pub contact: ContactForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    BankTransfer(BankTransferInstructions),
    Message { message: String, deep_link: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub plan: Plan,
    pub slot: Slot,
    pub contact: ContactForm,
    pub outcome: ConfirmationOutcome,
}

impl Confirmation {
    pub fn method(&self) -> PaymentMethod {
        match self.outcome {
            ConfirmationOutcome::BankTransfer(_) => PaymentMethod::BankTransfer,
            ConfirmationOutcome::Message { .. } => PaymentMethod::Message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    CollectingSlot {
        selection: SlotSelection,
        draft: PaymentDraft,
    },
    CollectingPaymentAndContact {
        slot: Slot,
        draft: PaymentDraft,
    },
    Confirmed(Confirmation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum WizardStep {
    CollectingSlot,
    CollectingPaymentAndContact,
    Confirmed,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::CollectingSlot => "collecting the slot",
            WizardStep::CollectingPaymentAndContact => "collecting payment and contact",
            WizardStep::Confirmed => "confirmed",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("'{operation}' is not allowed while {step}")]
    WrongStep {
        operation: &'static str,
        step: WizardStep,
    },
    #[error("Date {0} is not available for booking")]
    DateUnavailable(NaiveDate),
    #[error("Select a date before choosing a time")]
    NoDateSelected,
    #[error("Time {time} is not offered on {date}")]
    SlotUnavailable { date: NaiveDate, time: TimeSlot },
    #[error("A date and a time must be selected to continue")]
    IncompleteSelection,
    #[error("Choose a payment method")]
    NoPaymentMethod,
    #[error("Contact field '{0}' is required")]
    MissingContactField(ContactField),
    #[error("The booking is already confirmed")]
    AlreadyConfirmed,
}

/// One client's pass through the booking flow for one plan.
pub struct BookingWizard {
    plan: Plan,
    availability: Arc<dyn AvailabilityProvider>,
    today: NaiveDate,
    state: WizardState,
}

impl BookingWizard {
    pub fn new(plan: Plan, availability: Arc<dyn AvailabilityProvider>, today: NaiveDate) -> Self {
        Self {
            plan,
            availability,
            today,
            state: WizardState::CollectingSlot {
                selection: SlotSelection::default(),
                draft: PaymentDraft::default(),
            },
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        match self.state {
            WizardState::CollectingSlot { .. } => WizardStep::CollectingSlot,
            WizardState::CollectingPaymentAndContact { .. } => {
                WizardStep::CollectingPaymentAndContact
            }
            WizardState::Confirmed(_) => WizardStep::Confirmed,
        }
    }

    /// Hours offered for the currently selected date.
    pub fn offered_times(&self) -> Vec<TimeSlot> {
        match &self.state {
            WizardState::CollectingSlot {
                selection:
                    SlotSelection {
                        date: Some(date), ..
                    },
                ..
            } => self.availability.time_slots(*date),
            _ => Vec::new(),
        }
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        match &self.state {
            WizardState::Confirmed(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), WizardError> {
        self.selection("select_date")?;
        if !self.availability.is_date_available(date, self.today) {
            return Err(WizardError::DateUnavailable(date));
        }
        if let WizardState::CollectingSlot { selection, .. } = &mut self.state {
            selection.date = Some(date);
            selection.time = None;
        }
        debug!("[Wizard] plan={} date={}", self.plan.id, date);
        Ok(())
    }

    pub fn select_time(&mut self, time: TimeSlot) -> Result<(), WizardError> {
        let date = self
            .selection("select_time")?
            .date
            .ok_or(WizardError::NoDateSelected)?;
        if !self.availability.is_slot_available(date, &time, self.today) {
            return Err(WizardError::SlotUnavailable { date, time });
        }
        if let WizardState::CollectingSlot { selection, .. } = &mut self.state {
            selection.time = Some(time);
        }
        debug!("[Wizard] plan={} time={}", self.plan.id, time);
        Ok(())
    }

    pub fn continue_to_payment(&mut self) -> Result<(), WizardError> {
        let (slot, draft) = match &self.state {
            WizardState::CollectingSlot { selection, draft } => (
                selection.complete().ok_or(WizardError::IncompleteSelection)?,
                draft.clone(),
            ),
            _ => return Err(self.step_error("continue_to_payment")),
        };
        self.state = WizardState::CollectingPaymentAndContact { slot, draft };
        Ok(())
    }

    /// Returns to slot selection keeping every choice made so far.
    pub fn back_to_slot(&mut self) -> Result<(), WizardError> {
        let (slot, draft) = match &self.state {
            WizardState::CollectingPaymentAndContact { slot, draft } => (*slot, draft.clone()),
            _ => return Err(self.step_error("back_to_slot")),
        };
        self.state = WizardState::CollectingSlot {
            selection: SlotSelection {
                date: Some(slot.date),
                time: Some(slot.time),
            },
            draft,
        };
        Ok(())
    }

    pub fn choose_payment_method(&mut self, method: PaymentMethod) -> Result<(), WizardError> {
        self.draft_mut("choose_payment_method")?.method = Some(method);
        Ok(())
    }

    pub fn update_contact(&mut self, contact: ContactForm) -> Result<(), WizardError> {
        self.draft_mut("update_contact")?.contact = contact;
        Ok(())
    }

    pub fn submit(&mut self, channels: &OutboundChannels) -> Result<Confirmation, WizardError> {
        let (slot, draft) = match &self.state {
            WizardState::CollectingPaymentAndContact { slot, draft } => (*slot, draft),
            _ => return Err(self.step_error("submit")),
        };
        let method = draft.method.ok_or(WizardError::NoPaymentMethod)?;
        if let Some(field) = draft.contact.missing_field() {
            return Err(WizardError::MissingContactField(field));
        }
        let contact = draft.contact.trimmed();

        let outcome = channels.outcome(method, &self.plan, &slot, &contact);

        let confirmation = Confirmation {
            plan: self.plan.clone(),
            slot,
            contact,
            outcome,
        };
        info!(
            "[Wizard] Booking confirmed: plan={} slot='{}' method={:?}",
            self.plan.id,
            slot.label(),
            method
        );
        self.state = WizardState::Confirmed(confirmation.clone());
        Ok(confirmation)
    }

    fn selection(&self, operation: &'static str) -> Result<&SlotSelection, WizardError> {
        match &self.state {
            WizardState::CollectingSlot { selection, .. } => Ok(selection),
            _ => Err(self.step_error(operation)),
        }
    }

    fn draft_mut(&mut self, operation: &'static str) -> Result<&mut PaymentDraft, WizardError> {
        let error = self.step_error(operation);
        match &mut self.state {
            WizardState::CollectingPaymentAndContact { draft, .. } => Ok(draft),
            _ => Err(error),
        }
    }

    fn step_error(&self, operation: &'static str) -> WizardError {
        match self.step() {
            WizardStep::Confirmed => WizardError::AlreadyConfirmed,
            step => WizardError::WrongStep { operation, step },
        }
    }
}
