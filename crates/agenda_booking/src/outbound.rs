// --- File: crates/agenda_booking/src/outbound.rs ---
//! Everything that leaves the service: the pre-filled WhatsApp message, the
//! deep link that carries it, bank-transfer instructions and contact links.

use agenda_config::{BankTransferConfig, ContactConfig};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::format::format_clp;
use crate::plans::Plan;
use crate::wizard::{ConfirmationOutcome, ContactForm, PaymentMethod, Slot};

/// Static account details shown after choosing bank transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BankTransferInstructions {
    pub bank: String,
    pub account_type: String,
    pub rut: String,
    pub holder: String,
    pub email: String,
    /// Total to transfer, CLP.
    pub amount: i64,
    #[cfg_attr(feature = "openapi", schema(example = "$108.000"))]
    pub amount_label: String,
}

impl BankTransferInstructions {
    pub fn new(bank: &BankTransferConfig, plan: &Plan) -> Self {
        Self {
            bank: bank.bank.clone(),
            account_type: bank.account_type.clone(),
            rut: bank.rut.clone(),
            holder: bank.holder.clone(),
            email: bank.email.clone(),
            amount: plan.price,
            amount_label: format_clp(plan.price),
        }
    }
}

/// Display-only links for the contact section of the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContactLinks {
    #[cfg_attr(feature = "openapi", schema(example = "mailto:contacto@javiera-psicologa.cl"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = "https://wa.me/569XXXXXXXX"))]
    pub whatsapp: String,
    pub instagram: String,
}

impl ContactLinks {
    pub fn from_config(contact: &ContactConfig) -> Self {
        Self {
            email: format!("mailto:{}", contact.email),
            whatsapp: chat_link(&contact.messaging_base_url, &contact.whatsapp_number),
            instagram: contact.instagram_url.clone(),
        }
    }
}

fn chat_link(base_url: &str, number: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), number)
}

/// The message a client sends to coordinate payment.
pub fn booking_message(practitioner: &str, plan: &Plan, slot: &Slot, client_name: &str) -> String {
    format!(
        "Hola {}, me gustaría agendar el plan \"{}\" ({}) para el {}. Mi nombre es {}.",
        practitioner,
        plan.name,
        format_clp(plan.price),
        slot.label(),
        client_name
    )
}

/// Characters a browser's `encodeURIComponent` leaves as they are.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `https://<service>/<number>?text=<percent-encoded message>`
///
/// Spaces become `%20`, never `+`.
pub fn message_deep_link(base_url: &str, number: &str, message: &str) -> String {
    format!(
        "{}?text={}",
        chat_link(base_url, number),
        utf8_percent_encode(message, URI_COMPONENT)
    )
}

/// Builds the confirmation content for each payment method.
#[derive(Debug, Clone)]
pub struct OutboundChannels {
    contact: ContactConfig,
    bank: BankTransferConfig,
}

impl OutboundChannels {
    pub fn new(contact: ContactConfig, bank: BankTransferConfig) -> Self {
        Self { contact, bank }
    }

    pub fn contact_links(&self) -> ContactLinks {
        ContactLinks::from_config(&self.contact)
    }

    pub fn outcome(
        &self,
        method: PaymentMethod,
        plan: &Plan,
        slot: &Slot,
        contact: &ContactForm,
    ) -> ConfirmationOutcome {
        match method {
            PaymentMethod::BankTransfer => {
                ConfirmationOutcome::BankTransfer(BankTransferInstructions::new(&self.bank, plan))
            }
            PaymentMethod::Message => {
                let message =
                    booking_message(&self.contact.practitioner_name, plan, slot, &contact.name);
                let deep_link = message_deep_link(
                    &self.contact.messaging_base_url,
                    &self.contact.whatsapp_number,
                    &message,
                );
                ConfirmationOutcome::Message { message, deep_link }
            }
        }
    }
}

impl Default for OutboundChannels {
    fn default() -> Self {
        Self::new(ContactConfig::default(), BankTransferConfig::default())
    }
}
