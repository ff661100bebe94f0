// --- File: crates/agenda_config/src/models.rs ---

use chrono::Weekday;
use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the built landing page, served as fallback when set.
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: None,
        }
    }
}

// --- Plan Catalog ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PlanConfig {
    /// Route identifier, e.g. `pack-4`.
    pub id: String,
    pub name: String,
    /// Total price in CLP. CLP has no minor unit.
    pub price: i64,
    pub sessions: u32,
    pub per_session_price: i64,
    pub description: String,
}

impl PlanConfig {
    fn new(
        id: &str,
        name: &str,
        price: i64,
        sessions: u32,
        per_session_price: i64,
        description: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            sessions,
            per_session_price,
            description: description.to_string(),
        }
    }
}

/// The practice's fixed plan table.
pub fn default_plans() -> Vec<PlanConfig> {
    vec![
        PlanConfig::new(
            "sesion-individual",
            "Sesión Individual",
            30_000,
            1,
            30_000,
            "1 sesión de 1 hora · Online o presencial",
        ),
        PlanConfig::new(
            "pack-4",
            "Pack 4 Sesiones",
            108_000,
            4,
            27_000,
            "4 sesiones de 1 hora · Ahorra 10%",
        ),
        PlanConfig::new(
            "pack-8",
            "Pack 8 Sesiones",
            204_000,
            8,
            25_500,
            "8 sesiones de 1 hora · Ahorra 15%",
        ),
    ]
}

// --- Weekly Availability Template ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AvailabilityConfig {
    /// Weekdays on which sessions can be requested.
    pub weekdays: Vec<Weekday>,
    /// Hour labels offered on every available day, in display order ("HH:MM").
    pub time_slots: Vec<String>,
    /// IANA zone used to decide what "today" is.
    pub time_zone: String,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            weekdays: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            time_slots: ["09:00", "10:00", "11:00", "12:00", "15:00", "16:00", "17:00", "18:00"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            time_zone: "America/Santiago".to_string(),
        }
    }
}

// --- Contact / Messaging ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ContactConfig {
    /// First name used to greet the practitioner in outbound messages.
    pub practitioner_name: String,
    pub whatsapp_number: String,
    /// Base of the messaging deep link; the number is appended as a path segment.
    pub messaging_base_url: String,
    pub email: String,
    pub instagram_url: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            practitioner_name: "Javiera".to_string(),
            whatsapp_number: "569XXXXXXXX".to_string(),
            messaging_base_url: "https://wa.me".to_string(),
            email: "contacto@javiera-psicologa.cl".to_string(),
            instagram_url: "https://www.instagram.com/".to_string(),
        }
    }
}

// --- Bank Transfer Details ---
// Display-only. Nothing here is used to move money.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BankTransferConfig {
    pub bank: String,
    pub account_type: String,
    pub rut: String,
    pub holder: String,
    pub email: String,
}

impl Default for BankTransferConfig {
    fn default() -> Self {
        Self {
            bank: "Banco Estado".to_string(),
            account_type: "Cuenta Vista / RUT".to_string(),
            rut: "XX.XXX.XXX-X".to_string(),
            holder: "Javiera [Apellido]".to_string(),
            email: "contacto@javiera-psicologa.cl".to_string(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_plans")]
    pub plans: Vec<PlanConfig>,
    #[serde(default)]
    pub availability: AvailabilityConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub bank_transfer: BankTransferConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            plans: default_plans(),
            availability: AvailabilityConfig::default(),
            contact: ContactConfig::default(),
            bank_transfer: BankTransferConfig::default(),
        }
    }
}
