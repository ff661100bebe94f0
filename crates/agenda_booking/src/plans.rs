// --- File: crates/agenda_booking/src/plans.rs ---
use std::collections::HashSet;

use agenda_config::{default_plans, PlanConfig};
use serde::Serialize;
use tracing::warn;

use crate::error::BookingError;

/// A purchasable session package. Prices are whole CLP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub sessions: u32,
    pub per_session_price: i64,
    pub description: String,
}

impl Plan {
    /// Packages show a per-session price next to the total.
    pub fn is_package(&self) -> bool {
        self.sessions > 1
    }
}

impl From<&PlanConfig> for Plan {
    fn from(config: &PlanConfig) -> Self {
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            price: config.price,
            sessions: config.sessions,
            per_session_price: config.per_session_price,
            description: config.description.clone(),
        }
    }
}

/// Lookup table of plans, in display order.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    pub fn from_config(plans: &[PlanConfig]) -> Result<Self, BookingError> {
        let mut seen = HashSet::new();
        for plan in plans {
            if plan.id.trim().is_empty() {
                return Err(BookingError::InvalidConfig(
                    "Plan with empty id".to_string(),
                ));
            }
            if !seen.insert(plan.id.as_str()) {
                return Err(BookingError::InvalidConfig(format!(
                    "Duplicate plan id '{}'",
                    plan.id
                )));
            }
            if plan.price < 0 || plan.per_session_price < 0 || plan.sessions == 0 {
                return Err(BookingError::InvalidConfig(format!(
                    "Plan '{}' needs at least one session and non-negative prices",
                    plan.id
                )));
            }
            let total = plan
                .per_session_price
                .checked_mul(i64::from(plan.sessions))
                .ok_or_else(|| {
                    BookingError::InvalidConfig(format!(
                        "Plan '{}': {} sessions x {} overflows",
                        plan.id, plan.sessions, plan.per_session_price
                    ))
                })?;
            if total != plan.price {
                warn!(
                    "Plan '{}': {} sessions x {} does not add up to {}",
                    plan.id, plan.sessions, plan.per_session_price, plan.price
                );
            }
        }

        Ok(Self {
            plans: plans.iter().map(Plan::from).collect(),
        })
    }

    /// The practice's built-in plans.
    pub fn standard() -> Self {
        Self {
            plans: default_plans().iter().map(Plan::from).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Result<&Plan, BookingError> {
        self.plans
            .iter()
            .find(|plan| plan.id == id)
            .ok_or_else(|| BookingError::UnknownPlan(id.to_string()))
    }

    pub fn all(&self) -> &[Plan] {
        &self.plans
    }
}
