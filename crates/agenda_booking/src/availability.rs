// --- File: crates/agenda_booking/src/availability.rs ---
//! Which dates and hours can be requested.
//!
//! There is no booking store behind any of this: a slot stays "available"
//! after somebody confirms it. The practitioner resolves clashes by hand.

use std::fmt;
use std::str::FromStr;

use agenda_config::AvailabilityConfig;
use chrono::{Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::error::BookingError;

/// An hour-of-day label such as `10:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(NaiveTime);

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for TimeSlot {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(TimeSlot)
            .map_err(|_| BookingError::InvalidInput(format!("Invalid time '{}' (expected HH:MM)", s)))
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Source of truth for selectable dates and hours.
///
/// `WeeklyTemplate` is the only implementation today; a schedule store can
/// replace it without touching the wizard.
pub trait AvailabilityProvider: Send + Sync {
    /// Whether `date` can be picked at all, given the current day.
    fn is_date_available(&self, date: NaiveDate, today: NaiveDate) -> bool;

    /// Hours offered on `date`, in display order.
    fn time_slots(&self, date: NaiveDate) -> Vec<TimeSlot>;

    fn is_slot_available(&self, date: NaiveDate, time: &TimeSlot, today: NaiveDate) -> bool {
        self.is_date_available(date, today) && self.time_slots(date).contains(time)
    }
}

/// Fixed weekdays and fixed hours, identical every week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyTemplate {
    weekdays: Vec<Weekday>,
    slots: Vec<TimeSlot>,
}

impl WeeklyTemplate {
    pub fn new(weekdays: Vec<Weekday>, slots: Vec<TimeSlot>) -> Self {
        Self { weekdays, slots }
    }

    pub fn from_config(config: &AvailabilityConfig) -> Result<Self, BookingError> {
        let slots = config
            .time_slots
            .iter()
            .map(|label| {
                label.parse::<TimeSlot>().map_err(|_| {
                    BookingError::InvalidConfig(format!("Invalid time slot label '{}'", label))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if config.weekdays.is_empty() || slots.is_empty() {
            warn!("Availability template has no weekdays or no time slots; nothing can be booked");
        }
        debug!(
            "Weekly template: weekdays={:?}, slots={}",
            config.weekdays,
            slots.len()
        );

        Ok(Self::new(config.weekdays.clone(), slots))
    }
}

impl Default for WeeklyTemplate {
    fn default() -> Self {
        Self::from_config(&AvailabilityConfig::default())
            .unwrap_or_else(|_| Self::new(vec![], vec![]))
    }
}

impl AvailabilityProvider for WeeklyTemplate {
    fn is_date_available(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= today && self.weekdays.contains(&date.weekday())
    }

    fn time_slots(&self, _date: NaiveDate) -> Vec<TimeSlot> {
        self.slots.clone()
    }
}

/// Source of "today" for the practice.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the practice's time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    time_zone: Tz,
}

impl SystemClock {
    pub fn new(time_zone: Tz) -> Self {
        Self { time_zone }
    }

    pub fn from_config(config: &AvailabilityConfig) -> Result<Self, BookingError> {
        let time_zone = Tz::from_str(&config.time_zone).map_err(|_| {
            BookingError::InvalidConfig(format!("Unknown time zone '{}'", config.time_zone))
        })?;
        Ok(Self::new(time_zone))
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.time_zone).date_naive()
    }
}

/// A clock pinned to one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
