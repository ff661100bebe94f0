// --- File: crates/agenda_booking/src/format.rs ---
//! es-CL display formatting.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{DAY_NAMES, MONTH_NAMES};

/// Formats a whole-peso amount: `30000` -> `$30.000`.
///
/// Groups are always separated, including four-digit amounts (`$1.000`).
pub fn format_clp(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// `Mié 28 de Octubre`
pub fn date_label(date: NaiveDate) -> String {
    format!(
        "{} {} de {}",
        DAY_NAMES[date.weekday().num_days_from_sunday() as usize],
        date.day(),
        MONTH_NAMES[date.month0() as usize]
    )
}
