#[cfg(test)]
mod tests {
    use crate::availability::{AvailabilityProvider, WeeklyTemplate};
    use crate::calendar::{month_grid, CalendarMonth};
    use chrono::{Datelike, Duration, NaiveDate, Weekday};
    use proptest::prelude::*;

    proptest! {
        // Every row has seven cells and the dates are exactly the month's days, in order
        #[test]
        fn test_grid_covers_month_in_order(year in 1900i32..2200, month in 0u32..12) {
            let weeks = month_grid(year, month).unwrap();

            for week in &weeks {
                prop_assert_eq!(week.len(), 7);
            }

            let days: Vec<NaiveDate> = weeks.iter().flatten().flatten().copied().collect();
            let expected: Vec<NaiveDate> = NaiveDate::from_ymd_opt(year, month + 1, 1)
                .unwrap()
                .iter_days()
                .take_while(|d| d.month0() == month)
                .collect();
            prop_assert_eq!(days, expected);
        }

        // Each date sits in the column of its weekday, Sunday first
        #[test]
        fn test_grid_columns_match_weekdays(year in 1900i32..2200, month in 0u32..12) {
            let weeks = month_grid(year, month).unwrap();
            for week in &weeks {
                for (column, cell) in week.iter().enumerate() {
                    if let Some(date) = cell {
                        prop_assert_eq!(date.weekday().num_days_from_sunday() as usize, column);
                    }
                }
            }
            // No row is entirely blank
            prop_assert!(weeks.iter().all(|w| w.iter().any(Option::is_some)));
        }

        // A date strictly before today is never selectable
        #[test]
        fn test_past_dates_never_selectable(days_back in 1i64..2000, today_offset in 0i64..3650) {
            let template = WeeklyTemplate::default();
            let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(today_offset);
            let date = today - Duration::days(days_back);
            prop_assert!(!template.is_date_available(date, today));
        }

        // Weekends are never selectable, even in the future
        #[test]
        fn test_weekends_never_selectable(days_ahead in 0i64..2000) {
            let template = WeeklyTemplate::default();
            let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
            let date = today + Duration::days(days_ahead);
            let available = template.is_date_available(date, today);
            match date.weekday() {
                Weekday::Sat | Weekday::Sun => prop_assert!(!available),
                _ => prop_assert!(available),
            }
        }

        // Navigation never lands before the current month
        #[test]
        fn test_previous_never_before_today(steps_forward in 0usize..30, steps_back in 0usize..60) {
            let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
            let floor = CalendarMonth::containing(today);
            let mut month = floor;
            for _ in 0..steps_forward {
                month = month.next();
            }
            for _ in 0..steps_back {
                month = month.previous(today);
                prop_assert!(month >= floor);
            }
        }
    }
}
