#[cfg(test)]
mod tests {
    use crate::availability::WeeklyTemplate;
    use crate::error::BookingError;
    use crate::logic::{
        calendar_view, parse_date, process_booking, resolve_month, slots_view,
        BookingConfirmationResponse, BookingRequest, CalendarQuery, PlanView,
    };
    use crate::outbound::OutboundChannels;
    use crate::plans::PlanCatalog;
    use crate::wizard::{ContactField, ContactForm, PaymentMethod, WizardError};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 18)
    }

    fn request(plan_id: &str, date: &str, time: &str, method: PaymentMethod) -> BookingRequest {
        BookingRequest {
            plan_id: plan_id.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            payment_method: method,
            contact: ContactForm::new("Ana", "ana@example.com", "+56 9 1234 5678"),
        }
    }

    fn book(request: BookingRequest) -> Result<crate::wizard::Confirmation, BookingError> {
        process_booking(
            &PlanCatalog::standard(),
            Arc::new(WeeklyTemplate::default()),
            &OutboundChannels::default(),
            today(),
            request,
        )
    }

    #[test]
    fn test_plan_view_labels() {
        let catalog = PlanCatalog::standard();

        let single = PlanView::from(catalog.get("sesion-individual").unwrap());
        assert_eq!(single.price_label, "$30.000");
        assert_eq!(single.currency, "CLP");
        assert_eq!(single.per_session_label, None);

        let pack = PlanView::from(catalog.get("pack-8").unwrap());
        assert_eq!(pack.price_label, "$204.000");
        assert_eq!(pack.per_session_label.as_deref(), Some("$25.500"));
        assert_eq!(pack.sessions, 8);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-10-28").unwrap(), date(2026, 10, 28));
        assert_eq!(parse_date(" 2026-10-28 ").unwrap(), date(2026, 10, 28));
        assert!(matches!(
            parse_date("28/10/2026"),
            Err(BookingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_resolve_month() {
        let current = resolve_month(&CalendarQuery::default(), today()).unwrap();
        assert_eq!((current.year(), current.month()), (2026, 9));

        let december = resolve_month(
            &CalendarQuery {
                year: Some(2026),
                month: Some(11),
            },
            today(),
        )
        .unwrap();
        assert_eq!((december.year(), december.month()), (2026, 11));

        // Past months show the current one
        let past = resolve_month(
            &CalendarQuery {
                year: Some(2025),
                month: Some(0),
            },
            today(),
        )
        .unwrap();
        assert_eq!(past, current);

        assert!(matches!(
            resolve_month(
                &CalendarQuery {
                    year: Some(2026),
                    month: None
                },
                today()
            ),
            Err(BookingError::InvalidInput(_))
        ));
        assert!(matches!(
            resolve_month(
                &CalendarQuery {
                    year: Some(2026),
                    month: Some(12)
                },
                today()
            ),
            Err(BookingError::Calendar(_))
        ));
    }

    #[test]
    fn test_calendar_view_for_current_month() {
        let month = resolve_month(&CalendarQuery::default(), today()).unwrap();
        let view = calendar_view(month, &WeeklyTemplate::default(), today());

        assert_eq!(view.title, "Octubre 2026");
        assert!(!view.can_go_previous);
        assert_eq!(view.previous, None);
        assert_eq!((view.next.year, view.next.month), (2026, 10));
        assert_eq!(view.weekday_headers[0], "Dom");
        assert_eq!(view.weekday_headers[3], "Mié");

        let cells: Vec<_> = view.weeks.iter().flatten().collect();
        let cell = |day: u32| cells.iter().find(|c| c.day == Some(day)).unwrap();

        // Past weekday
        assert!(!cell(16).selectable);
        // Today is a Sunday
        assert!(cell(18).today);
        assert!(!cell(18).selectable);
        assert!(cell(19).selectable);
        assert_eq!(cell(28).date.as_deref(), Some("2026-10-28"));
        assert!(!cell(31).selectable);

        // Placeholders carry nothing
        let blank = &view.weeks[0][0];
        assert_eq!(blank.date, None);
        assert!(!blank.selectable);
    }

    #[test]
    fn test_calendar_view_allows_going_back_from_future_month() {
        let month = resolve_month(
            &CalendarQuery {
                year: Some(2027),
                month: Some(0),
            },
            today(),
        )
        .unwrap();
        let view = calendar_view(month, &WeeklyTemplate::default(), today());
        assert!(view.can_go_previous);
        let previous = view.previous.unwrap();
        assert_eq!((previous.year, previous.month), (2026, 11));
        assert!(!view.weeks.iter().flatten().any(|c| c.today));
    }

    #[test]
    fn test_slots_view() {
        let view = slots_view(date(2026, 10, 28), &WeeklyTemplate::default(), today()).unwrap();
        assert_eq!(view.label, "Mié 28 de Octubre");
        assert_eq!(
            view.slots,
            vec!["09:00", "10:00", "11:00", "12:00", "15:00", "16:00", "17:00", "18:00"]
        );

        let saturday = date(2026, 10, 24);
        assert!(matches!(
            slots_view(saturday, &WeeklyTemplate::default(), today()),
            Err(BookingError::Wizard(WizardError::DateUnavailable(d))) if d == saturday
        ));
    }

    #[test]
    fn test_process_booking_bank_transfer() {
        let confirmation = book(request(
            "pack-4",
            "2026-10-28",
            "10:00",
            PaymentMethod::BankTransfer,
        ))
        .unwrap();
        let response = BookingConfirmationResponse::from(&confirmation);

        assert_eq!(response.payment_method, PaymentMethod::BankTransfer);
        assert_eq!(response.total_label, "$108.000");
        assert_eq!(response.slot_label, "Mié 28 de Octubre a las 10:00");
        assert_eq!(response.client_name, "Ana");
        assert_eq!(response.message, None);
        let bank = response.bank_transfer.unwrap();
        assert_eq!(bank.amount, 108_000);
        assert_eq!(bank.bank, "Banco Estado");
    }

    #[test]
    fn test_process_booking_message() {
        let confirmation = book(request(
            "sesion-individual",
            "2026-10-19",
            "15:00",
            PaymentMethod::Message,
        ))
        .unwrap();
        let response = BookingConfirmationResponse::from(&confirmation);

        assert!(response.bank_transfer.is_none());
        let message = response.message.unwrap();
        assert!(message.starts_with("Hola Javiera"));
        assert!(message.contains("Sesión Individual"));
        assert!(message.contains("$30.000"));
        assert!(response.deep_link.unwrap().starts_with("https://wa.me/569XXXXXXXX?text="));
    }

    #[test]
    fn test_process_booking_rejections() {
        assert!(matches!(
            book(request("pack-12", "2026-10-28", "10:00", PaymentMethod::Message)),
            Err(BookingError::UnknownPlan(_))
        ));
        assert!(matches!(
            book(request("pack-4", "mañana", "10:00", PaymentMethod::Message)),
            Err(BookingError::InvalidInput(_))
        ));
        assert!(matches!(
            book(request("pack-4", "2026-10-28", "10am", PaymentMethod::Message)),
            Err(BookingError::InvalidInput(_))
        ));
        assert!(matches!(
            book(request("pack-4", "2026-10-24", "10:00", PaymentMethod::Message)),
            Err(BookingError::Wizard(WizardError::DateUnavailable(_)))
        ));
        assert!(matches!(
            book(request("pack-4", "2026-10-28", "13:00", PaymentMethod::Message)),
            Err(BookingError::Wizard(WizardError::SlotUnavailable { .. }))
        ));

        let mut missing_email = request("pack-4", "2026-10-28", "10:00", PaymentMethod::Message);
        missing_email.contact.email = " ".to_string();
        assert!(matches!(
            book(missing_email),
            Err(BookingError::Wizard(WizardError::MissingContactField(
                ContactField::Email
            )))
        ));
    }

    #[test]
    fn test_same_slot_can_be_confirmed_twice() {
        let first = book(request("pack-4", "2026-10-28", "10:00", PaymentMethod::Message));
        let second = book(request("pack-4", "2026-10-28", "10:00", PaymentMethod::Message));
        assert!(first.is_ok());
        assert!(second.is_ok());
    }
}
