use agenda_booking::{
    routes_with_state, AvailabilityProvider, BookingState, FixedClock, TimeSlot,
};
use agenda_config::AppConfig;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Datelike, NaiveDate, Weekday};
use percent_encoding::percent_decode_str;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

// Sunday 2026-10-18
fn test_state() -> BookingState {
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    BookingState::from_config(Arc::new(AppConfig::default()))
        .unwrap()
        .with_clock(Arc::new(FixedClock(today)))
}

fn create_test_app() -> Router {
    routes_with_state(Arc::new(test_state()))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    send_to(create_test_app(), request).await
}

async fn send_to(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_booking(payload: Value) -> (StatusCode, Value) {
    send(
        Request::builder()
            .method("POST")
            .uri("/bookings")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await
}

fn booking_payload(plan_id: &str, date: &str, time: &str, method: &str) -> Value {
    json!({
        "plan_id": plan_id,
        "date": date,
        "time": time,
        "payment_method": method,
        "contact": {
            "name": "Ana",
            "email": "ana@example.com",
            "phone": "+56 9 1234 5678"
        }
    })
}

#[tokio::test]
async fn test_list_plans() {
    let (status, body) = get("/plans").await;
    assert_eq!(status, StatusCode::OK);

    let plans = body.as_array().unwrap();
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[1]["id"], "pack-4");
    assert_eq!(plans[1]["price_label"], "$108.000");
    assert_eq!(plans[1]["per_session_label"], "$27.000");
    assert_eq!(plans[0]["per_session_label"], Value::Null);
}

#[tokio::test]
async fn test_get_plan() {
    let (status, body) = get("/plans/pack-8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Pack 8 Sesiones");
    assert_eq!(body["sessions"], 8);
}

#[tokio::test]
async fn test_unknown_plan_shows_not_found_view() {
    let (status, body) = get("/plans/pack-12").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Plan no encontrado");
    assert_eq!(body["plan_id"], "pack-12");
    assert_eq!(body["back_link"], "/");
}

#[tokio::test]
async fn test_calendar_defaults_to_current_month() {
    let (status, body) = get("/calendar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Octubre 2026");
    assert_eq!(body["can_go_previous"], false);
    assert_eq!(body["next"], json!({ "year": 2026, "month": 10 }));
}

#[tokio::test]
async fn test_calendar_past_month_is_clamped() {
    let (status, body) = get("/calendar?year=2026&month=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["month"], 9);
}

#[tokio::test]
async fn test_calendar_rejects_invalid_month() {
    let (status, body) = get("/calendar?year=2026&month=12").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
}

#[tokio::test]
async fn test_slots_for_weekday() {
    let (status, body) = get("/slots?date=2026-10-28").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "Mié 28 de Octubre");
    assert_eq!(body["slots"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_slots_for_weekend_are_rejected() {
    let (status, body) = get("/slots?date=2026-10-24").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 422);

    let (status, _) = get("/slots?date=24-10-2026").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booking_with_bank_transfer() {
    let (status, body) =
        post_booking(booking_payload("pack-4", "2026-10-28", "10:00", "transferencia")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "Confirmed");
    assert_eq!(body["payment_method"], "transferencia");
    assert_eq!(body["total_label"], "$108.000");
    assert_eq!(body["bank_transfer"]["amount"], 108000);
    assert_eq!(body["bank_transfer"]["bank"], "Banco Estado");
    assert_eq!(body["deep_link"], Value::Null);
}

#[tokio::test]
async fn test_booking_with_whatsapp() {
    let (status, body) =
        post_booking(booking_payload("pack-4", "2026-10-28", "10:00", "whatsapp")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slot_label"], "Mié 28 de Octubre a las 10:00");

    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Pack 4 Sesiones"));
    assert!(message.contains("Ana"));

    let link = body["deep_link"].as_str().unwrap();
    let text = link
        .strip_prefix("https://wa.me/569XXXXXXXX?text=")
        .unwrap();
    assert!(!text.contains('+'));
    assert!(text.contains("Pack%204%20Sesiones"));
    let decoded = percent_decode_str(text).decode_utf8().unwrap();
    assert_eq!(decoded, message);
}

#[tokio::test]
async fn test_booking_rejections() {
    let (status, body) =
        post_booking(booking_payload("pack-12", "2026-10-28", "10:00", "whatsapp")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["back_link"], "/");

    let (status, _) =
        post_booking(booking_payload("pack-4", "2026-10-24", "10:00", "whatsapp")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut payload = booking_payload("pack-4", "2026-10-28", "10:00", "whatsapp");
    payload["contact"]["phone"] = json!("");
    let (status, body) = post_booking(payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("phone"));
}

#[tokio::test]
async fn test_contact_links() {
    let (status, body) = get("/contact").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "mailto:contacto@javiera-psicologa.cl");
    assert_eq!(body["whatsapp"], "https://wa.me/569XXXXXXXX");
}

// Saturdays at 08:30 only
struct SaturdayMornings;

impl AvailabilityProvider for SaturdayMornings {
    fn is_date_available(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= today && date.weekday() == Weekday::Sat
    }

    fn time_slots(&self, _date: NaiveDate) -> Vec<TimeSlot> {
        vec!["08:30".parse().unwrap()]
    }
}

#[tokio::test]
async fn test_replaced_availability_drives_every_route() {
    let app = routes_with_state(Arc::new(
        test_state().with_availability(Arc::new(SaturdayMornings)),
    ));

    let uri = |u: &str| Request::builder().uri(u).body(Body::empty()).unwrap();

    let (status, body) = send_to(app.clone(), uri("/slots?date=2026-10-24")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slots"], json!(["08:30"]));

    let (status, _) = send_to(app.clone(), uri("/slots?date=2026-10-28")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send_to(
        app,
        Request::builder()
            .method("POST")
            .uri("/bookings")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                booking_payload("pack-4", "2026-10-24", "08:30", "transferencia").to_string(),
            ))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slot_label"], "Sáb 24 de Octubre a las 08:30");
}
