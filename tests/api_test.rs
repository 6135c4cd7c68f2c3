/// HTTP API tests driving the router over in-memory storage
///
/// Tests cover:
/// - Status codes and envelopes for each resource
/// - Domain error to status mapping
/// - Booking scenario end to end
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use roomescape::application::{ReservationService, ReservationTimeService, ThemeService};
use roomescape::domain::RepositoryProvider;
use roomescape::{create_api_router, BookingState, InMemoryRepositoryProvider};

fn app() -> Router {
    let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
    create_api_router(BookingState {
        reservations: Arc::new(ReservationService::new(repos.clone())),
        themes: Arc::new(ThemeService::new(repos.clone())),
        times: Arc::new(ReservationTimeService::new(repos)),
    })
}

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let mut svc = app.clone().into_service();
    let resp = svc.call(builder.body(body).unwrap()).await.unwrap();

    let status = resp.status();
    let location = resp
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    TestResponse {
        status,
        location,
        body,
    }
}

async fn seed(app: &Router) {
    let resp = send(
        app,
        "POST",
        "/themes",
        Some(json!({"name": "Secret", "description": "desc", "thumbnail": "thumb"})),
    )
    .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let resp = send(app, "POST", "/times", Some(json!({"start_at": "10:00"}))).await;
    assert_eq!(resp.status, StatusCode::CREATED);
}

fn kelly() -> Value {
    json!({"date": "2024-06-01", "name": "Kelly", "time_id": 1, "theme_id": 1})
}

#[tokio::test]
async fn health_reports_ok() {
    let resp = send(&app(), "GET", "/health", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["status"], "ok");
}

#[tokio::test]
async fn booking_scenario() {
    let app = app();
    seed(&app).await;

    let resp = send(&app, "POST", "/reservations", Some(kelly())).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.location.as_deref(), Some("/reservations/1"));
    assert_eq!(resp.body["success"], true);
    assert_eq!(resp.body["data"]["id"], 1);
    assert_eq!(resp.body["data"]["theme"]["name"], "Secret");
    assert_eq!(resp.body["data"]["time"]["start_at"], "10:00");

    let resp = send(&app, "POST", "/reservations", Some(kelly())).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(resp.body["success"], false);

    let resp = send(&app, "GET", "/reservations?date=2024-06-01&theme_id=1", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    let data = resp.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Kelly");
    assert_eq!(data[0]["date"], "2024-06-01");

    let resp = send(&app, "GET", "/reservations?date=2024-06-02&theme_id=1", None).await;
    assert!(resp.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn time_release_scenario() {
    let app = app();
    seed(&app).await;
    send(&app, "POST", "/reservations", Some(kelly())).await;

    let resp = send(&app, "DELETE", "/times/1", None).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);

    let resp = send(&app, "DELETE", "/reservations/1", None).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = send(&app, "DELETE", "/times/1", None).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = send(&app, "DELETE", "/times/1", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reservation_errors_map_to_statuses() {
    let app = app();
    seed(&app).await;

    let mut body = kelly();
    body["theme_id"] = json!(7);
    let resp = send(&app, "POST", "/reservations", Some(body)).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let mut body = kelly();
    body["date"] = json!("2024/06/01");
    let resp = send(&app, "POST", "/reservations", Some(body)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let mut body = kelly();
    body["name"] = json!("a name that is far too long for a booking");
    let resp = send(&app, "POST", "/reservations", Some(body)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let mut body = kelly();
    body["time_id"] = json!(0);
    let resp = send(&app, "POST", "/reservations", Some(body)).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);

    let resp = send(&app, "GET", "/reservations?date=2024-06-01", None).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = send(&app, "DELETE", "/reservations/99", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn theme_lifecycle() {
    let app = app();
    seed(&app).await;

    let resp = send(&app, "GET", "/themes/1", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["data"]["description"], "desc");

    let resp = send(&app, "GET", "/themes/2", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = send(
        &app,
        "POST",
        "/themes",
        Some(json!({"name": "x".repeat(31), "description": "desc"})),
    )
    .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    send(&app, "POST", "/reservations", Some(kelly())).await;
    let resp = send(&app, "DELETE", "/themes/1", None).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);

    send(&app, "DELETE", "/reservations/1", None).await;
    let resp = send(&app, "DELETE", "/themes/1", None).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = send(&app, "GET", "/themes", None).await;
    assert!(resp.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn popular_themes_endpoint_answers() {
    let app = app();
    seed(&app).await;

    let resp = send(&app, "GET", "/themes/popular", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn times_and_availability() {
    let app = app();
    seed(&app).await;

    let resp = send(&app, "POST", "/times", Some(json!({"start_at": "09:00"}))).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.location.as_deref(), Some("/times/2"));

    let resp = send(&app, "POST", "/times", Some(json!({"start_at": "10:00"}))).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);

    let resp = send(&app, "POST", "/times", Some(json!({"start_at": "ten"}))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = send(&app, "GET", "/times", None).await;
    let starts: Vec<&str> = resp.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["start_at"].as_str().unwrap())
        .collect();
    assert_eq!(starts, vec!["09:00", "10:00"]);

    send(&app, "POST", "/reservations", Some(kelly())).await;
    let resp = send(&app, "GET", "/times/available?date=2024-06-01&theme_id=1", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    let slots = resp.body["data"].as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["already_booked"], false);
    assert_eq!(slots[1]["time_id"], 1);
    assert_eq!(slots[1]["already_booked"], true);

    let resp = send(&app, "GET", "/times/available?date=2024-06-01&theme_id=9", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
