use axum::http::StatusCode;
use chrono::NaiveDate;
use nailsync_api::routes::health::{HealthResponse, VersionResponse};
use nailsync_core::availability::SlotConfig;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_and_version() {
    let server = TestContext::new().server();

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<HealthResponse>().status, "ok");

    let version = server.get("/version").await;
    version.assert_status_ok();
    assert_eq!(version.json::<VersionResponse>().name, "nailsync-api");
}

#[tokio::test]
async fn test_config_endpoint_reports_active_settings() {
    let mut ctx = TestContext::new();
    ctx.slot_config.granularity_minutes = 15;
    let server = ctx.server();

    let response = server.get("/api/availability/config").await;

    response.assert_status_ok();
    let config = response.json::<SlotConfig>();
    assert_eq!(config.granularity_minutes, 15);
    assert_eq!(config.average_service_minutes, 90);
}

#[tokio::test]
async fn test_slots_rejects_long_horizon_before_touching_database() {
    let server = TestContext::new().server();

    let response = server.get("/api/availability/slots?days=40").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("days must be at most 31"));
}

#[tokio::test]
async fn test_slots_rejects_zero_limit() {
    let server = TestContext::new().server();

    let response = server.get("/api/availability/slots?limit=0").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_slots_rejects_malformed_date() {
    let server = TestContext::new().server();

    let response = server.get("/api/availability/slots?from=20-05-2024").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_slots_rejects_window_past_last_date() {
    let server = TestContext::new().server();

    let last = NaiveDate::MAX.to_string().replace('+', "%2B");

    let response = server
        .get(&format!("/api/availability/slots?from={}", last))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("runs past the last supported date"));
}
