//! Integration tests for exit popup suppression.

use axum::http::StatusCode;

use flightdeck_integration_tests::TestApp;

#[tokio::test]
async fn test_popup_shows_until_dismissed() {
    let mut app = TestApp::new();

    let body = app.get("/api/exit-popup").await.json();
    assert_eq!(body["show"], true);
    assert!(body["dismissed_at"].is_null());

    let response = app.post("/api/exit-popup/dismiss").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["show"], false);

    let body = app.get("/api/exit-popup").await.json();
    assert_eq!(body["show"], false);
    assert!(body["dismissed_at"].is_string());
}

#[tokio::test]
async fn test_dismissal_is_per_visitor() {
    let mut app = TestApp::new();
    app.post("/api/exit-popup/dismiss").await;

    let mut other = app.visitor();
    let body = other.get("/api/exit-popup").await.json();
    assert_eq!(body["show"], true);
}

#[tokio::test]
async fn test_zero_suppression_always_shows() {
    let mut app = TestApp::with_config(|config| config.exit_popup_suppress_days = 0);
    app.post("/api/exit-popup/dismiss").await;

    let body = app.get("/api/exit-popup").await.json();
    assert_eq!(body["show"], true);
}
