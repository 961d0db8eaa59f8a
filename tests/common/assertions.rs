//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a PDF document served as a download
pub fn assert_pdf(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_pdf(),
        "Expected PDF document, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    // Check Content-Type header
    let content_type = response.header("content-type");
    assert_eq!(
        content_type,
        Some("application/pdf"),
        "Expected Content-Type: application/pdf"
    );
}

/// Assert JSON error response has expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
}

/// Assert response has the given Content-Type
pub fn assert_content_type(response: &TestResponse, expected: &str) {
    assert_eq!(
        response.header("content-type"),
        Some(expected),
        "Wrong Content-Type for response"
    );
}
