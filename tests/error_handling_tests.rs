//! Status-code error mapping against a mock gateway

use azampay::{AzamPayClient, AzamPayError, MnoCheckoutPayload, Session};
use mockito::Server;
use serde_json::json;

const PATH: &str = "/azampay/mno/checkout";

fn payload() -> MnoCheckoutPayload {
    MnoCheckoutPayload::new("0700000000", "2000", "TZS", "123", "Airtel")
}

async fn checkout_with(status: usize, body: &str) -> azampay::Result<azampay::MnoCheckoutResponse> {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", PATH)
        .with_status(status)
        .with_body(body)
        .create_async()
        .await;

    let client = AzamPayClient::new(Session::new(server.url(), "tok", "key"));
    client.mobile_checkout(&payload()).await
}

#[tokio::test]
async fn test_empty_success_body() {
    let err = checkout_with(200, "").await.unwrap_err();

    assert!(matches!(err, AzamPayError::EmptyBody { .. }));
    let error_msg = err.to_string();
    assert!(
        error_msg.contains("empty body"),
        "Error message MUST mention the empty body - actual: {}",
        error_msg
    );
}

#[tokio::test]
async fn test_malformed_success_body() {
    let err = checkout_with(200, "{\"success\": tru").await.unwrap_err();
    assert!(matches!(err, AzamPayError::Decode { .. }));
}

#[tokio::test]
async fn test_bad_request() {
    let body = json!({
        "type": "https://tools.ietf.org/html/rfc7231#section-6.5.1",
        "title": "One or more validation errors occurred.",
        "status": 400,
        "traceId": "00-7f1c-01",
        "errors": { "Provider": ["Provider is not supported"] }
    })
    .to_string();

    let err = checkout_with(400, &body).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    let error_msg = err.to_string();
    assert!(
        error_msg.contains("One or more validation errors occurred."),
        "Error message MUST carry the remote title - actual: {}",
        error_msg
    );
    assert!(
        error_msg.contains("Provider: Provider is not supported"),
        "Error message MUST carry the field errors - actual: {}",
        error_msg
    );
    match err {
        AzamPayError::BadRequest { error, .. } => {
            assert_eq!(error.trace_id.as_deref(), Some("00-7f1c-01"));
        }
        other => panic!("expected BadRequest, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized() {
    let body = json!({ "message": "Invalid token", "success": false, "statusCode": 417 }).to_string();

    let err = checkout_with(417, &body).await.unwrap_err();

    assert_eq!(err.status(), Some(417));
    assert_eq!(err.to_string(), "(Mobile Checkout) Unauthorized: Invalid token");
}

#[tokio::test]
async fn test_unauthorized_with_unreadable_body() {
    let err = checkout_with(417, "Expectation Failed").await.unwrap_err();
    assert!(matches!(
        err,
        AzamPayError::ErrorBodyDecode {
            kind: "unauthorized",
            ..
        }
    ));
}

#[tokio::test]
async fn test_internal_server_error_ignores_body() {
    for body in ["", "<html>oops</html>", "{\"message\":\"db down\"}"] {
        let err = checkout_with(500, body).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "(Mobile Checkout) Internal Server Error: status code 500"
        );
    }
}

#[tokio::test]
async fn test_unexpected_status() {
    let err = checkout_with(503, "Service Unavailable").await.unwrap_err();

    assert!(matches!(err, AzamPayError::UnexpectedStatus { status: 503, .. }));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_unreachable_gateway() {
    // Nothing listens on port 9 of localhost.
    let client = AzamPayClient::new(Session::new("http://127.0.0.1:9", "tok", "key"));
    let err = client.mobile_checkout(&payload()).await.unwrap_err();
    assert!(matches!(err, AzamPayError::Http(_)));
}

#[test]
fn test_missing_field_error_message() {
    let error = AzamPayError::MissingField {
        operation: "Bank Checkout",
        field: "merchantMobileNumber".to_string(),
    };
    assert!(error.is_validation());
    assert_eq!(
        error.to_string(),
        "(Bank Checkout) Error: Field 'merchantMobileNumber' is required."
    );
}

#[test]
fn test_config_error() {
    let error = AzamPayError::config("Missing credential: token must be set");
    let error_msg = error.to_string();
    assert!(
        error_msg.contains("Configuration error"),
        "Error message MUST contain 'Configuration error' - actual: {}",
        error_msg
    );
}
