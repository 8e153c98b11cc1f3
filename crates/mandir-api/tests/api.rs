use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use mandir_api::notify::Notifier;
use mandir_api::{AppState, AppStateInner};
use mandir_db::Database;
use mandir_payments::{Merchant, PAYMENT_WINDOW_SECS, PaymentWindows};
use mandir_types::models::RecordKind;

const SECRET: &str = "test-secret";

fn app() -> Router {
    app_with_notifier(Notifier::disabled())
}

fn app_with_notifier(notifier: Notifier) -> Router {
    let state: AppState = Arc::new(AppStateInner {
        db: Database::open_in_memory().unwrap(),
        jwt_secret: SECRET.to_string(),
        merchant: Merchant::new("shivtemple@sbi", "Shiv Temple").unwrap(),
        windows: PaymentWindows::new(PAYMENT_WINDOW_SECS),
        notifier,
    });
    mandir_api::router(state)
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": email, "password": "om-namah-shivaya", "full_name": "Ravi Shah" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["token"].as_str().unwrap().to_string()
}

fn future_date() -> String {
    (chrono::Utc::now().date_naive() + chrono::Duration::days(7))
        .format("%Y-%m-%d")
        .to_string()
}

fn booking_body(service: &str, date: &str, slot: &str) -> Value {
    json!({
        "pooja_service": service,
        "booking_date": date,
        "booking_time": slot,
        "full_name": "Ravi Shah",
        "email": "ravi@example.com",
        "phone": "9000000000",
        "occasion": "Birthday",
        "special_requests": ""
    })
}

#[tokio::test]
async fn upi_intent_matches_requested_amount_and_purpose() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/payments/upi-intent",
        None,
        Some(json!({ "amount": 501, "purpose": "Rudrabhishek booking", "userDetails": { "name": "Ravi" } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["paymentMethod"], "upi");
    assert_eq!(body["expiresInSecs"], 600);

    let qr = &body["qrCode"];
    let url = qr["upiUrl"].as_str().unwrap();
    assert!(url.starts_with("upi://pay?pa=shivtemple@sbi&pn=Shiv%20Temple&"));
    assert!(url.contains("&am=501&"));
    assert!(url.contains("&cu=INR&"));
    assert!(url.ends_with("&tn=Rudrabhishek%20booking"));
    assert_eq!(qr["upiId"], "shivtemple@sbi");
    assert_eq!(qr["amount"], 501.0);
    assert_eq!(qr["purpose"], "Rudrabhishek booking");
    assert_eq!(qr["merchantName"], "Shiv Temple");

    let intent_id = qr["id"].as_str().unwrap();
    let (status, window) = send(&app, Method::GET, &format!("/payments/intents/{}", intent_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(window["state"], "active");
    assert!(window["remainingSecs"].as_u64().unwrap() <= 600);
}

#[tokio::test]
async fn upi_intent_rejects_bad_amount() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/payments/upi-intent",
        None,
        Some(json!({ "amount": 0, "purpose": "General donation" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("positive"));
}

#[tokio::test]
async fn anonymous_donation_goes_pending_then_completed() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/donations",
        None,
        Some(json!({
            "donor_name": "Asha Patel",
            "email": "asha@example.com",
            "phone": "9979862507",
            "amount": 1000,
            "donation_type": "Annadaan",
            "message": "For prasadam"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    let donation = &body["donation"];
    assert_eq!(donation["payment_status"], "pending");
    assert_eq!(donation["payment_id"], Value::Null);
    assert_eq!(donation["user_id"], Value::Null);
    let url = body["payment"]["qrCode"]["upiUrl"].as_str().unwrap();
    assert!(url.contains("&am=1000&"));
    assert!(url.ends_with("&tn=Annadaan%20donation"));

    let id: Uuid = donation["id"].as_str().unwrap().parse().unwrap();
    let intent_id = body["payment"]["qrCode"]["id"].as_str().unwrap().to_string();
    let (status, result) = send(
        &app,
        Method::POST,
        "/payments/process",
        None,
        Some(json!({
            "amount": 1000,
            "currency": "INR",
            "orderId": RecordKind::Donation.order_id(id),
            "type": "donation",
            "donationData": donation,
            "intentId": intent_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", result);
    assert_eq!(result["success"], true);
    let payment_id = result["paymentId"].as_str().unwrap();
    assert!(payment_id.starts_with("pay_"));

    let (status, stored) = send(&app, Method::GET, &format!("/donations/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["payment_status"], "completed");
    assert_eq!(stored["payment_id"], payment_id);

    // Acknowledged intents no longer count down
    let (status, _) = send(&app, Method::GET, &format!("/payments/intents/{}", intent_id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn donation_requires_fields() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/donations",
        None,
        Some(json!({
            "donor_name": "  ",
            "email": "asha@example.com",
            "phone": "9979862507",
            "amount": 1000,
            "donation_type": "General"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        Method::POST,
        "/donations",
        None,
        Some(json!({
            "donor_name": "Asha",
            "email": "asha@example.com",
            "phone": "9979862507",
            "amount": -5,
            "donation_type": "General"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signed_in_donation_is_private() {
    let app = app();
    let token = register(&app, "donor@example.com").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/donations",
        Some(&token),
        Some(json!({
            "donor_name": "Ravi Shah",
            "email": "donor@example.com",
            "phone": "9000000000",
            "amount": 2500,
            "donation_type": "General"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["donation"]["user_id"].is_string());

    let uri = format!("/donations/{}", body["donation"]["id"].as_str().unwrap());
    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::POST, "/donations", Some("not-a-token"), Some(json!({}))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn booking_requires_sign_in() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/bookings",
        None,
        Some(booking_body("rudrabhishek", &future_date(), "6:00 AM")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Please sign in to continue.");
}

#[tokio::test]
async fn booking_uses_catalog_price_and_completes() {
    let app = app();
    let token = register(&app, "ravi@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/bookings",
        Some(&token),
        Some(booking_body("rudrabhishek", &future_date(), "6:00 AM")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    let booking = &body["booking"];
    assert_eq!(booking["pooja_service"], "Rudrabhishek");
    assert_eq!(booking["amount"], 1100.0);
    assert_eq!(booking["payment_status"], "pending");
    assert_eq!(booking["special_requests"], Value::Null);
    let url = body["payment"]["qrCode"]["upiUrl"].as_str().unwrap();
    assert!(url.contains("&am=1100&"));
    assert!(url.ends_with("&tn=Rudrabhishek%20booking"));

    let id: Uuid = booking["id"].as_str().unwrap().parse().unwrap();
    let (status, list) = send(&app, Method::GET, "/bookings", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, result) = send(
        &app,
        Method::POST,
        "/payments/process",
        None,
        Some(json!({ "orderId": RecordKind::Pooja.order_id(id), "type": "pooja" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", result);

    let (status, stored) = send(&app, Method::GET, &format!("/bookings/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["payment_status"], "completed");
    assert_eq!(stored["payment_id"], result["paymentId"]);

    // Someone else cannot see it
    let other = register(&app, "other@example.com").await;
    let (status, _) = send(&app, Method::GET, &format!("/bookings/{}", id), Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn booking_validation() {
    let app = app();
    let token = register(&app, "ravi@example.com").await;

    for body in [
        booking_body("unknown-pooja", &future_date(), "6:00 AM"),
        booking_body("abhishek", "2000-01-01", "6:00 AM"),
        booking_body("abhishek", "08/03/2030", "6:00 AM"),
        booking_body("abhishek", &future_date(), "6:30 AM"),
    ] {
        let (status, response) = send(&app, Method::POST, "/bookings", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", response);
    }

    let (_, list) = send(&app, Method::GET, "/bookings", Some(&token), None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn processing_unknown_record_is_not_found() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/payments/process",
        None,
        Some(json!({ "orderId": RecordKind::Pooja.order_id(Uuid::new_v4()), "type": "pooja" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/payments/process",
        None,
        Some(json!({ "orderId": "booking_1", "type": "pooja", "currency": "USD" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contact_form() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/contact",
        None,
        Some(json!({ "name": "Meera", "email": "meera@example.com", "phone": "9999999999", "message": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please fill in a message.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/contact",
        None,
        Some(json!({
            "name": "Meera",
            "email": "meera@example.com",
            "phone": "9999999999",
            "message": "What are the aarti timings?"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "What are the aarti timings?");
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn missing_fields_get_form_messages() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/contact", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please fill in your name.");

    let (status, body) = send(&app, Method::POST, "/donations", None, Some(json!({ "donor_name": "Asha" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_requests_use_error_body() {
    let app = app();

    // Wrong type for a field
    let (status, body) = send(
        &app,
        Method::POST,
        "/donations",
        None,
        Some(json!({
            "donor_name": "Asha",
            "email": "asha@example.com",
            "phone": "9979862507",
            "amount": "a lot",
            "donation_type": "General"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::POST, "/payments/process", None, Some(json!({ "type": "pooja" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::GET, "/donations/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let token = register(&app, "ravi@example.com").await;
    let (status, body) = send(&app, Method::GET, "/bookings/not-a-uuid", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unreachable_webhook_does_not_fail_requests() {
    // Nothing listens on the discard port in test environments
    let app = app_with_notifier(Notifier::new(Some("http://127.0.0.1:9/hook".into())));
    let (status, body) = send(
        &app,
        Method::POST,
        "/contact",
        None,
        Some(json!({
            "name": "Meera",
            "email": "meera@example.com",
            "phone": "9999999999",
            "message": "Is the temple open on Mahashivratri night?"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn concurrent_registrations_for_one_email() {
    let app = app();
    let body = json!({ "email": "twice@example.com", "password": "om-namah-shivaya" });
    let (first, second) = tokio::join!(
        send(&app, Method::POST, "/auth/register", None, Some(body.clone())),
        send(&app, Method::POST, "/auth/register", None, Some(body.clone())),
    );

    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
    let conflict = if first.0 == StatusCode::CONFLICT { first.1 } else { second.1 };
    assert_eq!(conflict["error"], "An account with this email already exists.");
}

#[tokio::test]
async fn accounts_and_profiles() {
    let app = app();
    let token = register(&app, "Devotee@Example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": "devotee@example.com", "password": "another-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "devotee@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, login) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "devotee@example.com", "password": "om-namah-shivaya" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["email"], "devotee@example.com");

    let (status, profile) = send(&app, Method::GET, "/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["full_name"], "Ravi Shah");
    assert_eq!(profile["phone"], Value::Null);

    let (status, profile) = send(
        &app,
        Method::PUT,
        "/profile",
        Some(&token),
        Some(json!({ "phone": "9979862507" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["full_name"], "Ravi Shah");
    assert_eq!(profile["phone"], "9979862507");

    let (status, _) = send(&app, Method::GET, "/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalog_endpoints() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/catalog/poojas", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"].as_array().unwrap().len(), 4);
    assert_eq!(body["time_slots"][0], "6:00 AM");

    let (_, amounts) = send(&app, Method::GET, "/catalog/donation-amounts", None, None).await;
    assert_eq!(amounts, json!([500, 1000, 2500, 5000, 10000]));

    let (_, announcements) = send(&app, Method::GET, "/announcements", None, None).await;
    assert_eq!(announcements[0]["type"], "festival");

    let (status, health) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
}
