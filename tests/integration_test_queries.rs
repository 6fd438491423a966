mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{body_json, TestApp};
use serde_json::json;
use tower::ServiceExt;

async fn create_package(app: &TestApp, token: &str, package_name: &str) {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/booking/create")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(json!({
                "kind": "package",
                "packageName": package_name,
                "travelers": 1,
                "fullName": "Someone",
                "email": "someone@x.com",
                "phone": "999",
                "totalAmount": 1000
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_my_bookings_only_returns_the_callers_bookings() {
    let app = TestApp::new().await;
    let (token_a, _) = app.signup_customer("Alice", "alice@x.com", "pw").await;
    let (token_b, _) = app.signup_customer("Bob", "bob@x.com", "pw").await;

    create_package(&app, &token_a, "Alice Trip").await;
    create_package(&app, &token_b, "Bob Trip").await;

    let mine = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/booking/my-bookings")
            .header(header::AUTHORIZATION, format!("Bearer {}", token_a))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let mine = body_json(mine).await;

    let bookings = mine["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["packageName"], "Alice Trip");
}

#[tokio::test]
async fn test_bookings_are_listed_newest_first() {
    let app = TestApp::new().await;
    let (token, _) = app.signup_customer("Alice", "alice@x.com", "pw").await;

    create_package(&app, &token, "First Trip").await;
    create_package(&app, &token, "Second Trip").await;

    let mine = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/booking/my-bookings")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let mine = body_json(mine).await;

    let bookings = mine["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0]["packageName"], "Second Trip");
    assert_eq!(bookings[1]["packageName"], "First Trip");
}

#[tokio::test]
async fn test_admin_list_joins_owner_profiles() {
    let app = TestApp::new().await;
    let (customer_token, customer_id) = app.signup_customer("Alice", "alice@x.com", "pw").await;
    let (admin_token, _) = app.signup_admin("ops@x.com", "pw").await;

    create_package(&app, &customer_token, "Alice Trip").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/booking/create")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "kind": "ride",
                "rideType": "Sedan",
                "pickupLocation": "Airport",
                "destination": "Hotel",
                "pickupTime": "10:00",
                "fullName": "Walk-in",
                "email": "walkin@x.com",
                "phone": "000",
                "totalAmount": 75
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let all = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/booking/all")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let all = body_json(all).await;

    let bookings = all["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 2);

    // Newest first: the ride was created last.
    assert_eq!(bookings[0]["kind"], "ride");
    assert!(bookings[0]["user"].is_null());

    assert_eq!(bookings[1]["kind"], "package");
    assert_eq!(bookings[1]["user"]["id"], customer_id.as_str());
    assert_eq!(bookings[1]["user"]["name"], "Alice");
    assert_eq!(bookings[1]["user"]["email"], "alice@x.com");
}

#[tokio::test]
async fn test_my_bookings_requires_a_customer_credential() {
    let app = TestApp::new().await;
    let (admin_token, _) = app.signup_admin("ops@x.com", "pw").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/booking/my-bookings")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/booking/my-bookings")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/health")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    assert_eq!(body["status"], "OK");
}
