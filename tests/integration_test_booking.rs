mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{body_json, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn create_booking(app: &TestApp, token: Option<&str>, payload: Value) -> axum::response::Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/booking/create")
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    app.router.clone().oneshot(
        builder.body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap()
}

fn ride_payload() -> Value {
    json!({
        "kind": "ride",
        "rideType": "Sedan",
        "pickupLocation": "Airport",
        "destination": "Hotel",
        "pickupDate": "2024-05-01",
        "pickupTime": "10:00",
        "passengers": "2",
        "fullName": "A",
        "email": "a@x.com",
        "phone": "111",
        "totalAmount": 500
    })
}

fn package_payload() -> Value {
    json!({
        "kind": "package",
        "packageName": "Valley Tour",
        "packageId": 1,
        "travelers": "2",
        "startDate": "2024-06-01",
        "endDate": "2024-06-05",
        "fullName": "B",
        "email": "b@x.com",
        "phone": "222",
        "totalAmount": 25999
    })
}

#[tokio::test]
async fn test_ride_booking_is_created_without_credential_and_auto_approved() {
    let app = TestApp::new().await;

    let res = create_booking(&app, None, ride_payload()).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = body_json(res).await;
    assert_eq!(body["booking"]["status"], "approved");
    assert_eq!(body["booking"]["rideType"], "Sedan");
    assert!(body["booking"]["id"].as_str().is_some());
}

#[tokio::test]
async fn test_ride_booking_never_gains_an_owner() {
    let app = TestApp::new().await;
    let (customer_token, _) = app.signup_customer("Rider", "rider@x.com", "pw").await;
    let (admin_token, _) = app.signup_admin("ops@x.com", "pw").await;

    // Even with a valid customer credential attached, a ride stays ownerless.
    let res = create_booking(&app, Some(&customer_token), ride_payload()).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let mine = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/booking/my-bookings")
            .header(header::AUTHORIZATION, format!("Bearer {}", customer_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let mine = body_json(mine).await;
    assert_eq!(mine["bookings"].as_array().unwrap().len(), 0);

    let all = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/booking/all")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let all = body_json(all).await;
    let bookings = all["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["status"], "approved");
    assert!(bookings[0]["user"].is_null());
}

#[tokio::test]
async fn test_package_booking_requires_credential() {
    let app = TestApp::new().await;
    let (admin_token, _) = app.signup_admin("ops@x.com", "pw").await;

    let res = create_booking(&app, None, package_payload()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = create_booking(&app, Some("not-a-real-token"), package_payload()).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // An admin credential is the wrong principal kind for a package booking.
    let res = create_booking(&app, Some(&admin_token), package_payload()).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Nothing was persisted by the failed attempts.
    let all = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/booking/all")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let all = body_json(all).await;
    assert_eq!(all["bookings"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_package_booking_is_pending_and_owned_by_the_caller() {
    let app = TestApp::new().await;
    let (customer_token, customer_id) = app.signup_customer("B", "b@x.com", "pw").await;
    let (admin_token, _) = app.signup_admin("ops@x.com", "pw").await;

    let res = create_booking(&app, Some(&customer_token), package_payload()).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = body_json(res).await;
    assert_eq!(body["booking"]["status"], "pending");
    assert_eq!(body["booking"]["packageName"], "Valley Tour");

    let all = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/booking/all")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let all = body_json(all).await;
    let bookings = all["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["customerId"], customer_id.as_str());
    assert_eq!(bookings[0]["user"]["id"], customer_id.as_str());
    assert_eq!(bookings[0]["user"]["email"], "b@x.com");
    assert_eq!(bookings[0]["travelers"], 2);
}

#[tokio::test]
async fn test_ride_is_inferred_from_field_shape_when_kind_is_absent() {
    let app = TestApp::new().await;

    let mut payload = ride_payload();
    payload.as_object_mut().unwrap().remove("kind");

    let res = create_booking(&app, None, payload).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = body_json(res).await;
    assert_eq!(body["booking"]["status"], "approved");
}

#[tokio::test]
async fn test_payload_with_both_shapes_and_no_kind_is_rejected() {
    let app = TestApp::new().await;

    let mut payload = ride_payload();
    {
        let obj = payload.as_object_mut().unwrap();
        obj.remove("kind");
        obj.insert("packageName".to_string(), json!("Valley Tour"));
    }

    let res = create_booking(&app, None, payload).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_kind_is_rejected() {
    let app = TestApp::new().await;

    let mut payload = ride_payload();
    payload.as_object_mut().unwrap().insert("kind".to_string(), json!("cruise"));

    let res = create_booking(&app, None, payload).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_required_fields_are_rejected() {
    let app = TestApp::new().await;

    let mut payload = ride_payload();
    payload.as_object_mut().unwrap().remove("fullName");
    let res = create_booking(&app, None, payload).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let mut payload = ride_payload();
    payload.as_object_mut().unwrap().remove("totalAmount");
    let res = create_booking(&app, None, payload).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let mut payload = ride_payload();
    payload.as_object_mut().unwrap().insert("totalAmount".to_string(), json!(-5));
    let res = create_booking(&app, None, payload).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_numeric_strings_are_accepted_and_defaults_applied() {
    let app = TestApp::new().await;
    let (admin_token, _) = app.signup_admin("ops@x.com", "pw").await;

    // totalAmount as a string, passengers/tripType/rideId/pickupDate omitted.
    let res = create_booking(&app, None, json!({
        "kind": "ride",
        "rideType": "Van",
        "pickupLocation": "Station",
        "destination": "Museum",
        "pickupTime": "08:30",
        "fullName": "C",
        "email": "c@x.com",
        "phone": "333",
        "totalAmount": "120.50"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let all = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/booking/all")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let all = body_json(all).await;
    let booking = &all["bookings"].as_array().unwrap()[0];

    assert_eq!(booking["totalAmount"].as_f64().unwrap(), 120.50);
    assert_eq!(booking["passengers"], 1);
    assert_eq!(booking["rideId"], 1);
    assert_eq!(booking["tripType"], "oneway");
    assert!(booking["pickupDate"].as_str().is_some());
}
