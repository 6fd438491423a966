use travel_backend::{
    api::router::create_router,
    config::Config,
    domain::services::token_service::TokenService,
    infra::repositories::{
        sqlite_admin_repo::SqliteAdminRepo,
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_customer_repo::SqliteCustomerRepo,
    },
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret".to_string(),
            auth_issuer: "test-issuer".to_string(),
            bootstrap_admin_email: None,
            bootstrap_admin_password: None,
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            customer_repo: Arc::new(SqliteCustomerRepo::new(pool.clone())),
            admin_repo: Arc::new(SqliteAdminRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            token_service: Arc::new(TokenService::new(&config)),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Registers a customer and returns (token, customer id).
    pub async fn signup_customer(&self, name: &str, email: &str, password: &str) -> (String, String) {
        let payload = serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
            "phone": "555-0100"
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Customer signup failed in test helper: status {}", response.status());
        }

        let body = body_json(response).await;
        let token = body["token"].as_str().expect("No token in signup body").to_string();
        let id = body["user"]["id"].as_str().expect("No user id in signup body").to_string();

        (token, id)
    }

    /// Registers an administrator and returns (token, admin id).
    pub async fn signup_admin(&self, email: &str, password: &str) -> (String, String) {
        let payload = serde_json::json!({
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Admin signup failed in test helper: status {}", response.status());
        }

        let body = body_json(response).await;
        let token = body["token"].as_str().expect("No token in signup body").to_string();
        let id = body["admin"]["id"].as_str().expect("No admin id in signup body").to_string();

        (token, id)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
