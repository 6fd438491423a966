use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::admin::AuthAdmin;
use crate::api::dtos::requests::{LoginRequest, SignupRequest};
use crate::api::dtos::responses::{CustomerAuthResponse, CustomerListResponse, CustomerProfile};
use crate::domain::models::auth::Principal;
use crate::domain::models::customer::Customer;
use crate::error::AppError;
use std::sync::Arc;
use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2, PasswordHash, PasswordVerifier};
use rand::rngs::OsRng;
use tracing::info;

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.customer_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let customer = Customer::new(payload.name, payload.email, payload.phone, password_hash);
    let created = state.customer_repo.create(&customer).await?;

    let token = state.token_service.issue(&Principal::Customer(subject_of(&created)))?;

    info!("Customer signed up: {}", created.id);

    Ok((
        StatusCode::CREATED,
        Json(CustomerAuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: profile_of(created),
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state.customer_repo.find_by_email(&payload.email).await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

    let parsed_hash = PasswordHash::new(&customer.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized("Invalid credentials".into()))?;

    let token = state.token_service.issue(&Principal::Customer(subject_of(&customer)))?;

    info!("Customer logged in: {}", customer.id);

    Ok(Json(CustomerAuthResponse {
        message: "Login successful".to_string(),
        token,
        user: profile_of(customer),
    }))
}

pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    _admin: AuthAdmin,
) -> Result<impl IntoResponse, AppError> {
    let customers = state.customer_repo.list().await?;
    let users = customers.into_iter().map(profile_of).collect();

    Ok(Json(CustomerListResponse { users }))
}

fn subject_of(customer: &Customer) -> crate::domain::models::auth::Subject {
    crate::domain::models::auth::Subject {
        id: customer.id.clone(),
        email: customer.email.clone(),
    }
}

fn profile_of(customer: Customer) -> CustomerProfile {
    CustomerProfile {
        id: customer.id,
        name: customer.name,
        email: customer.email,
        phone: customer.phone,
    }
}
