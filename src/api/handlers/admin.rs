use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{AdminLoginRequest, AdminSignupRequest};
use crate::api::dtos::responses::{AdminAuthResponse, AdminProfile};
use crate::domain::models::auth::{Principal, Subject};
use crate::domain::models::admin::Admin;
use crate::error::AppError;
use std::sync::Arc;
use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2, PasswordHash, PasswordVerifier};
use rand::rngs::OsRng;
use tracing::info;

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AdminSignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.admin_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Admin already exists".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let admin = Admin::new(payload.email, password_hash);
    let created = state.admin_repo.create(&admin).await?;

    let token = state.token_service.issue(&Principal::Administrator(Subject {
        id: created.id.clone(),
        email: created.email.clone(),
    }))?;

    info!("Admin created: {}", created.id);

    Ok((
        StatusCode::CREATED,
        Json(AdminAuthResponse {
            message: "Admin created successfully".to_string(),
            token,
            admin: AdminProfile {
                id: created.id,
                email: created.email,
            },
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = state.admin_repo.find_by_email(&payload.email).await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

    let parsed_hash = PasswordHash::new(&admin.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized("Invalid credentials".into()))?;

    let token = state.token_service.issue(&Principal::Administrator(Subject {
        id: admin.id.clone(),
        email: admin.email.clone(),
    }))?;

    info!("Admin logged in: {}", admin.id);

    Ok(Json(AdminAuthResponse {
        message: "Admin login successful".to_string(),
        token,
        admin: AdminProfile {
            id: admin.id,
            email: admin.email,
        },
    }))
}
