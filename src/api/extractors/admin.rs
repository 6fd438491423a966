use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use crate::api::extractors::bearer_token;
use crate::domain::models::auth::Subject;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::Span;

/// Requires a valid administrator credential. Legacy clients send it three
/// ways; all are canonicalized here, with the Bearer header checked first.
pub struct AuthAdmin(pub Subject);

impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let token = admin_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Admin access token required".into()))?;

        let subject = app_state.token_service.verify_admin(&token)?;

        Span::current().record("principal_id", subject.id.as_str());

        Ok(AuthAdmin(subject))
    }
}

fn admin_token(parts: &Parts) -> Option<String> {
    if let Some(token) = bearer_token(parts) {
        return Some(token);
    }

    if let Some(token) = parts
        .headers
        .get("admin-token")
        .and_then(|h| h.to_str().ok())
        .filter(|t| !t.is_empty())
    {
        return Some(token.to_string());
    }

    // Tokens are base64url, so the raw query value needs no decoding.
    parts
        .uri
        .query()?
        .split('&')
        .find_map(|pair| pair.strip_prefix("token="))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}
