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

/// Requires a valid customer bearer credential: missing token is 401,
/// invalid or wrong-kind token is 403.
pub struct AuthCustomer(pub Subject);

impl<S> FromRequestParts<S> for AuthCustomer
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Access token required".into()))?;

        let subject = app_state.token_service.verify_customer(&token)?;

        Span::current().record("principal_id", subject.id.as_str());

        Ok(AuthCustomer(subject))
    }
}
