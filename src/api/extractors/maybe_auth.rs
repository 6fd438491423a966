use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use crate::api::extractors::bearer_token;

/// The raw bearer credential, if one was sent. Used where authentication is
/// only required for some branches of a handler.
pub struct MaybeBearer(pub Option<String>);

impl<S> FromRequestParts<S> for MaybeBearer
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeBearer(bearer_token(parts)))
    }
}
