pub mod admin;
pub mod auth;
pub mod maybe_auth;

use axum::http::request::Parts;

/// Pulls the raw credential out of an `Authorization: Bearer` header.
pub(crate) fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
