use serde::{Deserialize, Serialize};

pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub email: String,
    pub role: String,
}

/// The identity carried by a verified credential.
#[derive(Debug, Clone)]
pub struct Subject {
    pub id: String,
    pub email: String,
}

/// Both principal kinds share one token format; verification resolves the
/// role claim into a typed principal so handlers never re-check roles.
#[derive(Debug, Clone)]
pub enum Principal {
    Customer(Subject),
    Administrator(Subject),
}

impl Principal {
    pub fn subject(&self) -> &Subject {
        match self {
            Principal::Customer(s) => s,
            Principal::Administrator(s) => s,
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Principal::Customer(_) => ROLE_CUSTOMER,
            Principal::Administrator(_) => ROLE_ADMIN,
        }
    }
}
