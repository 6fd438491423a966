use crate::domain::models::auth::{Claims, Principal, Subject, ROLE_ADMIN, ROLE_CUSTOMER};
use crate::error::AppError;
use crate::config::Config;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use chrono::{Duration, Utc};

const TOKEN_LIFETIME_DAYS: i64 = 7;

/// Issues and verifies the bearer credentials for both principal kinds.
/// Verification is a pure check; no state is consulted.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.auth_issuer.clone(),
        }
    }

    pub fn issue(&self, principal: &Principal) -> Result<String, AppError> {
        let now = Utc::now();
        let subject = principal.subject();

        let claims = Claims {
            iss: self.issuer.clone(),
            sub: subject.id.clone(),
            exp: (now + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp() as usize,
            iat: now.timestamp() as usize,
            email: subject.email.clone(),
            role: principal.role().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })
    }

    pub fn verify(&self, token: &str) -> Result<Principal, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::Forbidden("Invalid token".into()))?;

        let subject = Subject {
            id: data.claims.sub,
            email: data.claims.email,
        };

        match data.claims.role.as_str() {
            ROLE_CUSTOMER => Ok(Principal::Customer(subject)),
            ROLE_ADMIN => Ok(Principal::Administrator(subject)),
            _ => Err(AppError::Forbidden("Invalid token".into())),
        }
    }

    pub fn verify_customer(&self, token: &str) -> Result<Subject, AppError> {
        match self.verify(token)? {
            Principal::Customer(subject) => Ok(subject),
            Principal::Administrator(_) => Err(AppError::Forbidden("Invalid token".into())),
        }
    }

    pub fn verify_admin(&self, token: &str) -> Result<Subject, AppError> {
        match self.verify(token)? {
            Principal::Administrator(subject) => Ok(subject),
            Principal::Customer(_) => Err(AppError::Forbidden("Invalid admin token".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        let config = Config {
            database_url: "sqlite://:memory:".to_string(),
            port: 0,
            jwt_secret: "test-secret".to_string(),
            auth_issuer: "test-issuer".to_string(),
            bootstrap_admin_email: None,
            bootstrap_admin_password: None,
        };
        TokenService::new(&config)
    }

    fn subject() -> Subject {
        Subject {
            id: "some-id".to_string(),
            email: "p@example.com".to_string(),
        }
    }

    #[test]
    fn customer_token_round_trips() {
        let svc = service();
        let token = svc.issue(&Principal::Customer(subject())).unwrap();
        let verified = svc.verify_customer(&token).unwrap();
        assert_eq!(verified.id, "some-id");
    }

    #[test]
    fn customer_token_is_not_an_admin_token() {
        let svc = service();
        let token = svc.issue(&Principal::Customer(subject())).unwrap();
        assert!(matches!(svc.verify_admin(&token), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn garbage_token_is_forbidden() {
        let svc = service();
        assert!(matches!(svc.verify("not-a-jwt"), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn token_from_another_issuer_is_rejected() {
        let svc = service();
        let other = {
            let config = Config {
                database_url: "sqlite://:memory:".to_string(),
                port: 0,
                jwt_secret: "test-secret".to_string(),
                auth_issuer: "other-issuer".to_string(),
                bootstrap_admin_email: None,
                bootstrap_admin_password: None,
            };
            TokenService::new(&config)
        };
        let token = other.issue(&Principal::Administrator(subject())).unwrap();
        assert!(svc.verify(&token).is_err());
    }
}
