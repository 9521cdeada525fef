//! Signed session tokens (HS256 JWT).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RequestContext;
use crate::config::SessionSettings;
use crate::error::{AppError, AppResult};
use crate::models::Role;

/// Issuer claim for session tokens.
pub const SESSION_ISSUER: &str = "field-service";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iss: String,
    pub exp: usize,
    pub iat: usize,
    pub full_name: Option<String>,
    pub role: String,
}

/// Signing material for session tokens, shared as app data.
#[derive(Clone)]
pub struct SessionKeys {
    secret: SecretString,
    ttl_secs: u64,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("secret", &"[REDACTED]")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl SessionKeys {
    pub fn new(secret: SecretString, ttl_secs: u64) -> Self {
        Self { secret, ttl_secs }
    }

    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self::new(settings.secret.clone(), settings.ttl_secs)
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Issue a token for `ctx`. Returns the token and its expiry.
    pub fn issue(&self, ctx: &RequestContext) -> AppResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.ttl_secs as i64);

        let claims = SessionClaims {
            sub: ctx.user_id.to_string(),
            iss: SESSION_ISSUER.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
            full_name: ctx.full_name.clone(),
            role: ctx.role.as_str().to_string(),
        };

        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let token = encode(&Header::default(), &claims, &key)
            .map_err(|e| AppError::InvalidInput(format!("Failed to create session token: {}", e)))?;
        Ok((token, expires_at))
    }

    /// Verify a token and rebuild the caller context from its claims.
    pub fn verify(&self, token: &str) -> Result<RequestContext, String> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[SESSION_ISSUER]);
        validation.validate_aud = false;

        let claims = decode::<SessionClaims>(token, &key, &validation)
            .map_err(|e| format!("Invalid session token: {}", e))?
            .claims;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| "Invalid session token: bad subject".to_string())?;
        let role = Role::parse(&claims.role)
            .ok_or_else(|| "Invalid session token: unknown role".to_string())?;

        Ok(RequestContext {
            user_id,
            full_name: claims.full_name,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(secret: &str) -> SessionKeys {
        SessionKeys::new(SecretString::from(secret.to_string()), 3600)
    }

    fn ctx(role: Role) -> RequestContext {
        RequestContext {
            user_id: Uuid::new_v4(),
            full_name: Some("Ana Ruiz".to_string()),
            role,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = keys("test-secret");
        let original = ctx(Role::Coordinator);
        let (token, expires_at) = keys.issue(&original).unwrap();

        assert!(expires_at > Utc::now());
        let verified = keys.verify(&token).unwrap();
        assert_eq!(verified, original);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (token, _) = keys("one").issue(&ctx(Role::Technician)).unwrap();
        assert!(keys("two").verify(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(keys("one").verify("not-a-token").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = keys("test-secret");
        let past = Utc::now() - Duration::hours(2);
        let claims = SessionClaims {
            sub: Uuid::new_v4().to_string(),
            iss: SESSION_ISSUER.to_string(),
            exp: past.timestamp() as usize,
            iat: (past - Duration::hours(1)).timestamp() as usize,
            full_name: None,
            role: "mecanico".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", keys("super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
