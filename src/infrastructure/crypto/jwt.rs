//! Signed session tokens carried in the session cookie

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::User;

/// Session token configuration
#[derive(Clone)]
pub struct SessionTokenConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Session lifetime in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for SessionTokenConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            expiration_hours: 12,
            issuer: "vendor-analytics".to_string(),
        }
    }
}

impl std::fmt::Debug for SessionTokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenConfig")
            .field("secret", &"***")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// Session claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
}

impl SessionClaims {
    pub fn for_user(user: &User, config: &SessionTokenConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user.id.clone(),
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Create a signed session token for a user
pub fn create_session_token(
    user: &User,
    config: &SessionTokenConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = SessionClaims::for_user(user, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a session token
pub fn verify_session_token(
    token: &str,
    config: &SessionTokenConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: "u-1".into(),
            username: "ann".into(),
            email: "ann@example.com".into(),
            password_hash: String::new(),
            role: UserRole::Admin,
            is_active: true,
            date_joined: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    #[test]
    fn token_roundtrip_carries_identity() {
        let config = SessionTokenConfig::default();
        let token = create_session_token(&user(), &config).unwrap();
        let claims = verify_session_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.username, "ann");
        assert_eq!(claims.role, "admin");
        assert!(!claims.is_expired());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = SessionTokenConfig::default();
        let token = create_session_token(&user(), &config).unwrap();
        let other = SessionTokenConfig {
            secret: "another-secret".into(),
            ..SessionTokenConfig::default()
        };
        assert!(verify_session_token(&token, &other).is_err());
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let config = SessionTokenConfig::default();
        let token = create_session_token(&user(), &config).unwrap();
        let other = SessionTokenConfig {
            issuer: "someone-else".into(),
            ..SessionTokenConfig::default()
        };
        assert!(verify_session_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = SessionTokenConfig {
            expiration_hours: -2,
            ..SessionTokenConfig::default()
        };
        let token = create_session_token(&user(), &config).unwrap();
        assert!(verify_session_token(&token, &config).is_err());
    }
}
