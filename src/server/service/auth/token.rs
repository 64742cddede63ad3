//! HS256 access tokens.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::server::{
    config::Config,
    error::{auth::AuthError, AppError},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AuthError::InvalidToken("subject is not a UUID".to_string()))
    }
}

/// Signs a token for `user_id` valid for `config.jwt_ttl_seconds`.
///
/// # Returns
/// - `Ok((token, expires_in))` - Encoded JWT and its lifetime in seconds
pub fn issue_token(user_id: Uuid, config: &Config) -> Result<(String, i64), AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + config.jwt_ttl_seconds,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Failed to sign token: {}", e)))?;

    Ok((token, config.jwt_ttl_seconds))
}

/// Verifies signature, issuer and expiry.
pub fn decode_token(token: &str, config: &Config) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken(e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::config::test_config;

    #[test]
    fn round_trips_subject() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let (token, expires_in) = issue_token(user_id, &config).unwrap();
        let claims = decode_token(&token, &config).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.iss, config.jwt_issuer);
        assert_eq!(expires_in, config.jwt_ttl_seconds);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let config = test_config();
        let mut other = test_config();
        other.jwt_secret = "another-secret".to_string();

        let (token, _) = issue_token(Uuid::new_v4(), &other).unwrap();

        assert!(matches!(
            decode_token(&token, &config),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let mut config = test_config();
        config.jwt_ttl_seconds = -120;

        let (token, _) = issue_token(Uuid::new_v4(), &config).unwrap();

        assert!(matches!(
            decode_token(&token, &config),
            Err(AuthError::TokenExpired)
        ));
    }
}
