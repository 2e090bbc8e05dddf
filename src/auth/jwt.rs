use std::time::{SystemTime, UNIX_EPOCH};

use crate::{error::AppError, models::Claims};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error};
use tracing::debug;
use uuid::Uuid;

/// Lifetime used when the caller does not ask for one.
pub const DEFAULT_TTL_SECS: u64 = 15 * 60;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or(0)
}

pub fn issue_token(username: &str, ttl: Option<u64>, secret: &str) -> Result<String, Error> {
    let issued_at = now();
    let claims = Claims {
        sub: Some(username.to_string()),
        iat: issued_at,
        exp: issued_at + ttl.unwrap_or(DEFAULT_TTL_SECS) as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Returns the username carried by a valid token. A token is dead from the
/// second named in `exp` onwards.
pub fn validate_token(token: &str, secret: &str) -> Result<String, AppError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        debug!(error = %e, "Token rejected");
        AppError::Unauthenticated
    })?;

    if data.claims.exp <= now() {
        debug!(exp = data.claims.exp, "Token expired");
        return Err(AppError::Unauthenticated);
    }

    data.claims
        .sub
        .filter(|sub| !sub.is_empty())
        .ok_or(AppError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "test-secret";

    fn raw_token(claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_carries_username() {
        let token = issue_token("teacher1", Some(1800), SECRET).unwrap();
        assert_eq!(validate_token(&token, SECRET).unwrap(), "teacher1");
    }

    #[test]
    fn default_lifetime_is_fifteen_minutes() {
        let token = issue_token("admin", None, SECRET).unwrap();
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::default(),
        )
        .unwrap()
        .claims;

        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn rejected_at_expiry() {
        let token = issue_token("admin", Some(0), SECRET).unwrap();
        assert!(matches!(
            validate_token(&token, SECRET),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn rejected_after_expiry() {
        let past = now() - 120;
        let token = raw_token(json!({ "sub": "admin", "iat": past - 60, "exp": past, "jti": "x" }));
        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn rejected_with_other_secret() {
        let token = issue_token("admin", Some(60), "another-secret").unwrap();
        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn rejected_without_subject() {
        let iat = now();
        let token = raw_token(json!({ "iat": iat, "exp": iat + 60, "jti": "x" }));
        assert!(validate_token(&token, SECRET).is_err());

        let token = raw_token(json!({ "sub": "", "iat": iat, "exp": iat + 60, "jti": "x" }));
        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(validate_token("not.a.jwt", SECRET).is_err());
    }
}
