use chrono::{Duration, Utc};
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation, Algorithm};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TokenError;

/// Claims carried by an email-verification link.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerificationClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl VerificationClaims {
    pub fn new(email: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Claims carried by a login session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // Account ID
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(account_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Issues and verifies HMAC-signed expiring tokens over a shared secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn issue<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let token = encode(&Header::default(), claims, &self.encoding)?;
        Ok(token)
    }

    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let data = decode::<T>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = TokenService::new("test_secret");
        let claims = VerificationClaims::new("a@x.com", Duration::hours(24));

        let token = service.issue(&claims).unwrap();
        let decoded: VerificationClaims = service.verify(&token).unwrap();

        assert_eq!(decoded.email, "a@x.com");
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn test_session_claims_carry_account_id() {
        let service = TokenService::new("test_secret");
        let account_id = Uuid::new_v4();
        let claims = SessionClaims::new(account_id, Duration::hours(24));

        let token = service.issue(&claims).unwrap();
        let decoded: SessionClaims = service.verify(&token).unwrap();

        assert_eq!(decoded.sub, account_id.to_string());
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let service = TokenService::new("test_secret");
        let claims = VerificationClaims::new("a@x.com", Duration::hours(24));
        let token = service.issue(&claims).unwrap();

        let other = TokenService::new("other_secret");
        let result = other.verify::<VerificationClaims>(&token);
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let service = TokenService::new("test_secret");
        let result = service.verify::<VerificationClaims>("not.a.token");
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let service = TokenService::new("test_secret");
        // Well past the decoder's default leeway
        let claims = VerificationClaims::new("a@x.com", Duration::hours(-1));
        let token = service.issue(&claims).unwrap();

        let result = service.verify::<VerificationClaims>(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }
}
