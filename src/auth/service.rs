use crate::account::models::Account;
use crate::account::store::AccountStore;
use crate::auth::password;
use crate::auth::token::{SessionClaims, TokenService, VerificationClaims};
use crate::config::AuthConfig;
use crate::error::{AppError, AuthError, StoreError};
use crate::mail::Mailer;
use chrono::Duration;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Whether the verification message made it to the mail transport.
/// Delivery is best-effort: a failed send never rolls back the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Sent,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct RegistrationOutcome {
    pub notification: NotificationStatus,
}

pub struct AuthService {
    store: Arc<dyn AccountStore>,
    mailer: Arc<dyn Mailer>,
    tokens: TokenService,
    verification_ttl: Duration,
    session_ttl: Duration,
    public_url: String,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        mailer: Arc<dyn Mailer>,
        auth_config: &AuthConfig,
        public_url: String,
    ) -> Self {
        Self {
            store,
            mailer,
            tokens: TokenService::new(&auth_config.jwt_secret),
            verification_ttl: Duration::hours(auth_config.verification_expiry_hours),
            session_ttl: Duration::hours(auth_config.session_expiry_hours),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates an unverified account and emails a verification link.
    ///
    /// Uniqueness is left to the store's atomic insert; a collision there
    /// is the authoritative duplicate signal.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegistrationOutcome, AppError> {
        validate_registration(name, email, password)?;

        let password_hash = password::hash(password)?;
        let account = Account::new(name.to_string(), email.to_string(), password_hash);

        let account = self.store.create(account).await.map_err(|e| match e {
            StoreError::Duplicate => AppError::from(AuthError::DuplicateAccount),
            other => {
                error!("Failed to persist account for {}: {}", email, other);
                AuthError::RegistrationFailed.into()
            }
        })?;

        let claims = VerificationClaims::new(&account.email, self.verification_ttl);
        let token = self
            .tokens
            .issue(&claims)
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let url = format!("{}/api/verify/{}", self.public_url, token);
        let body = format!(
            "<h1>Hello, {}</h1><p>Click the link below to verify your account:</p><a href=\"{}\">{}</a>",
            account.name, url, url
        );

        let notification = match self
            .mailer
            .send(&account.email, "Verify your account", &body)
            .await
        {
            Ok(()) => NotificationStatus::Sent,
            Err(e) => {
                warn!("Verification mail to {} failed: {}", account.email, e);
                NotificationStatus::Failed
            }
        };

        info!("Registered account for {}", account.email);
        Ok(RegistrationOutcome { notification })
    }

    /// Consumes a verification token, flipping the account to verified.
    /// Idempotent: re-verifying an already-verified account is harmless.
    pub async fn verify(&self, token: &str) -> Result<(), AppError> {
        let claims: VerificationClaims = self
            .tokens
            .verify(token)
            .map_err(AuthError::VerificationFailed)?;

        let updated = self.store.mark_verified(&claims.email).await?;
        if updated {
            info!("Verified account for {}", claims.email);
        } else {
            // Token was signed by us, so this is stale rather than hostile
            warn!("Verification for unknown account {} ignored", claims.email);
        }

        Ok(())
    }

    /// Checks credentials against a verified account and issues a session
    /// token over its id.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let account = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !account.verified {
            return Err(AuthError::AccountNotVerified.into());
        }

        if !password::verify(password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let claims = SessionClaims::new(account.id, self.session_ttl);
        let token = self
            .tokens
            .issue(&claims)
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!("Login successful for {}", account.email);
        Ok(token)
    }
}

fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError("name must not be empty".into()));
    }
    if password.is_empty() {
        return Err(AppError::ValidationError("password must not be empty".into()));
    }
    if !email.contains('@') || email.contains(char::is_whitespace) {
        return Err(AppError::ValidationError(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_validation() {
        assert!(validate_registration("Alice", "a@x.com", "pw123").is_ok());
        assert!(validate_registration("", "a@x.com", "pw123").is_err());
        assert!(validate_registration("Alice", "a@x.com", "").is_err());
        assert!(validate_registration("Alice", "not-an-email", "pw123").is_err());
        assert!(validate_registration("Alice", "a @x.com", "pw123").is_err());
    }
}
