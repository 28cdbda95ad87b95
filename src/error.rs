use thiserror::Error;
use actix_web::{ResponseError, HttpResponse, http::StatusCode};
use serde_json::json;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Mail error: {0}")]
    MailError(#[from] MailError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Implement conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

// Add conversion from std::io::Error
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

// Implement actix_web::ResponseError for AppError
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = self.to_string();
        let response = json!({
            "error": {
                "status": status.as_u16(),
                "message": message
            }
        });
        HttpResponse::build(status).json(response)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthError(e) => match e {
                AuthError::DuplicateAccount
                | AuthError::RegistrationFailed
                | AuthError::VerificationFailed(_)
                | AuthError::AccountNotFound
                | AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
                AuthError::AccountNotVerified => StatusCode::UNAUTHORIZED,
                AuthError::HashFormat(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("An account with this email already exists")]
    DuplicateAccount,

    #[error("Registration failed")]
    RegistrationFailed,

    #[error("Verification failed: {0}")]
    VerificationFailed(#[from] TokenError),

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account not verified")]
    AccountNotVerified,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Malformed password hash: {0}")]
    HashFormat(String),
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AuthError::HashFormat(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,

    #[error("Token expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Duplicate record")]
    Duplicate,

    #[error("Migration error: {0}")]
    Migration(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate,
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Connection(err.to_string())
            }
            _ => StoreError::Query(err.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(String),

    #[error("Message build error: {0}")]
    Build(String),

    #[error("Transport error: {0}")]
    Transport(String),
}
