pub mod account;
pub mod auth;
pub mod config;
pub mod error;
pub mod mail;

use std::sync::Arc;
use sqlx::postgres::PgPoolOptions;
use actix_web::HttpResponse;

pub use error::{AppError, AuthError, MailError, StoreError, TokenError};
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use account::{Account, AccountStore, PgAccountStore};
pub use auth::{AuthService, TokenService};
pub use mail::{Mailer, SmtpMailer};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub async fn new(config: Settings) -> Result<Self> {
        // Initialize database connection pool and bring the schema up to date
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await
            .map_err(|e| AppError::StoreError(StoreError::Connection(e.to_string())))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::StoreError(StoreError::Migration(e.to_string())))?;

        let store = Arc::new(PgAccountStore::new(Arc::new(pool)));
        let mailer = Arc::new(SmtpMailer::new(&config.mail)?);
        let auth = Arc::new(AuthService::new(
            store,
            mailer,
            &config.auth,
            config.server.public_url.clone(),
        ));

        Ok(Self {
            config: Arc::new(config),
            auth,
        })
    }
}
