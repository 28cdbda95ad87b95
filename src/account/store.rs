use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::account::models::Account;
use crate::error::StoreError;

/// Persistence seam for account records.
///
/// Implementations must enforce email uniqueness atomically on insert and
/// report a collision as `StoreError::Duplicate`; callers rely on that
/// signal instead of a check-then-insert.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn create(&self, account: Account) -> Result<Account, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Flips `verified` to true. Returns whether a matching row existed.
    async fn mark_verified(&self, email: &str) -> Result<bool, StoreError>;
}

pub struct PgAccountStore {
    pool: Arc<PgPool>,
}

impl PgAccountStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, name, email, password_hash, verified, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, password_hash, verified, created_at
            "#,
        )
        .bind(account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.verified)
        .bind(account.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password_hash, verified, created_at FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(account)
    }

    async fn mark_verified(&self, email: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE accounts SET verified = TRUE WHERE email = $1")
            .bind(email)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
