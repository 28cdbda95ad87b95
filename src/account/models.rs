use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Opaque bcrypt output. Never leaves the process.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            verified: false,
            created_at: Utc::now(),
        }
    }
}
