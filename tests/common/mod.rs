use async_trait::async_trait;
use kamuza_server::account::{Account, AccountStore};
use kamuza_server::error::{MailError, StoreError};
use kamuza_server::mail::Mailer;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory store double honoring the same unique-insert contract as the
/// Postgres store.
#[derive(Default)]
pub struct MemoryStore {
    accounts: Mutex<HashMap<String, Account>>,
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&account.email) {
            return Err(StoreError::Duplicate);
        }
        accounts.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.lock().unwrap().get(email).cloned())
    }

    async fn mark_verified(&self, email: &str) -> Result<bool, StoreError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(email) {
            Some(account) => {
                account.verified = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Debug)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mailer double that records every message instead of delivering it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Pulls the verification token out of a recorded mail body.
pub fn token_from_body(body: &str) -> String {
    let marker = "/api/verify/";
    let start = body.find(marker).expect("verification link missing") + marker.len();
    let rest = &body[start..];
    let end = rest.find('"').unwrap_or(rest.len());
    rest[..end].to_string()
}
