//! Account records and the store they live in.
//!
//! The store is an injected collaborator so the authentication flow can be
//! exercised against test doubles.

pub mod models;
pub mod store;

pub use models::Account;
pub use store::{AccountStore, PgAccountStore};
