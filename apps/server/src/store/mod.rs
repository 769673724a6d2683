//! In-memory stores backing the plain CRUD endpoints.

pub mod messages;
pub mod users;

use thiserror::Error;

pub use messages::{Message, MessageLog, NewMessage};
pub use users::{NewUser, User, UserStore, UserUpdate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Treat absent and blank strings alike
fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
