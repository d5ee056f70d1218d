//! The module contains the errors the engine can throw.

use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Input failed a validation rule. The message names the rule and is
    /// safe to return to the client.
    #[error("{0}")]
    Validation(String),
    /// Unknown username or wrong password. One variant for both so the
    /// response cannot be used to enumerate accounts.
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("{0} already exists")]
    ExistingKey(String),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            (Self::PasswordHash(a), Self::PasswordHash(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
