//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when an item is not found.
//! - [`ExistingKey`] thrown when a unique item already exists.
//! - [`Forbidden`] thrown when a caller touches somebody else's data.
//! - [`InvalidInput`] thrown when a request fails validation.
//! - [`InsufficientData`] thrown when a computation has nothing to work on.
//! - [`Advisor`] wrapping failures of the language-model client.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`InsufficientData`]: EngineError::InsufficientData
//!  [`Advisor`]: EngineError::Advisor
use sea_orm::DbErr;
use thiserror::Error;

use crate::advisor::AdvisorError;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
    #[error(transparent)]
    Advisor(#[from] AdvisorError),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::InsufficientData(a), Self::InsufficientData(b)) => a == b,
            (Self::Advisor(a), Self::Advisor(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
