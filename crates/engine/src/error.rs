//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`ExpenseNotFound`] thrown when no expense has the requested id.
//! - [`InvalidExpense`] thrown when an expense breaks a domain invariant.
//! - [`Database`] thrown when the storage layer fails.
//!
//!  [`ExpenseNotFound`]: EngineError::ExpenseNotFound
//!  [`InvalidExpense`]: EngineError::InvalidExpense
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Expense not found with id: {0}")]
    ExpenseNotFound(i64),
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ExpenseNotFound(a), Self::ExpenseNotFound(b)) => a == b,
            (Self::InvalidExpense(a), Self::InvalidExpense(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
