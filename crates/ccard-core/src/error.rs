use ccard_domain::{DomainError, StatementPeriod};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Purchase already exists: {0}")]
    DuplicatePurchase(String),
    #[error("Purchase not found: {0}")]
    PurchaseNotFound(String),
    #[error("Statement {0} is outside the available months")]
    PeriodOutOfRange(StatementPeriod),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
