use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),
    #[error("invalid statement period `{0}` (expected MM/YYYY or YYYY-MM)")]
    InvalidPeriod(String),
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("invalid purchase date `{0}`")]
    InvalidDate(String),
    #[error("invalid installment plan: {0}")]
    InvalidInstallments(String),
    #[error("purchase value must be a non-negative number, got {0}")]
    InvalidValue(f64),
    #[error("installment plan required for category `{0}`")]
    MissingInstallments(String),
    #[error("installment plan not allowed for category `{0}`")]
    UnexpectedInstallments(String),
}
