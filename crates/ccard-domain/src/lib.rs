//! ccard-domain
//!
//! Pure domain models (Category, Purchase, StatementPeriod, MonthlyStatement).
//! No I/O, no CLI, no storage. Only data types and the rules that bind them.

pub mod category;
pub mod common;
pub mod error;
pub mod purchase;
pub mod record;
pub mod statement;

pub use category::*;
pub use common::*;
pub use error::DomainError;
pub use purchase::*;
pub use record::*;
pub use statement::*;
