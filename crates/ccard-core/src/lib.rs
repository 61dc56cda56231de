//! ccard-core
//!
//! Statement assignment, aggregation and purchase collection management.
//! Depends on ccard-domain. No CLI, no terminal I/O, no direct file access.

pub mod browser;
pub mod error;
pub mod format;
pub mod purchase_book;
pub mod purchase_service;
pub mod statement_service;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use browser::*;
pub use error::CoreError;
pub use purchase_book::*;
pub use purchase_service::*;
pub use statement_service::*;
pub use summary_service::*;
