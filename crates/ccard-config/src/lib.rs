//! ccard-config
//!
//! Persistent user preferences: display locale, currency, data location and
//! statement window size.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
