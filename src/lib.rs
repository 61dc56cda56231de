#![doc(test(attr(deny(warnings))))]

//! ccard tracks credit-card purchases and groups them into monthly
//! statements, with a terminal shell on top of the statement and summary
//! services.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("ccard tracing initialized.");
    });
}
