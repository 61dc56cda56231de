pub mod build_info;
pub mod paths;

use std::sync::Once;

use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, writing to stderr so command
/// output on stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
            .add_directive(
                "ccard=info"
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            );

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
