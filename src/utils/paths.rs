use dirs::home_dir;
use std::{env, path::PathBuf};

use ccard_config::Config;

/// Overrides the application home (config and purchase data).
pub const HOME_ENV: &str = "CCARD_HOME";
const DEFAULT_DIR_NAME: &str = ".ccard";

/// Returns the application directory, defaulting to `~/.ccard`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the purchase document: `CCARD_HOME` when set, otherwise
/// the configured `data_dir`, otherwise `~/.ccard`.
pub fn data_dir(config: &Config) -> PathBuf {
    match env::var_os(HOME_ENV) {
        Some(custom) => PathBuf::from(custom),
        None => config.resolve_data_dir(),
    }
}
