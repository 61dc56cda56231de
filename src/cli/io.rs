use std::fmt;

use ccard_config::Config;

use crate::cli::output::{self, OutputPreferences};

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Print a success message via the standard CLI output helpers.
pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Applies the display switches of `config` to all later output.
pub fn apply_config(config: &Config) {
    output::set_preferences(OutputPreferences {
        plain_output: config.plain_output,
        color_enabled: config.ui_color_enabled,
    });
    if config.ui_color_enabled && !config.plain_output {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}
