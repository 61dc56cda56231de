use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

const DEFAULT_DIR_NAME: &str = ".ccard";

/// Stores user-configurable CLI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding the purchase document. Defaults to the app home.
    pub data_dir: Option<PathBuf>,

    #[serde(default = "Config::default_window_months")]
    /// Number of statement months offered for browsing.
    pub window_months: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            data_dir: None,
            window_months: Self::default_window_months(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            plain_output: false,
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set`], in display order.
    pub const KEYS: [&'static str; 6] = [
        "locale",
        "currency",
        "data_dir",
        "window_months",
        "ui_color_enabled",
        "plain_output",
    ];

    pub fn default_locale() -> String {
        "pt-BR".into()
    }

    pub fn default_currency() -> String {
        "BRL".into()
    }

    pub fn default_window_months() -> usize {
        12
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// The configured data directory, or `~/.ccard` when none is set.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    /// Renders one key for display.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "data_dir" => self
                .data_dir
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(default)".into()),
            "window_months" => self.window_months.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "plain_output" => self.plain_output.to_string(),
            other => return Err(ConfigError::UnknownKey(other.into())),
        };
        Ok(value)
    }

    /// Updates one key from its textual form. An empty `data_dir` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let trimmed = value.trim();
        let invalid = || ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
        };
        match key {
            "locale" if !trimmed.is_empty() => self.locale = trimmed.into(),
            "currency" if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) => {
                self.currency = trimmed.to_ascii_uppercase()
            }
            "data_dir" => {
                self.data_dir = if trimmed.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                }
            }
            "window_months" => {
                let months: usize = trimmed.parse().map_err(|_| invalid())?;
                if months == 0 {
                    return Err(invalid());
                }
                self.window_months = months;
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_flag(trimmed).ok_or_else(invalid)?,
            "plain_output" => self.plain_output = parse_flag(trimmed).ok_or_else(invalid)?,
            "locale" | "currency" => return Err(invalid()),
            other => return Err(ConfigError::UnknownKey(other.into())),
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
