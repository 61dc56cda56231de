//! Shell context, dispatch and error reporting.

use std::{env, io};

use ccard_config::{Config, ConfigError, ConfigManager};
use ccard_core::{
    format::FormatSettings,
    time::{Clock, FixedClock, SystemClock},
    CoreError, PurchaseBook, StatementBrowser,
};
use ccard_domain::DomainError;
use ccard_storage_json::JsonPurchaseStorage;
use chrono::NaiveDate;
use strsim::levenshtein;
use thiserror::Error;
use tracing::{debug, warn};

pub use crate::errors::CliError;
use crate::utils::paths;

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};

/// Pins "today" to a `YYYY-MM-DD` date, for reproducible sessions.
pub const TODAY_ENV: &str = "CCARD_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Config(inner) => CommandError::Config(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Everything a command handler can reach: the purchase book, the statement
/// browser and the user's configuration.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub book: PurchaseBook,
    pub browser: StatementBrowser,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub settings: FormatSettings,
    pub last_command: Option<String>,
    pub running: bool,
    clock: Box<dyn Clock>,
}

impl ShellContext {
    /// Opens the configuration and purchase document under the app home.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(paths::app_data_dir())?;
        let config = config_manager.load()?;
        let data_dir = paths::data_dir(&config);
        let storage = JsonPurchaseStorage::new(data_dir)?;
        debug!(path = %storage.path().display(), "opened purchase store");

        Ok(Self::with_services(
            mode,
            PurchaseBook::new(Box::new(storage)),
            config,
            config_manager,
            clock_from_env(),
        ))
    }

    pub fn with_services(
        mode: CliMode,
        book: PurchaseBook,
        config: Config,
        config_manager: ConfigManager,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        cli_io::apply_config(&config);
        let browser = StatementBrowser::from_clock(clock.as_ref(), config.window_months);
        let settings = FormatSettings::new(&config.locale, &config.currency);

        ShellContext {
            mode,
            registry,
            book,
            browser,
            config,
            config_manager,
            settings,
            last_command: None,
            running: true,
            clock,
        }
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn prompt(&self) -> String {
        format!("ccard [{}]> ", self.browser.selected())
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Saves the configuration and re-applies it to formatting, output and
    /// the statement window.
    pub(crate) fn persist_config(&mut self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        cli_io::apply_config(&self.config);
        self.settings = FormatSettings::new(&self.config.locale, &self.config.currency);

        if self.browser.window().len() != self.config.window_months.max(1) {
            let selected = self.browser.selected();
            self.browser = StatementBrowser::from_clock(self.clock.as_ref(), self.config.window_months);
            if self.browser.select(selected).is_err() {
                cli_io::print_info(format!(
                    "Statement {} is outside the new window; showing {}.",
                    selected,
                    self.browser.selected()
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(CoreError::PeriodOutOfRange(period)) => {
                cli_io::print_error(format!("Statement {} is outside the browsing window.", period));
                cli_io::print_hint("Use `months` to list the statements you can select.");
            }
            other => cli_io::print_error(other.to_string()),
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }
}

fn clock_from_env() -> Box<dyn Clock> {
    let Some(raw) = env::var_os(TODAY_ENV) else {
        return Box::new(SystemClock);
    };
    let raw = raw.to_string_lossy();
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Box::new(FixedClock::new(date)),
        Err(err) => {
            warn!(value = %raw, error = %err, "ignoring {TODAY_ENV}; expected YYYY-MM-DD");
            Box::new(SystemClock)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tempfile::TempDir;

    /// In-memory session pinned to `today`; the guard keeps the config dir alive.
    pub(crate) fn session(today: NaiveDate) -> (ShellContext, TempDir) {
        let dir = TempDir::new().expect("tempdir");
        let manager =
            ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("config manager");
        let config = Config {
            plain_output: true,
            ..Config::default()
        };
        let context = ShellContext::with_services(
            CliMode::Script,
            PurchaseBook::in_memory(),
            config,
            manager,
            Box::new(FixedClock::new(today)),
        );
        (context, dir)
    }

    pub(crate) fn run(context: &mut ShellContext, lines: &[&str]) {
        for line in lines {
            match context.process_line(line) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => panic!("`{line}` failed: {err}"),
            }
        }
    }
}
