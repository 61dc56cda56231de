use ccard_config::Config;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{line, section};
use crate::cli::registry::CommandEntry;
use crate::utils::paths;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => show_config(context),
        ["set", key, value @ ..] if !value.is_empty() => {
            let key = key.to_lowercase();
            context.config.set(&key, &value.join(" "))?;
            context.persist_config()?;
            io::print_success(format!(
                "Set {} to {}.",
                key,
                context.config.get(&key)?
            ));
            if key == "data_dir" {
                io::print_info("The new data directory is used the next time ccard starts.");
            }
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config [show|set <key> <value>]; keys: {}",
            Config::KEYS.join(", ")
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    section("Configuration");
    for key in Config::KEYS {
        line(format!("  {:<18} {}", key, context.config.get(key)?));
    }
    line(format!(
        "  {:<18} {}",
        "data directory",
        paths::data_dir(&context.config).display()
    ));
    line(format!(
        "  {:<18} {}",
        "config file",
        context.config_manager.config_path().display()
    ));
    Ok(())
}
