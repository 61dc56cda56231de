use std::collections::HashMap;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands in registration order, looked up by lowercase name.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    index: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`, replacing an earlier command of the same name in place.
    pub fn register(&mut self, entry: CommandEntry) {
        match self.index.get(entry.name) {
            Some(&slot) => self.entries[slot] = entry,
            None => {
                self.index.insert(entry.name, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn keeps_registration_order_and_replaces_duplicates() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("list", "first", "list", noop));
        registry.register(CommandEntry::new("add", "add", "add", noop));
        registry.register(CommandEntry::new("list", "second", "list", noop));

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["list", "add"]);
        assert_eq!(registry.get("list").map(|entry| entry.description), Some("second"));
        assert!(registry.handler("missing").is_none());
    }
}
