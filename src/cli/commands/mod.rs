pub mod config;
pub mod purchase;
pub mod statement;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        purchase::definitions(),
        statement::definitions(),
        config::definitions(),
        system::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}
