pub mod agents;
pub mod config;
pub mod directive;
pub mod settings;

pub use agents::role_prompt;
pub use config::CONFIG_TEMPLATE;
pub use directive::{CLAUDE_MD_DIRECTIVE, DIRECTIVE_HEADING};
pub use settings::{default_settings, format_hook_entry, HOOK_COMMAND};
