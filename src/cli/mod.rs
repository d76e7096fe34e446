pub mod commands;
pub mod handlers;
pub mod prompt;

pub use commands::{CliArgs, Commands, InitArgs};
pub use prompt::TerminalResolver;
