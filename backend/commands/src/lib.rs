pub mod detection;
pub mod dispatch;
pub mod handlers;
pub mod registry;
pub mod types;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub use detection::split_command_line;
pub use dispatch::{DeveloperConsole, Dispatch};
pub use handlers::{
    CapturedOutput, ConsoleOutput, EchoCommand, HelpCommand, LevelLogCommand, LogCommand,
    QuitCommand,
};
pub use registry::CommandRegistry;
pub use types::{words_match, ConsoleCommand, FnCommand, ParsedLine};

/// Registry pre-filled with the built-in commands, except `help`.
///
/// Register host commands on the result, then call
/// [`CommandRegistry::with_help`] last so `help` lists all of them.
pub fn builtin_registry(output: ConsoleOutput, quit: Arc<AtomicBool>) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry
        .register(Arc::new(EchoCommand::new(output)))
        .register(Arc::new(LevelLogCommand))
        .register(Arc::new(LogCommand))
        .register(Arc::new(QuitCommand::new("quit", Arc::clone(&quit))))
        .register(Arc::new(QuitCommand::new("exit", quit)));
    registry
}

/// Build a console pre-wired with all built-in commands.
pub fn build_default_console(
    prefix: impl Into<String>,
    output: ConsoleOutput,
    quit: Arc<AtomicBool>,
) -> DeveloperConsole {
    let mut registry = builtin_registry(output.clone(), quit);
    registry.with_help(output);
    registry.into_console(prefix)
}
