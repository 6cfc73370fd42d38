/// Built-in console commands.
///
/// Each command is a concrete struct implementing `ConsoleCommand`. Output
/// goes through a shared [`ConsoleOutput`] so hosts and tests decide where
/// it ends up.
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, trace, warn};

use crate::registry::CommandRegistry;
use crate::types::ConsoleCommand;

// ---------------------------------------------------------------------------
// Output sink
// ---------------------------------------------------------------------------

/// Shared, line-oriented writer used by commands to talk back to the user.
#[derive(Clone)]
pub struct ConsoleOutput {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl ConsoleOutput {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self { inner: Arc::new(Mutex::new(Box::new(writer))) }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// An in-memory sink plus a handle to read back what was written.
    pub fn capture() -> (Self, CapturedOutput) {
        let buffer = CapturedOutput::default();
        (Self::new(buffer.clone()), buffer)
    }

    /// Write one line. I/O failures are logged and otherwise ignored.
    pub fn line(&self, text: &str) {
        let mut writer = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(writer, "{text}").and_then(|_| writer.flush()) {
            warn!("[Console] Failed to write output: {}", e);
        }
    }
}

/// Readable side of [`ConsoleOutput::capture`].
#[derive(Clone, Default)]
pub struct CapturedOutput {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(|p| p.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap_or_else(|p| p.into_inner()).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

/// Lists the commands that were registered before it, plus itself.
pub struct HelpCommand {
    entries: Vec<(String, String)>,
    output: ConsoleOutput,
}

impl HelpCommand {
    pub const DESCRIPTION: &'static str = "List available commands.";

    pub fn from_registry(registry: &CommandRegistry, output: ConsoleOutput) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for command in registry.commands() {
            let word = command.command_word().to_lowercase();
            match entries.iter_mut().find(|(w, _)| *w == word) {
                // Same-word commands share one line and the first non-empty description.
                Some((_, desc)) if desc.is_empty() => *desc = command.description().to_string(),
                Some(_) => {}
                None => entries.push((word, command.description().to_string())),
            }
        }
        if !entries.iter().any(|(w, _)| w == "help") {
            entries.push(("help".to_string(), Self::DESCRIPTION.to_string()));
        }
        Self { entries, output }
    }
}

impl ConsoleCommand for HelpCommand {
    fn command_word(&self) -> &str {
        "help"
    }

    fn process(&self, _args: &[String]) -> bool {
        self.output.line("Available commands:");
        for (word, description) in &self.entries {
            if description.is_empty() {
                self.output.line(&format!("  {word}"));
            } else {
                self.output.line(&format!("  {word} - {description}"));
            }
        }
        true
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

pub struct EchoCommand {
    output: ConsoleOutput,
}

impl EchoCommand {
    pub fn new(output: ConsoleOutput) -> Self {
        Self { output }
    }
}

impl ConsoleCommand for EchoCommand {
    fn command_word(&self) -> &str {
        "echo"
    }

    fn process(&self, args: &[String]) -> bool {
        self.output.line(&args.join(" "));
        true
    }

    fn description(&self) -> &str {
        "Print the arguments back."
    }
}

// ---------------------------------------------------------------------------
// log
// ---------------------------------------------------------------------------

/// `log <level> <message...>`. Declines when the first argument is not a
/// level so a plain [`LogCommand`] registered after it can take the call.
pub struct LevelLogCommand;

impl ConsoleCommand for LevelLogCommand {
    fn command_word(&self) -> &str {
        "log"
    }

    fn process(&self, args: &[String]) -> bool {
        let [level, message @ ..] = args else { return false };
        if message.is_empty() {
            return false;
        }
        let message = message.join(" ");
        match level.to_ascii_lowercase().as_str() {
            "trace" => trace!(target: "console", "{}", message),
            "debug" => debug!(target: "console", "{}", message),
            "info" => info!(target: "console", "{}", message),
            "warn" | "warning" => warn!(target: "console", "{}", message),
            "error" => error!(target: "console", "{}", message),
            _ => return false,
        }
        true
    }

    fn description(&self) -> &str {
        "Log a message: log [trace|debug|info|warn|error] <message>"
    }
}

/// `log <message...>` at info level.
pub struct LogCommand;

impl ConsoleCommand for LogCommand {
    fn command_word(&self) -> &str {
        "log"
    }

    fn process(&self, args: &[String]) -> bool {
        if args.is_empty() {
            return false;
        }
        info!(target: "console", "{}", args.join(" "));
        true
    }
}

// ---------------------------------------------------------------------------
// quit / exit
// ---------------------------------------------------------------------------

/// Raises a shared flag the host polls to end its input loop.
pub struct QuitCommand {
    word: String,
    flag: Arc<AtomicBool>,
}

impl QuitCommand {
    pub fn new(word: impl Into<String>, flag: Arc<AtomicBool>) -> Self {
        Self { word: word.into(), flag }
    }
}

impl ConsoleCommand for QuitCommand {
    fn command_word(&self) -> &str {
        &self.word
    }

    fn process(&self, _args: &[String]) -> bool {
        info!("[Console] Quit requested");
        self.flag.store(true, Ordering::SeqCst);
        true
    }

    fn description(&self) -> &str {
        "Leave the console."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn echo_joins_args_with_single_spaces() {
        let (output, captured) = ConsoleOutput::capture();
        let echo = EchoCommand::new(output);

        assert!(echo.process(&strings(&["hello", "", "world"])));
        assert!(echo.process(&[]));
        assert_eq!(captured.lines(), vec!["hello  world".to_string(), String::new()]);
    }

    #[test]
    fn level_log_accepts_known_levels() {
        let log = LevelLogCommand;
        assert!(log.process(&strings(&["warn", "disk", "low"])));
        assert!(log.process(&strings(&["ERROR", "boom"])));
    }

    #[test]
    fn level_log_declines_unknown_level_or_missing_message() {
        let log = LevelLogCommand;
        assert!(!log.process(&[]));
        assert!(!log.process(&strings(&["info"])));
        assert!(!log.process(&strings(&["hello", "world"])));
    }

    #[test]
    fn plain_log_declines_only_without_args() {
        assert!(LogCommand.process(&strings(&["hello"])));
        assert!(!LogCommand.process(&[]));
    }

    #[test]
    fn quit_raises_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let quit = QuitCommand::new("exit", Arc::clone(&flag));
        assert_eq!(quit.command_word(), "exit");
        assert!(quit.process(&[]));
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn help_lists_each_word_once() {
        let (output, captured) = ConsoleOutput::capture();
        let mut registry = CommandRegistry::new();
        registry
            .register(Arc::new(EchoCommand::new(output.clone())))
            .register(Arc::new(LevelLogCommand))
            .register(Arc::new(LogCommand));

        let help = HelpCommand::from_registry(&registry, output);
        assert!(help.process(&strings(&["ignored"])));

        assert_eq!(
            captured.lines(),
            vec![
                "Available commands:".to_string(),
                "  echo - Print the arguments back.".to_string(),
                "  log - Log a message: log [trace|debug|info|warn|error] <message>".to_string(),
                "  help - List available commands.".to_string(),
            ]
        );
    }
}
