/// Ordered command registration.
///
/// Several commands may share a word; they stay in the order they were
/// registered so the console can fall through from one to the next.
use std::sync::Arc;

use crate::dispatch::DeveloperConsole;
use crate::handlers::{ConsoleOutput, HelpCommand};
use crate::types::{words_match, ConsoleCommand, FnCommand};

#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Arc<dyn ConsoleCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command. Duplicate words are allowed.
    pub fn register(&mut self, command: Arc<dyn ConsoleCommand>) -> &mut Self {
        self.commands.push(command);
        self
    }

    /// Append a closure-backed command.
    pub fn register_fn<F>(&mut self, word: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.register(Arc::new(FnCommand::new(word, f)))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Distinct words in first-registration order.
    pub fn words(&self) -> Vec<String> {
        let mut words: Vec<String> = Vec::new();
        for command in &self.commands {
            let word = command.command_word();
            if !words.iter().any(|w| words_match(w, word)) {
                words.push(word.to_string());
            }
        }
        words
    }

    /// Snapshot of the registered commands, for handlers such as `help`.
    pub fn commands(&self) -> Vec<Arc<dyn ConsoleCommand>> {
        self.commands.clone()
    }

    /// Register `help`, listing every command registered so far.
    ///
    /// Call this after the last `register`; later commands are not listed.
    pub fn with_help(&mut self, output: ConsoleOutput) -> &mut Self {
        let help = HelpCommand::from_registry(self, output);
        self.register(Arc::new(help))
    }

    pub fn into_console(self, prefix: impl Into<String>) -> DeveloperConsole {
        DeveloperConsole::new(prefix, self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn keeps_registration_order_and_duplicates() {
        let mut registry = CommandRegistry::new();
        registry
            .register_fn("log", |_| false)
            .register_fn("echo", |_| true)
            .register_fn("Log", |_| true);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.words(), vec!["log".to_string(), "echo".to_string()]);
    }

    #[test]
    fn builds_console_that_falls_through() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = CommandRegistry::new();

        let first = Arc::clone(&hits);
        registry.register_fn("x", move |_| {
            first.fetch_add(1, Ordering::SeqCst);
            false
        });
        let second = Arc::clone(&hits);
        registry.register_fn("x", move |_| {
            second.fetch_add(10, Ordering::SeqCst);
            true
        });

        let console = registry.into_console("/");
        console.process_raw_line("/X");
        assert_eq!(hits.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn empty_registry() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.words().is_empty());
    }
}
