/// Command dispatch: route a prefixed line to the registered commands.
///
/// Commands are scanned in registration order. Every command whose word
/// matches is invoked until one reports it handled the call. Lines without
/// the prefix, unknown words and declined calls are all silent no-ops.
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::detection::split_command_line;
use crate::types::{words_match, ConsoleCommand};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What happened to a single line or command call.
///
/// Only the `dispatch*` entry points return this; `process_*` discard it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The line did not start with the prefix.
    NotACommand,
    /// A command accepted the call. `attempts` counts every matching
    /// command invoked, including the one that accepted.
    Handled { word: String, attempts: usize },
    /// Every matching command returned `false`.
    Declined { word: String, attempts: usize },
    /// No command is registered under the word.
    NoMatch { word: String },
}

impl Dispatch {
    pub fn is_handled(&self) -> bool {
        matches!(self, Dispatch::Handled { .. })
    }
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// Routes text lines to [`ConsoleCommand`]s.
///
/// The prefix and command list are fixed at construction. The console keeps
/// no per-call state, so one instance can be shared for the whole process.
pub struct DeveloperConsole {
    prefix: String,
    commands: Vec<Arc<dyn ConsoleCommand>>,
}

impl DeveloperConsole {
    pub fn new<I>(prefix: impl Into<String>, commands: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn ConsoleCommand>>,
    {
        let prefix = prefix.into();
        let commands: Vec<_> = commands.into_iter().collect();

        for command in &commands {
            let word = command.command_word();
            if word.is_empty() {
                warn!("[Console] Registered a command with an empty word; only a bare-prefix line reaches it");
            } else if word.contains(' ') {
                warn!(word, "[Console] Command word contains a space; no prefixed line can reach it");
            }
        }

        debug!(prefix = %prefix, count = commands.len(), "[Console] Created developer console");
        Self { prefix, commands }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &Arc<dyn ConsoleCommand>> {
        self.commands.iter()
    }

    /// Distinct command words in first-registration order.
    pub fn command_words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = Vec::new();
        for command in &self.commands {
            let word = command.command_word();
            if !words.iter().any(|w| words_match(w, word)) {
                words.push(word);
            }
        }
        words
    }

    /// Handle one raw line of input. Lines without the prefix are ignored.
    pub fn process_raw_line(&self, line: &str) {
        self.dispatch_line(line);
    }

    /// Route an already split command.
    pub fn process_command(&self, word: &str, args: &[String]) {
        self.dispatch(word, args);
    }

    /// Like [`process_raw_line`](Self::process_raw_line) but reports the outcome.
    pub fn dispatch_line(&self, line: &str) -> Dispatch {
        let Some(parsed) = split_command_line(&self.prefix, line) else {
            trace!("[Console] Ignoring non-command line");
            return Dispatch::NotACommand;
        };
        self.dispatch(&parsed.word, &parsed.args)
    }

    /// Like [`process_command`](Self::process_command) but reports the outcome.
    pub fn dispatch(&self, word: &str, args: &[String]) -> Dispatch {
        let mut attempts = 0;

        for command in &self.commands {
            if !words_match(word, command.command_word()) {
                continue;
            }

            attempts += 1;
            debug!(word, attempt = attempts, args = args.len(), "[Console] Dispatching command");

            if command.process(args) {
                return Dispatch::Handled { word: word.to_string(), attempts };
            }
            debug!(word, attempt = attempts, "[Console] Command declined; falling through");
        }

        if attempts == 0 {
            Dispatch::NoMatch { word: word.to_string() }
        } else {
            Dispatch::Declined { word: word.to_string(), attempts }
        }
    }
}

impl fmt::Debug for DeveloperConsole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeveloperConsole")
            .field("prefix", &self.prefix)
            .field("commands", &self.command_words())
            .finish()
    }
}
