//! Interactive console session.
//!
//! Feeds every input line through the dispatcher. Lines that are not
//! commands are treated as chat and echoed; unknown or rejected commands
//! are reported on the console output, never as errors.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use devconsole_commands::{split_command_line, ConsoleOutput, DeveloperConsole, Dispatch};
use devconsole_logging::{ConsoleEvent, EventLogger};

pub struct ConsoleSession {
    console: DeveloperConsole,
    output: ConsoleOutput,
    quit: Arc<AtomicBool>,
    session_id: String,
    record_events: bool,
}

impl ConsoleSession {
    pub fn new(
        console: DeveloperConsole,
        output: ConsoleOutput,
        quit: Arc<AtomicBool>,
        record_events: bool,
    ) -> Self {
        Self {
            console,
            output,
            quit,
            session_id: uuid::Uuid::new_v4().to_string(),
            record_events,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }

    /// Dispatch one line and report anything the user should see.
    pub fn handle_line(&self, line: &str) -> Dispatch {
        let Some(parsed) = split_command_line(self.console.prefix(), line) else {
            self.output.line(&format!("[chat] {line}"));
            self.record(ConsoleEvent::LineReceived { text: line.to_string() });
            return Dispatch::NotACommand;
        };

        let outcome = self.console.dispatch(&parsed.word, &parsed.args);
        match &outcome {
            Dispatch::NotACommand => {}
            Dispatch::Handled { word, attempts } => self.record(ConsoleEvent::CommandHandled {
                word: word.clone(),
                args: parsed.args,
                attempts: *attempts,
            }),
            Dispatch::Declined { word, attempts } => {
                self.output.line(&format!("Command '{word}' did not accept those arguments"));
                self.record(ConsoleEvent::CommandDeclined {
                    word: word.clone(),
                    args: parsed.args,
                    attempts: *attempts,
                });
            }
            Dispatch::NoMatch { word } => {
                self.output.line(&format!(
                    "Unknown command '{}{}'. Type {}help for a list.",
                    self.console.prefix(),
                    word,
                    self.console.prefix()
                ));
                self.record(ConsoleEvent::CommandUnknown { word: word.clone() });
            }
        }
        outcome
    }

    /// Read lines until EOF or a quit command.
    pub async fn run<R>(&self, reader: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        info!(session = %self.session_id, prefix = %self.console.prefix(), "Console session started");
        let mut lines = reader.lines();

        while !self.should_quit() {
            let Some(line) = lines.next_line().await.context("Failed to read console input")? else {
                debug!("Console input closed");
                break;
            };
            self.handle_line(&line);
        }

        info!(session = %self.session_id, "Console session ended");
        Ok(())
    }

    fn record(&self, event: ConsoleEvent) {
        if self.record_events {
            EventLogger::log_event(&self.session_id, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devconsole_commands::{build_default_console, CapturedOutput};

    fn session(prefix: &str) -> (ConsoleSession, CapturedOutput) {
        let (output, captured) = ConsoleOutput::capture();
        let quit = Arc::new(AtomicBool::new(false));
        let console = build_default_console(prefix, output.clone(), Arc::clone(&quit));
        (ConsoleSession::new(console, output, quit, true), captured)
    }

    #[test]
    fn chat_lines_are_echoed_not_dispatched() {
        let (session, captured) = session("/");
        assert_eq!(session.handle_line("echo hi"), Dispatch::NotACommand);
        assert_eq!(captured.lines(), vec!["[chat] echo hi".to_string()]);
    }

    #[test]
    fn unknown_and_declined_commands_are_reported() {
        let (session, captured) = session("/");
        session.handle_line("/nope");
        session.handle_line("/log");
        assert_eq!(
            captured.lines(),
            vec![
                "Unknown command '/nope'. Type /help for a list.".to_string(),
                "Command 'log' did not accept those arguments".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn run_stops_at_quit() {
        let (session, captured) = session("/");
        let input: &[u8] = b"/echo one\nhello\n/quit\n/echo two\n";

        session.run(input).await.unwrap();

        assert!(session.should_quit());
        assert_eq!(captured.lines(), vec!["one".to_string(), "[chat] hello".to_string()]);
    }

    #[tokio::test]
    async fn run_stops_at_eof() {
        let (session, captured) = session("!");
        let input: &[u8] = b"!echo a  b\r\n";

        session.run(input).await.unwrap();

        assert!(!session.should_quit());
        assert_eq!(captured.lines(), vec!["a  b".to_string()]);
    }
}
