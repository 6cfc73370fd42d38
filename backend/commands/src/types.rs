/// Console command types.
///
/// A command is anything that owns a routing word and can consume an
/// argument list. The console never inspects a command beyond these two.
use std::fmt;

// ---------------------------------------------------------------------------
// Command capability
// ---------------------------------------------------------------------------

/// A named unit of behavior the console can route a line to.
///
/// `process` returns `true` when the call was fully handled. Returning
/// `false` lets the console keep looking for another command registered
/// under the same word, so implementations should validate their own
/// arguments and decline rather than panic.
pub trait ConsoleCommand: Send + Sync {
    /// Routing key, compared case-insensitively.
    fn command_word(&self) -> &str;

    /// Run the command with the tokens that followed the word.
    fn process(&self, args: &[String]) -> bool;

    /// One-line summary shown by `help`.
    fn description(&self) -> &str {
        ""
    }
}

// ---------------------------------------------------------------------------
// Closure adapter
// ---------------------------------------------------------------------------

/// A command built from a word and a closure.
pub struct FnCommand<F> {
    word: String,
    description: String,
    f: F,
}

impl<F> FnCommand<F>
where
    F: Fn(&[String]) -> bool + Send + Sync,
{
    pub fn new(word: impl Into<String>, f: F) -> Self {
        Self { word: word.into(), description: String::new(), f }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl<F> ConsoleCommand for FnCommand<F>
where
    F: Fn(&[String]) -> bool + Send + Sync,
{
    fn command_word(&self) -> &str {
        &self.word
    }

    fn process(&self, args: &[String]) -> bool {
        (self.f)(args)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl<F> fmt::Debug for FnCommand<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand").field("word", &self.word).finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Parsed line
// ---------------------------------------------------------------------------

/// A prefixed line split into its command word and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub word: String,
    /// Tokens after the word, in order. May contain empty strings.
    pub args: Vec<String>,
}

/// Case-insensitive word comparison.
///
/// Each character is folded to its single-character uppercase form and
/// compared one to one. Characters whose uppercase expands (`ß` → `SS`)
/// are compared as-is.
pub fn words_match(a: &str, b: &str) -> bool {
    if a.eq_ignore_ascii_case(b) {
        return true;
    }
    a.chars().map(fold_upper).eq(b.chars().map(fold_upper))
}

fn fold_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
