/// Command line detection: recognise the prefix and tokenize the rest.
///
/// Tokenizing is a plain split on every single space character. Nothing is
/// trimmed and consecutive spaces produce empty tokens, so `"/foo  a"`
/// yields the word `foo` and the arguments `["", "a"]`. Tabs and other
/// whitespace are ordinary characters.
use crate::types::ParsedLine;

const DELIMITER: char = ' ';

/// Split a raw line into a command word and arguments.
///
/// Returns `None` if the line does not start with `prefix`. A line that is
/// only the prefix yields an empty word and no arguments.
pub fn split_command_line(prefix: &str, line: &str) -> Option<ParsedLine> {
    let rest = line.strip_prefix(prefix)?;

    let mut tokens = rest.split(DELIMITER).map(str::to_string);
    // `split` always yields at least one item, even for an empty string.
    let word = tokens.next().unwrap_or_default();
    let args = tokens.collect();

    Some(ParsedLine { word, args })
}
