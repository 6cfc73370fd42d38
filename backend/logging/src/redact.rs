//! Log Redaction Layer
//!
//! Scrubs API keys, bearer tokens and `key=value` secrets from command
//! arguments before they reach a log sink.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(sk-[a-zA-Z0-9]{32,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap());
static ASSIGNMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(password|passwd|pwd|token|secret|api[_-]?key)([=:])\S+").unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]");
    ASSIGNMENT_RE
        .replace_all(&redacted, "${1}${2}[REDACTED]")
        .into_owned()
}

/// Redacts every argument of a command call.
///
/// A bare argument that follows a `--password`/`--token` style flag is
/// replaced entirely.
pub fn redact_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut hide_next = false;
    for arg in args {
        if hide_next {
            out.push("[REDACTED]".to_string());
            hide_next = false;
            continue;
        }
        let flag = arg.trim_start_matches('-').to_ascii_lowercase();
        hide_next = arg.starts_with("--")
            && matches!(flag.as_str(), "password" | "passwd" | "token" | "secret" | "api-key" | "apikey");
        out.push(redact_sensitive_data(arg));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let raw = "login with Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
        assert!(clean.starts_with("login with "));
    }

    #[test]
    fn redacts_assignments_but_keeps_key() {
        assert_eq!(redact_sensitive_data("password=hunter2"), "password=[REDACTED]");
        assert_eq!(redact_sensitive_data("API_KEY:abc123"), "API_KEY:[REDACTED]");
        assert_eq!(redact_sensitive_data("user=alice"), "user=alice");
    }

    #[test]
    fn redacts_value_after_secret_flag() {
        let args: Vec<String> = ["connect", "--token", "abc", "--verbose"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(redact_args(&args), vec!["connect", "--token", "[REDACTED]", "--verbose"]);
    }
}
