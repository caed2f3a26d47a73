use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Centralized registry for redaction regex patterns.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Opaque token pattern: base64 / base64url runs (≥16 chars), which also
    /// covers the salt and hash segments of a PHC credential digest.
    pub fn opaque_token() -> &'static Regex {
        static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"[A-Za-z0-9+/_-]{16,}={0,2}").unwrap()
        });
        &TOKEN_REGEX
    }
}

/// Redacts opaque credentials from a string.
///
/// Session tokens and credential digests are replaced by `[REDACTED_TOKEN]`;
/// short words and ordinary messages pass through untouched.
pub fn redact(input: &str) -> String {
    PiiRegexRegistry::opaque_token()
        .replace_all(input, "[REDACTED_TOKEN]")
        .to_string()
}

/// A wrapper that redacts when formatted, for use in `tracing` fields.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
