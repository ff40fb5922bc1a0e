use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Centralized registry for PII redaction regex patterns.
///
/// All patterns are vetted literals, so construction cannot fail.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// JWT-shaped token: three dot-separated base64url segments
    pub fn jwt() -> &'static Regex {
        static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b").unwrap()
        });
        &JWT_REGEX
    }

    /// Phone number: optional leading '+', 7 to 15 digits
    pub fn phone() -> &'static Regex {
        static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\+?\b\d{7,15}\b").unwrap()
        });
        &PHONE_REGEX
    }

    /// Base64-like token pattern: matches opaque tokens (≥16 chars)
    pub fn base64_token() -> &'static Regex {
        static BASE64_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}\b").unwrap()
        });
        &BASE64_TOKEN_REGEX
    }
}

/// Redacts sensitive information from a string.
///
/// This function conservatively masks:
/// - JWT-shaped credentials: replaced whole with [REDACTED_TOKEN]
/// - Phone numbers: keeps the last two digits, e.g. `***67`
/// - Opaque tokens: base64-like or hex runs (≥16 chars) become [REDACTED_TOKEN]
///
/// Order: JWTs first so their segments are not redacted piecemeal, then
/// phones, then remaining tokens.
pub fn redact(input: &str) -> String {
    let jwt_redacted = PiiRegexRegistry::jwt().replace_all(input, "[REDACTED_TOKEN]");

    let phone_redacted =
        PiiRegexRegistry::phone().replace_all(&jwt_redacted, |caps: &regex::Captures| {
            let digits = caps[0].trim_start_matches('+');
            let tail = &digits[digits.len() - 2..];
            format!("***{tail}")
        });

    PiiRegexRegistry::base64_token()
        .replace_all(&phone_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// A wrapper that automatically redacts sensitive strings when displayed.
pub struct Redacted<'a>(pub &'a str);

impl<'a> fmt::Display for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl<'a> fmt::Debug for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
