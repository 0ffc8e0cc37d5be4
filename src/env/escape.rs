//! Identifier and string escaping.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Identifiers that are always escaped, compared case-insensitively.
pub const RESERVED_WORDS: &[&str] = &["contains", "in", "where", "is"];

static SAFE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// Returns true if `word` is reserved, either built-in or listed in `extra`.
#[must_use]
pub fn is_reserved(word: &str, extra: &[String]) -> bool {
    RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word))
        || extra.iter().any(|w| w.eq_ignore_ascii_case(word))
}

/// Escapes an identifier with the built-in reserved words.
///
/// Safe identifiers are returned unchanged. Anything else is wrapped in
/// backticks with inner backticks doubled.
#[must_use]
pub fn escape_identifier(identifier: &str) -> Cow<'_, str> {
    escape_identifier_with(identifier, &[])
}

/// Escapes an identifier, treating `extra` as additional reserved words.
#[must_use]
pub fn escape_identifier_with<'a>(identifier: &'a str, extra: &[String]) -> Cow<'a, str> {
    if SAFE_IDENTIFIER.is_match(identifier) && !is_reserved(identifier, extra) {
        Cow::Borrowed(identifier)
    } else {
        Cow::Owned(format!("`{}`", identifier.replace('`', "``")))
    }
}

/// Escapes the body of a double-quoted string literal.
#[must_use]
pub fn escape_string_literal(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}
