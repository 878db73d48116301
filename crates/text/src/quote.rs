//! Backslash escaping, unescaping, quoting and unquoting.
//!
//! The escape alphabet is the usual one: `\\`, `\"`, `\'`, `\t`, `\r`,
//! `\n`, `\0`, with any other control character written as `\u{XXXX}`.
//! [`unescape`] is the exact inverse of [`escape`], and [`unquote`] the
//! inverse of [`quote`]; failures report the offending byte position in the
//! input so callers can surface precise diagnostics.

use std::borrow::Cow;
use thiserror::Error;

/// Failure while unescaping or unquoting a string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnescapeError {
    #[error("trailing backslash in {text:?}")]
    TrailingBackslash { text: String },

    #[error("unknown escape '\\{escape}' at {at} in {text:?}")]
    UnknownEscape { escape: char, at: usize, text: String },

    #[error("bad unicode escape at {at} in {text:?}")]
    BadUnicodeEscape { at: usize, text: String },

    #[error("missing closing quote in {text:?}")]
    MissingClosingQuote { text: String },

    #[error("missing opening quote in {text:?}")]
    MissingOpeningQuote { text: String },
}

fn needs_escape(ch: char) -> bool {
    matches!(ch, '\\' | '"' | '\'') || ch.is_control()
}

/// Escapes backslashes, quotes and control characters, borrowing when the
/// text contains none of them.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{{{:04X}}}", c as u32));
            }
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Reverses [`escape`], borrowing when the text contains no backslash.
pub fn unescape(text: &str) -> Result<Cow<'_, str>, UnescapeError> {
    if !text.contains('\\') {
        return Ok(Cow::Borrowed(text));
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices();
    while let Some((at, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some((_, escape)) = chars.next() else {
            return Err(UnescapeError::TrailingBackslash { text: text.to_string() });
        };
        match escape {
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'n' => out.push('\n'),
            '0' => out.push('\0'),
            'u' => out.push(unescape_unicode(text, at, &mut chars)?),
            other => {
                return Err(UnescapeError::UnknownEscape { escape: other, at, text: text.to_string() });
            }
        }
    }
    Ok(Cow::Owned(out))
}

/// Consumes `{XXXX}` after a `\u` and decodes the scalar value.
fn unescape_unicode(
    text: &str,
    at: usize,
    chars: &mut std::str::CharIndices<'_>,
) -> Result<char, UnescapeError> {
    let bad = || UnescapeError::BadUnicodeEscape { at, text: text.to_string() };

    match chars.next() {
        Some((_, '{')) => {}
        _ => return Err(bad()),
    }
    let mut value: u32 = 0;
    let mut digits = 0;
    loop {
        match chars.next() {
            Some((_, '}')) if digits > 0 => break,
            Some((_, ch)) if ch.is_ascii_hexdigit() && digits < 6 => {
                value = value * 16 + ch.to_digit(16).unwrap_or(0);
                digits += 1;
            }
            _ => return Err(bad()),
        }
    }
    char::from_u32(value).ok_or_else(bad)
}

/// Escapes `text` and wraps it in double quotes.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", escape(text))
}

/// Reverses [`quote`]: strips the surrounding double quotes and unescapes
/// the interior.
pub fn unquote(text: &str) -> Result<Cow<'_, str>, UnescapeError> {
    let Some(rest) = text.strip_prefix('"') else {
        return Err(UnescapeError::MissingOpeningQuote { text: text.to_string() });
    };
    let Some(inner) = rest.strip_suffix('"') else {
        return Err(UnescapeError::MissingClosingQuote { text: text.to_string() });
    };
    // A final escaped quote must not count as the closing delimiter.
    if ends_with_odd_backslashes(inner) {
        return Err(UnescapeError::MissingClosingQuote { text: text.to_string() });
    }
    unescape(inner)
}

fn ends_with_odd_backslashes(text: &str) -> bool {
    text.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_round_trip() {
        let original = "a\\b\"c'd\te\rf\ng\0h";
        let escaped = escape(original);
        assert_eq!(escaped, "a\\\\b\\\"c\\'d\\te\\rf\\ng\\0h");
        assert_eq!(unescape(&escaped).unwrap(), original);
    }

    #[test]
    fn escape_borrows_plain_text() {
        assert!(matches!(escape("plain ascii"), Cow::Borrowed(_)));
        assert!(matches!(unescape("plain ascii").unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn escapes_controls_as_unicode() {
        assert_eq!(escape("\u{1}"), "\\u{0001}");
        assert_eq!(unescape("\\u{0001}").unwrap(), "\u{1}");
        assert_eq!(unescape("\\u{1F600}").unwrap(), "\u{1F600}");
    }

    #[test]
    fn unescape_failures() {
        assert_eq!(
            unescape("abc\\"),
            Err(UnescapeError::TrailingBackslash { text: "abc\\".to_string() })
        );
        assert_eq!(
            unescape("a\\qb"),
            Err(UnescapeError::UnknownEscape { escape: 'q', at: 1, text: "a\\qb".to_string() })
        );
        assert!(matches!(unescape("\\u{}"), Err(UnescapeError::BadUnicodeEscape { .. })));
        assert!(matches!(unescape("\\u{D800}"), Err(UnescapeError::BadUnicodeEscape { .. })));
        assert!(matches!(unescape("\\uFFFF"), Err(UnescapeError::BadUnicodeEscape { .. })));
    }

    #[test]
    fn quote_round_trip() {
        assert_eq!(quote("abc"), "\"abc\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(unquote("\"a\\\"b\"").unwrap(), "a\"b");
    }

    #[test]
    fn unquote_failures() {
        assert!(matches!(unquote("abc\""), Err(UnescapeError::MissingOpeningQuote { .. })));
        assert!(matches!(unquote("\"abc"), Err(UnescapeError::MissingClosingQuote { .. })));
        // the trailing quote is escaped, so the string is unterminated
        assert!(matches!(unquote("\"abc\\\""), Err(UnescapeError::MissingClosingQuote { .. })));
    }
}
