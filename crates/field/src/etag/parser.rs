//! The entity-tag text parser.
//!
//! A single mode-based scanner handles both the single-tag and list forms.
//! Each mode names the kind of character the scanner expects next; any
//! other character fails immediately with its position. The transitions
//! mirror the RFC 7232 grammar:
//!
//! ```text
//! Boundary --W--> WeakSlash --/--> QuoteBegin --"--> Value --"--> Finished
//! Boundary --"--> Value
//! Boundary --*--> Finished
//! Finished --,--> Boundary          (list form only)
//! ```

use super::ETag;
use crate::chars::{is_etagc, is_ows};
use crate::error::ParseError;
use tracing::trace;

/// What the scanner expects at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Start of a tag: OWS, `W`, `*` or the opening quote.
    Boundary,
    /// Seen `W`, the weak indicator needs its `/`.
    WeakSlash,
    /// Seen `W/`, only an opening quote may follow.
    QuoteBegin,
    /// Inside the quoted validator.
    Value,
    /// A complete tag: OWS, a separator (list form) or the end.
    Finished,
}

/// Parses exactly one tag.
pub(super) fn parse_one(text: &str) -> Result<ETag, ParseError> {
    let mut tags = scan(text, false)?;
    // scan(.., false) never yields more than one
    Ok(tags.remove(0))
}

/// Parses a comma-separated list of at least one tag.
pub(super) fn parse_list(text: &str) -> Result<Vec<ETag>, ParseError> {
    let tags = scan(text, true)?;
    trace!(count = tags.len(), "parsed entity tag list");
    Ok(tags)
}

fn scan(text: &str, list: bool) -> Result<Vec<ETag>, ParseError> {
    let mut tags = Vec::new();
    let mut mode = Mode::Boundary;
    let mut weak = false;
    let mut value = String::new();
    let mut separator_at = 0;

    for (at, ch) in text.char_indices() {
        mode = match mode {
            Mode::Boundary => match ch {
                c if is_ows(c) => Mode::Boundary,
                'W' => {
                    weak = true;
                    Mode::WeakSlash
                }
                '"' => Mode::Value,
                // the wildcard stands alone, never in a list
                '*' if tags.is_empty() => {
                    tags.push(ETag::WILDCARD);
                    Mode::Finished
                }
                c => return Err(ParseError::invalid_character(c, at, text)),
            },

            Mode::WeakSlash => match ch {
                '/' => Mode::QuoteBegin,
                c => return Err(ParseError::invalid_character(c, at, text)),
            },

            Mode::QuoteBegin => match ch {
                '"' => Mode::Value,
                c => return Err(ParseError::invalid_character(c, at, text)),
            },

            Mode::Value => match ch {
                '"' => {
                    tags.push(ETag::tag(std::mem::take(&mut value), weak)?);
                    weak = false;
                    Mode::Finished
                }
                c if is_etagc(c) => {
                    value.push(c);
                    Mode::Value
                }
                c => return Err(ParseError::invalid_character(c, at, text)),
            },

            Mode::Finished => match ch {
                c if is_ows(c) => Mode::Finished,
                // separators only appear in the list form, and never after
                // the wildcard
                ',' if list && !tags.last().is_some_and(ETag::is_wildcard) => {
                    separator_at = at;
                    Mode::Boundary
                }
                c => return Err(ParseError::invalid_character(c, at, text)),
            },
        };
    }

    match mode {
        Mode::Finished => Ok(tags),
        Mode::Boundary if tags.is_empty() => Err(ParseError::empty("entity tag")),
        Mode::Boundary => Err(ParseError::trailing_separator(separator_at, text)),
        Mode::WeakSlash | Mode::QuoteBegin => Err(ParseError::unexpected_end(text)),
        Mode::Value => Err(ParseError::missing_closing_quote(text)),
    }
}
