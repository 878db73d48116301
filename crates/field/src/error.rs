use thiserror::Error;

/// Failure while parsing a header field value.
///
/// Parsing is all-or-nothing: the first unexpected byte aborts with an
/// error naming the offending character and its byte position inside the
/// original text, so callers can report exactly where a header went wrong.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid character {ch:?} at {at} in {text:?}")]
    InvalidCharacter { ch: char, at: usize, text: String },

    #[error("missing closing quote in {text:?}")]
    MissingClosingQuote { text: String },

    #[error("unexpected end of text in {text:?}")]
    UnexpectedEnd { text: String },

    #[error("empty {what}")]
    Empty { what: &'static str },

    #[error("invalid number at {at} in {text:?}")]
    InvalidNumber { at: usize, text: String },

    #[error("trailing separator at {at} in {text:?}")]
    TrailingSeparator { at: usize, text: String },

    #[error("missing '=' in {text:?}")]
    MissingEquals { text: String },

    #[error("range out of order at {at} in {text:?}")]
    SpanOutOfOrder { at: usize, text: String },

    #[error("invalid q value in {text:?}")]
    InvalidQValue { text: String },

    #[error("invalid status code {code}")]
    InvalidStatusCode { code: u16 },

    #[error("invalid media type {text:?}")]
    InvalidMediaType { text: String },

    #[error("non-text value for header {name}")]
    NotText { name: String },
}

impl ParseError {
    pub fn invalid_character(ch: char, at: usize, text: impl ToString) -> Self {
        Self::InvalidCharacter { ch, at, text: text.to_string() }
    }

    pub fn missing_closing_quote(text: impl ToString) -> Self {
        Self::MissingClosingQuote { text: text.to_string() }
    }

    pub fn unexpected_end(text: impl ToString) -> Self {
        Self::UnexpectedEnd { text: text.to_string() }
    }

    pub fn empty(what: &'static str) -> Self {
        Self::Empty { what }
    }

    pub fn invalid_number(at: usize, text: impl ToString) -> Self {
        Self::InvalidNumber { at, text: text.to_string() }
    }

    pub fn trailing_separator(at: usize, text: impl ToString) -> Self {
        Self::TrailingSeparator { at, text: text.to_string() }
    }

    pub fn missing_equals(text: impl ToString) -> Self {
        Self::MissingEquals { text: text.to_string() }
    }

    pub fn span_out_of_order(at: usize, text: impl ToString) -> Self {
        Self::SpanOutOfOrder { at, text: text.to_string() }
    }

    pub fn invalid_q_value(text: impl ToString) -> Self {
        Self::InvalidQValue { text: text.to_string() }
    }

    pub fn invalid_media_type(text: impl ToString) -> Self {
        Self::InvalidMediaType { text: text.to_string() }
    }

    pub fn not_text(name: impl ToString) -> Self {
        Self::NotText { name: name.to_string() }
    }
}
