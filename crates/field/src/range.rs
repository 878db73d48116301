//! Range and Content-Range header values (RFC 9110 §14).
//!
//! A [`RangeHeader`] is a unit plus one or more inclusive byte spans, the
//! request side of range handling: `bytes=200-1000, 2000-6576, 19000-`.
//! A span without an upper bound is open-ended; a span without a lower
//! bound is rejected. [`ContentRange`] is the response side: either a
//! served span with the optional complete length (`bytes 0-499/1234`,
//! `bytes 0-499/*`) or the unsatisfied form (`bytes */1234`).

use crate::chars::{is_ows, is_tchar};
use crate::error::ParseError;
use crate::utils::ensure;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// The unit qualifying a range's numeric spans.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RangeUnit {
    /// `bytes`, the only unit defined by the RFC.
    Bytes,
    /// Any other token, kept lowercase.
    Other(Box<str>),
}

impl RangeUnit {
    /// Parses a unit token, case-insensitively.
    pub fn with(text: &str) -> Result<RangeUnit, ParseError> {
        ensure!(!text.is_empty(), ParseError::empty("range unit"));
        for (at, ch) in text.char_indices() {
            ensure!(is_tchar(ch), ParseError::invalid_character(ch, at, text));
        }
        Ok(Self::from_token(text))
    }

    /// Builds a unit from an already-validated token.
    fn from_token(text: &str) -> RangeUnit {
        if text.eq_ignore_ascii_case("bytes") {
            RangeUnit::Bytes
        } else {
            RangeUnit::Other(text.to_ascii_lowercase().into())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RangeUnit::Bytes => "bytes",
            RangeUnit::Other(text) => text,
        }
    }
}

impl fmt::Display for RangeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inclusive byte span, open-ended when `upper` is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteSpan {
    lower: u64,
    upper: Option<u64>,
}

impl ByteSpan {
    /// A bounded span `lower-upper`, both inclusive.
    ///
    /// # Errors
    ///
    /// [`ParseError::SpanOutOfOrder`] when `lower > upper`.
    pub fn bounded(lower: u64, upper: u64) -> Result<ByteSpan, ParseError> {
        ensure!(lower <= upper, ParseError::span_out_of_order(0, format!("{lower}-{upper}")));
        Ok(ByteSpan { lower, upper: Some(upper) })
    }

    /// An open-ended span `lower-`.
    pub fn open(lower: u64) -> ByteSpan {
        ByteSpan { lower, upper: None }
    }

    pub fn lower(&self) -> u64 {
        self.lower
    }

    pub fn upper(&self) -> Option<u64> {
        self.upper
    }

    /// The span's length, `None` when open-ended.
    pub fn len(&self) -> Option<u64> {
        self.upper.map(|upper| upper - self.lower + 1)
    }
}

impl fmt::Display for ByteSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "{}-{}", self.lower, upper),
            None => write!(f, "{}-", self.lower),
        }
    }
}

/// A parsed `Range` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeHeader {
    unit: RangeUnit,
    spans: Vec<ByteSpan>,
}

impl RangeHeader {
    /// Builds a range from parts; the span list must not be empty.
    pub fn new(unit: RangeUnit, spans: Vec<ByteSpan>) -> Result<RangeHeader, ParseError> {
        ensure!(!spans.is_empty(), ParseError::empty("range list"));
        Ok(RangeHeader { unit, spans })
    }

    pub fn unit(&self) -> &RangeUnit {
        &self.unit
    }

    pub fn spans(&self) -> &[ByteSpan] {
        &self.spans
    }

    /// Parses `<unit>=<lower>-[<upper>][, ...]`.
    ///
    /// Optional whitespace around separators is skipped. A missing upper
    /// bound leaves the span open-ended; a missing lower bound, a missing
    /// `=`, an empty span list and non-digit bounds are all rejected with
    /// the failing position.
    pub fn parse(text: &str) -> Result<RangeHeader, ParseError> {
        let Some(eq) = text.find('=') else {
            return Err(ParseError::missing_equals(text));
        };

        let (unit_start, unit_end) = trim_ows(text, 0, eq);
        ensure!(unit_start < unit_end, ParseError::empty("range unit"));
        for (at, ch) in text[unit_start..unit_end].char_indices() {
            ensure!(is_tchar(ch), ParseError::invalid_character(ch, unit_start + at, text));
        }
        let unit = RangeUnit::from_token(&text[unit_start..unit_end]);

        let mut spans = Vec::new();
        let mut start = eq + 1;
        loop {
            let comma = text[start..].find(',').map(|rel| start + rel);
            let end = comma.unwrap_or(text.len());

            let (s, e) = trim_ows(text, start, end);
            if s == e {
                return Err(match comma {
                    // nothing between '=' or ',' and the next ','
                    Some(comma) => ParseError::invalid_character(',', comma, text),
                    None if spans.is_empty() => ParseError::empty("range list"),
                    None => ParseError::trailing_separator(start - 1, text),
                });
            }
            spans.push(parse_span(text, s, e)?);

            match comma {
                Some(comma) => start = comma + 1,
                None => break,
            }
        }

        trace!(unit = %unit, count = spans.len(), "parsed range header");
        Ok(RangeHeader { unit, spans })
    }
}

impl fmt::Display for RangeHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.unit)?;
        for (index, span) in self.spans.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{span}")?;
        }
        Ok(())
    }
}

impl FromStr for RangeHeader {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeHeader::parse(s)
    }
}

/// A parsed `Content-Range` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRange {
    /// `<unit> <first>-<last>/<complete|*>`
    Spanned { unit: RangeUnit, first: u64, last: u64, complete: Option<u64> },
    /// `<unit> */<complete>`, the 416 form.
    Unsatisfied { unit: RangeUnit, complete: u64 },
}

impl ContentRange {
    pub fn unit(&self) -> &RangeUnit {
        match self {
            ContentRange::Spanned { unit, .. } | ContentRange::Unsatisfied { unit, .. } => unit,
        }
    }

    /// Parses `<unit> <first>-<last>/<complete|*>` or `<unit> */<complete>`.
    pub fn parse(text: &str) -> Result<ContentRange, ParseError> {
        let Some(space) = text.find(' ') else {
            return Err(ParseError::unexpected_end(text));
        };

        ensure!(space > 0, ParseError::empty("range unit"));
        for (at, ch) in text[..space].char_indices() {
            ensure!(is_tchar(ch), ParseError::invalid_character(ch, at, text));
        }
        let unit = RangeUnit::from_token(&text[..space]);

        let rest_start = space + 1;
        let Some(slash) = text[rest_start..].find('/').map(|rel| rest_start + rel) else {
            return Err(ParseError::unexpected_end(text));
        };

        if &text[rest_start..slash] == "*" {
            let complete = parse_bound(text, slash + 1, text.len())?
                .ok_or_else(|| ParseError::invalid_number(slash + 1, text))?;
            return Ok(ContentRange::Unsatisfied { unit, complete });
        }

        let Some(dash) = text[rest_start..slash].find('-').map(|rel| rest_start + rel) else {
            return Err(ParseError::unexpected_end(text));
        };
        let first = parse_bound(text, rest_start, dash)?
            .ok_or_else(|| ParseError::invalid_number(rest_start, text))?;
        let last = parse_bound(text, dash + 1, slash)?
            .ok_or_else(|| ParseError::invalid_number(dash + 1, text))?;
        ensure!(first <= last, ParseError::span_out_of_order(rest_start, text));

        let complete = if &text[slash + 1..] == "*" {
            None
        } else {
            Some(
                parse_bound(text, slash + 1, text.len())?
                    .ok_or_else(|| ParseError::invalid_number(slash + 1, text))?,
            )
        };

        Ok(ContentRange::Spanned { unit, first, last, complete })
    }
}

impl fmt::Display for ContentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentRange::Spanned { unit, first, last, complete: Some(complete) } => {
                write!(f, "{unit} {first}-{last}/{complete}")
            }
            ContentRange::Spanned { unit, first, last, complete: None } => {
                write!(f, "{unit} {first}-{last}/*")
            }
            ContentRange::Unsatisfied { unit, complete } => write!(f, "{unit} */{complete}"),
        }
    }
}

impl FromStr for ContentRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentRange::parse(s)
    }
}

/// Narrows `[start, end)` past OWS on both sides.
fn trim_ows(text: &str, start: usize, end: usize) -> (usize, usize) {
    let slice = &text[start..end];
    let from_start = slice.len() - slice.trim_start_matches(is_ows).len();
    let from_end = slice.len() - slice.trim_end_matches(is_ows).len();
    let s = start + from_start;
    (s, (end - from_end).max(s))
}

/// Parses one span `lower-[upper]` between absolute positions `s` and `e`.
fn parse_span(text: &str, s: usize, e: usize) -> Result<ByteSpan, ParseError> {
    let Some(dash) = text[s..e].find('-').map(|rel| s + rel) else {
        return Err(ParseError::unexpected_end(text));
    };
    let lower =
        parse_bound(text, s, dash)?.ok_or_else(|| ParseError::invalid_number(s, text))?;
    match parse_bound(text, dash + 1, e)? {
        Some(upper) => {
            ensure!(lower <= upper, ParseError::span_out_of_order(s, text));
            Ok(ByteSpan { lower, upper: Some(upper) })
        }
        None => Ok(ByteSpan::open(lower)),
    }
}

/// Parses the digits between absolute positions `s` and `e`; `None` when
/// the slice is empty.
fn parse_bound(text: &str, s: usize, e: usize) -> Result<Option<u64>, ParseError> {
    if s >= e {
        return Ok(None);
    }
    let mut value: u64 = 0;
    for (at, ch) in text[s..e].char_indices() {
        let digit = ch.to_digit(10).ok_or_else(|| ParseError::invalid_number(s + at, text))?;
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or_else(|| ParseError::invalid_number(s + at, text))?;
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_spans() {
        let range = RangeHeader::parse("bytes=200-1000, 2000-6576, 19000-").unwrap();
        assert_eq!(range.unit(), &RangeUnit::Bytes);
        assert_eq!(
            range.spans(),
            &[
                ByteSpan::bounded(200, 1000).unwrap(),
                ByteSpan::bounded(2000, 6576).unwrap(),
                ByteSpan::open(19000),
            ]
        );
    }

    #[test]
    fn round_trips() {
        for text in ["bytes=200-1000, 2000-6576, 19000-", "bytes=0-0", "pages=1-5"] {
            assert_eq!(RangeHeader::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn unit_is_case_insensitive() {
        let range = RangeHeader::parse("BYTES=0-1").unwrap();
        assert_eq!(range.unit(), &RangeUnit::Bytes);
        let other = RangeHeader::parse("Pages=0-1").unwrap();
        assert_eq!(other.unit().as_str(), "pages");
        assert_eq!(RangeUnit::with("Bytes").unwrap(), RangeUnit::Bytes);
        assert!(RangeUnit::with("by tes").is_err());
    }

    #[test]
    fn missing_lower_bound_is_invalid() {
        assert_eq!(
            RangeHeader::parse("bytes=-500"),
            Err(ParseError::invalid_number(6, "bytes=-500"))
        );
    }

    #[test]
    fn missing_equals() {
        assert_eq!(
            RangeHeader::parse("bytes 0-1"),
            Err(ParseError::missing_equals("bytes 0-1"))
        );
    }

    #[test]
    fn non_digit_bounds() {
        assert_eq!(
            RangeHeader::parse("bytes=x-2"),
            Err(ParseError::invalid_number(6, "bytes=x-2"))
        );
        assert_eq!(
            RangeHeader::parse("bytes=1-2x"),
            Err(ParseError::invalid_number(9, "bytes=1-2x"))
        );
    }

    #[test]
    fn empty_and_dangling_lists() {
        assert_eq!(RangeHeader::parse("bytes="), Err(ParseError::empty("range list")));
        assert_eq!(
            RangeHeader::parse("bytes=1-2,"),
            Err(ParseError::trailing_separator(9, "bytes=1-2,"))
        );
        assert_eq!(
            RangeHeader::parse("bytes=,1-2"),
            Err(ParseError::invalid_character(',', 6, "bytes=,1-2"))
        );
    }

    #[test]
    fn out_of_order_span() {
        assert_eq!(
            RangeHeader::parse("bytes=500-200"),
            Err(ParseError::span_out_of_order(6, "bytes=500-200"))
        );
        assert!(ByteSpan::bounded(500, 200).is_err());
    }

    #[test]
    fn span_len() {
        assert_eq!(ByteSpan::bounded(0, 0).unwrap().len(), Some(1));
        assert_eq!(ByteSpan::bounded(200, 1000).unwrap().len(), Some(801));
        assert_eq!(ByteSpan::open(5).len(), None);
    }

    #[test]
    fn content_range_spanned() {
        let parsed = ContentRange::parse("bytes 0-499/1234").unwrap();
        assert_eq!(
            parsed,
            ContentRange::Spanned { unit: RangeUnit::Bytes, first: 0, last: 499, complete: Some(1234) }
        );
        assert_eq!(parsed.to_string(), "bytes 0-499/1234");

        let unknown = ContentRange::parse("bytes 0-499/*").unwrap();
        assert_eq!(
            unknown,
            ContentRange::Spanned { unit: RangeUnit::Bytes, first: 0, last: 499, complete: None }
        );
        assert_eq!(unknown.to_string(), "bytes 0-499/*");
    }

    #[test]
    fn content_range_unsatisfied() {
        let parsed = ContentRange::parse("bytes */1234").unwrap();
        assert_eq!(parsed, ContentRange::Unsatisfied { unit: RangeUnit::Bytes, complete: 1234 });
        assert_eq!(parsed.to_string(), "bytes */1234");
    }

    #[test]
    fn content_range_failures() {
        assert_eq!(
            ContentRange::parse("bytes"),
            Err(ParseError::unexpected_end("bytes"))
        );
        assert_eq!(
            ContentRange::parse("bytes 0-499"),
            Err(ParseError::unexpected_end("bytes 0-499"))
        );
        assert_eq!(
            ContentRange::parse("bytes */*"),
            Err(ParseError::invalid_number(8, "bytes */*"))
        );
        assert_eq!(
            ContentRange::parse("bytes 500-200/1234"),
            Err(ParseError::span_out_of_order(6, "bytes 500-200/1234"))
        );
    }
}
