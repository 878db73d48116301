//! Typed header names and the per-type value codec.
//!
//! Each header value family implements [`FieldValue`], the parse/format
//! round trip for its textual form. A [`TypedName`] pairs a
//! [`FieldName`] with the value type its header carries, so reading a
//! header becomes a lookup plus a typed parse:
//!
//! ```
//! use wirefield::typed;
//!
//! let mut headers = http::HeaderMap::new();
//! headers.insert(http::header::RANGE, "bytes=0-499".parse().unwrap());
//!
//! let range = typed::RANGE.get(&headers).unwrap().unwrap();
//! assert_eq!(range.spans()[0].upper(), Some(499));
//! ```

use crate::chars::is_ows;
use crate::error::ParseError;
use crate::etag::ETag;
use crate::method::Method;
use crate::name::FieldName;
use crate::range::{ContentRange, RangeHeader};
use crate::token::FieldToken;
use crate::utils::ensure;
use std::fmt;
use std::marker::PhantomData;

/// A header value family: how its text parses and how a value writes back.
///
/// The round-trip contract: `parse(s)` followed by `encode` reproduces a
/// string RFC-equivalent to `s`.
pub trait FieldValue: Sized {
    /// Parses the header value text.
    fn parse(text: &str) -> Result<Self, ParseError>;

    /// The canonical text for this value.
    fn encode(&self) -> String;
}

impl FieldValue for ETag {
    fn parse(text: &str) -> Result<Self, ParseError> {
        ETag::parse_one(text)
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

impl FieldValue for Vec<ETag> {
    fn parse(text: &str) -> Result<Self, ParseError> {
        ETag::parse_list(text)
    }

    fn encode(&self) -> String {
        join(self.iter())
    }
}

impl FieldValue for RangeHeader {
    fn parse(text: &str) -> Result<Self, ParseError> {
        RangeHeader::parse(text)
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

impl FieldValue for ContentRange {
    fn parse(text: &str) -> Result<Self, ParseError> {
        ContentRange::parse(text)
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

impl FieldValue for FieldToken {
    fn parse(text: &str) -> Result<Self, ParseError> {
        FieldToken::parse_one(text)
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

impl FieldValue for Vec<FieldToken> {
    fn parse(text: &str) -> Result<Self, ParseError> {
        FieldToken::parse_list(text)
    }

    fn encode(&self) -> String {
        join(self.iter())
    }
}

impl FieldValue for Method {
    fn parse(text: &str) -> Result<Self, ParseError> {
        Method::with(text.trim_matches(is_ows))
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

/// The `Allow` form: a comma-separated method list.
impl FieldValue for Vec<Method> {
    fn parse(text: &str) -> Result<Self, ParseError> {
        let mut methods = Vec::new();
        let mut start = 0;
        loop {
            let comma = text[start..].find(',').map(|rel| start + rel);
            let end = comma.unwrap_or(text.len());

            let segment = text[start..end].trim_matches(is_ows);
            if segment.is_empty() {
                return Err(match comma {
                    Some(comma) => ParseError::invalid_character(',', comma, text),
                    None if methods.is_empty() => ParseError::empty("method list"),
                    None => ParseError::trailing_separator(start - 1, text),
                });
            }
            // re-anchor positions at the segment's offset in the full text
            let offset = start + (text[start..end].len() - text[start..end].trim_start_matches(is_ows).len());
            methods.push(Method::with(segment).map_err(|error| match error {
                ParseError::InvalidCharacter { ch, at, .. } => {
                    ParseError::invalid_character(ch, offset + at, text)
                }
                other => other,
            })?);

            match comma {
                Some(comma) => start = comma + 1,
                None => break,
            }
        }
        Ok(methods)
    }

    fn encode(&self) -> String {
        join(self.iter())
    }
}

/// The `Content-Length` form: a single decimal number.
impl FieldValue for u64 {
    fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim_matches(is_ows);
        ensure!(!trimmed.is_empty(), ParseError::empty("number"));
        trimmed.parse().map_err(|_| {
            let at = text
                .char_indices()
                .find(|(_, ch)| !ch.is_ascii_digit() && !is_ows(*ch))
                .map_or(0, |(at, _)| at);
            ParseError::invalid_number(at, text)
        })
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

/// Opaque text headers (`Server`, `User-Agent`): kept as written, less the
/// surrounding whitespace.
impl FieldValue for String {
    fn parse(text: &str) -> Result<Self, ParseError> {
        Ok(text.trim_matches(is_ows).to_string())
    }

    fn encode(&self) -> String {
        self.clone()
    }
}

/// The `Content-Type` form: a media type.
impl FieldValue for mime::Mime {
    fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim_matches(is_ows);
        ensure!(!trimmed.is_empty(), ParseError::empty("media type"));
        trimmed.parse().map_err(|_| ParseError::invalid_media_type(text))
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

fn join<T: fmt::Display>(values: impl Iterator<Item = T>) -> String {
    let mut out = String::new();
    for (index, value) in values.enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(&value.to_string());
    }
    out
}

/// A header name bound to the value type its header carries.
pub struct TypedName<T> {
    name: FieldName,
    _marker: PhantomData<fn() -> T>,
}

pub const ETAG: TypedName<ETag> = TypedName::new(FieldName::ETAG);
pub const IF_MATCH: TypedName<Vec<ETag>> = TypedName::new(FieldName::IF_MATCH);
pub const IF_NONE_MATCH: TypedName<Vec<ETag>> = TypedName::new(FieldName::IF_NONE_MATCH);
pub const RANGE: TypedName<RangeHeader> = TypedName::new(FieldName::RANGE);
pub const CONTENT_RANGE: TypedName<ContentRange> = TypedName::new(FieldName::CONTENT_RANGE);
pub const ACCEPT_CHARSET: TypedName<Vec<FieldToken>> = TypedName::new(FieldName::ACCEPT_CHARSET);
pub const ACCEPT_ENCODING: TypedName<Vec<FieldToken>> = TypedName::new(FieldName::ACCEPT_ENCODING);
pub const ACCEPT_LANGUAGE: TypedName<Vec<FieldToken>> = TypedName::new(FieldName::ACCEPT_LANGUAGE);
pub const CONTENT_ENCODING: TypedName<Vec<FieldToken>> = TypedName::new(FieldName::CONTENT_ENCODING);
pub const CONTENT_LENGTH: TypedName<u64> = TypedName::new(FieldName::CONTENT_LENGTH);
pub const CONTENT_TYPE: TypedName<mime::Mime> = TypedName::new(FieldName::CONTENT_TYPE);
pub const ALLOW: TypedName<Vec<Method>> = TypedName::new(FieldName::ALLOW);
pub const SERVER: TypedName<String> = TypedName::new(FieldName::SERVER);
pub const USER_AGENT: TypedName<String> = TypedName::new(FieldName::USER_AGENT);

impl<T> TypedName<T> {
    /// Binds `name` to the value type `T`.
    pub const fn new(name: FieldName) -> TypedName<T> {
        TypedName { name, _marker: PhantomData }
    }

    /// The underlying field name.
    pub fn name(&self) -> &FieldName {
        &self.name
    }
}

impl<T: FieldValue> TypedName<T> {
    /// Parses a value of this header's type.
    pub fn parse(&self, text: &str) -> Result<T, ParseError> {
        T::parse(text)
    }

    /// Formats a value of this header's type.
    pub fn encode(&self, value: &T) -> String {
        value.encode()
    }

    /// Reads and parses this header from `headers`.
    ///
    /// `Ok(None)` when the header is absent.
    ///
    /// # Errors
    ///
    /// [`ParseError::NotText`] when the raw value is not visible ASCII, or
    /// any parse failure of the value itself.
    pub fn get(&self, headers: &http::HeaderMap) -> Result<Option<T>, ParseError> {
        let Some(value) = headers.get(http::HeaderName::from(&self.name)) else {
            return Ok(None);
        };
        let text = value.to_str().map_err(|_| ParseError::not_text(&self.name))?;
        T::parse(text).map(Some)
    }

    /// Encodes `value` and stores it in `headers`, replacing any previous
    /// value.
    pub fn insert(&self, headers: &mut http::HeaderMap, value: &T) -> Result<(), ParseError> {
        let encoded = value.encode();
        let value =
            http::HeaderValue::from_str(&encoded).map_err(|_| ParseError::not_text(&self.name))?;
        headers.insert(http::HeaderName::from(&self.name), value);
        Ok(())
    }
}

impl<T> Clone for TypedName<T> {
    fn clone(&self) -> Self {
        TypedName { name: self.name.clone(), _marker: PhantomData }
    }
}

impl<T> fmt::Debug for TypedName<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedName").field(&self.name).finish()
    }
}

impl<T> fmt::Display for TypedName<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{ByteSpan, RangeUnit};
    use indoc::indoc;

    #[test]
    fn typed_parse_round_trips() {
        let etag = ETAG.parse("W/\"abc\"").unwrap();
        assert_eq!(ETAG.encode(&etag), "W/\"abc\"");

        let range = RANGE.parse("bytes=200-1000, 2000-6576, 19000-").unwrap();
        assert_eq!(RANGE.encode(&range), "bytes=200-1000, 2000-6576, 19000-");

        let charsets = ACCEPT_CHARSET.parse("utf-8, iso-8859-1;q=0.5").unwrap();
        assert_eq!(ACCEPT_CHARSET.encode(&charsets), "utf-8, iso-8859-1; q=0.5");
    }

    #[test]
    fn get_and_insert_round_trip() {
        let mut headers = http::HeaderMap::new();

        let range = RangeHeader::new(
            RangeUnit::Bytes,
            vec![ByteSpan::bounded(0, 499).unwrap(), ByteSpan::open(1000)],
        )
        .unwrap();
        RANGE.insert(&mut headers, &range).unwrap();
        assert_eq!(headers.get(http::header::RANGE).unwrap(), "bytes=0-499, 1000-");

        let back = RANGE.get(&headers).unwrap().unwrap();
        assert_eq!(back, range);
    }

    #[test]
    fn get_absent_is_none() {
        let headers = http::HeaderMap::new();
        assert_eq!(ETAG.get(&headers).unwrap(), None);
    }

    #[test]
    fn get_propagates_parse_failures() {
        let mut headers = http::HeaderMap::new();
        headers.insert(http::header::IF_NONE_MATCH, "\"abc".parse().unwrap());
        assert_eq!(
            IF_NONE_MATCH.get(&headers),
            Err(ParseError::missing_closing_quote("\"abc"))
        );
    }

    #[test]
    fn get_rejects_opaque_values() {
        let mut headers = http::HeaderMap::new();
        headers.insert(http::header::ETAG, http::HeaderValue::from_bytes(b"\xff\xfe").unwrap());
        assert_eq!(ETAG.get(&headers), Err(ParseError::not_text("ETag")));
    }

    #[test]
    fn method_list() {
        let allow: Vec<Method> = ALLOW.parse("GET, HEAD, put").unwrap();
        assert_eq!(allow, vec![Method::GET, Method::HEAD, Method::PUT]);
        assert_eq!(ALLOW.encode(&allow), "GET, HEAD, PUT");

        assert_eq!(
            ALLOW.parse("GET, HE AD"),
            Err(ParseError::invalid_character(' ', 7, "GET, HE AD"))
        );
        assert_eq!(
            ALLOW.parse("GET,"),
            Err(ParseError::trailing_separator(3, "GET,"))
        );
    }

    #[test]
    fn content_length() {
        assert_eq!(CONTENT_LENGTH.parse(" 1234 ").unwrap(), 1234);
        assert_eq!(
            CONTENT_LENGTH.parse("12x4"),
            Err(ParseError::invalid_number(2, "12x4"))
        );
        assert_eq!(CONTENT_LENGTH.parse(""), Err(ParseError::empty("number")));
    }

    #[test]
    fn content_type_uses_mime() {
        let media = CONTENT_TYPE.parse("text/html; charset=utf-8").unwrap();
        assert_eq!(media.type_(), mime::TEXT);
        assert_eq!(media.get_param(mime::CHARSET).unwrap(), mime::UTF_8);
        assert!(CONTENT_TYPE.parse("nonsense").is_err());
    }

    #[test]
    fn typed_access_over_a_parsed_request() {
        let raw = indoc! {r#"
        GET /report.pdf HTTP/1.1
        Host: files.example
        If-None-Match: "33a64df5", W/"0815"
        Range: bytes=0-499, 19000-

        "#};

        let mut parsed_headers = [httparse::EMPTY_HEADER; 8];
        let mut request = httparse::Request::new(&mut parsed_headers);
        let status = request.parse(raw.as_bytes()).unwrap();
        assert!(status.is_complete());

        let mut headers = http::HeaderMap::new();
        for header in request.headers.iter() {
            let name: http::HeaderName = header.name.parse().unwrap();
            headers.append(name, http::HeaderValue::from_bytes(header.value).unwrap());
        }

        let tags = IF_NONE_MATCH.get(&headers).unwrap().unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].value(), "33a64df5");
        assert!(tags[1].is_weak());

        let range = RANGE.get(&headers).unwrap().unwrap();
        assert_eq!(range.unit(), &RangeUnit::Bytes);
        assert_eq!(range.spans(), &[ByteSpan::bounded(0, 499).unwrap(), ByteSpan::open(19000)]);
    }

    #[test]
    fn opaque_text_headers() {
        let server = SERVER.parse("  wirefield/0.1  ").unwrap();
        assert_eq!(server, "wirefield/0.1");
        assert_eq!(SERVER.encode(&server), "wirefield/0.1");
    }
}
