//! Typed HTTP header field values.
//!
//! This crate models the value side of HTTP headers: names, methods,
//! status codes, entity tags, ranges and content-negotiation tokens, each
//! as an immutable value type with a hand-rolled character-level parser
//! and an exact textual round trip. It is the interpretation layer that
//! sits on top of whatever parses the message framing — the raw name/value
//! pairs come from `httparse`, `http::HeaderMap` or anywhere else, and
//! this crate turns their text into meaning.
//!
//! # Features
//!
//! - Interned, case-insensitive [`FieldName`]s and [`Method`]s with shared
//!   constants for the standard registry
//! - [`StatusCode`] with categories and default reason phrases
//! - [`ETag`] parsing and RFC 7232 strong/weak comparison
//! - [`RangeHeader`] / [`ContentRange`] byte spans
//! - [`FieldToken`] lists with parameters and q-values
//! - A per-type codec ([`typed::FieldValue`]) with typed constants for
//!   reading and writing `http::HeaderMap`
//! - Positional parse errors: every failure names the offending character
//!   and its byte position
//!
//! # Example
//!
//! ```
//! use wirefield::{ETag, typed};
//!
//! let current = ETag::strong("v2").unwrap();
//!
//! let mut headers = http::HeaderMap::new();
//! headers.insert(http::header::IF_NONE_MATCH, "\"v1\", W/\"v2\"".parse().unwrap());
//!
//! let candidates = typed::IF_NONE_MATCH.get(&headers).unwrap().unwrap();
//! assert!(candidates.iter().any(|tag| tag.weak_eq(&current)));
//! assert!(!candidates.iter().any(|tag| tag.strong_eq(&current)));
//! ```
//!
//! # Architecture
//!
//! The crate is a flat collection of value modules:
//!
//! - [`name`]: header field names and the standard-name registry
//! - [`method`]: request method tokens
//! - [`status`]: status codes, categories, reason phrases
//! - [`etag`]: entity tags and their list parser
//! - [`range`]: `Range` / `Content-Range` values
//! - [`token`]: negotiation tokens with parameters
//! - [`typed`]: the [`FieldValue`](typed::FieldValue) codec trait,
//!   [`TypedName`](typed::TypedName) constants and `HeaderMap` access
//! - [`writer`]: serializing field lines into a `bytes::BytesMut`
//!
//! There is no control flow between them beyond: obtain a name, look up
//! its codec, parse or format a string. Every type is immutable — the
//! "setters" return new values — so everything is `Send + Sync` without a
//! lock in sight.
//!
//! # Errors
//!
//! All parsing returns [`ParseError`]. Parsing is all-or-nothing per
//! header value: there is no partial result and no recovery, just an error
//! that points at the first offending byte, e.g.
//! `invalid character '@' at 5 in "abcde@f"`.

pub mod chars;
pub mod etag;
pub mod method;
pub mod name;
pub mod range;
pub mod status;
pub mod token;
pub mod typed;
pub mod writer;

mod error;
pub use error::ParseError;

mod utils;

pub use etag::ETag;
pub use method::Method;
pub use name::FieldName;
pub use range::{ByteSpan, ContentRange, RangeHeader, RangeUnit};
pub use status::{Status, StatusCategory, StatusCode};
pub use token::{FieldToken, ParamName};
