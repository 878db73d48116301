//! Header field names.
//!
//! [`FieldName`] is a case-insensitively interned header name. The standard
//! names live in a constant table: looking one of them up through
//! [`FieldName::with`] hands back the shared constant rather than a fresh
//! allocation, so `with("etag")`, `with("ETag")` and [`FieldName::ETAG`] are
//! all the same value. Unknown names are validated against the RFC 9110
//! token grammar and carried with their original spelling.

use crate::chars::is_tchar;
use crate::error::ParseError;
use crate::utils::ensure;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use wirefield_text::CaseSensitivity;

/// A header field name, compared and hashed case-insensitively.
#[derive(Debug, Clone)]
pub struct FieldName {
    repr: Repr,
}

#[derive(Debug, Clone)]
enum Repr {
    /// One of the registered standard names, canonical spelling.
    Standard(&'static str),
    /// A validated token, original spelling preserved.
    Custom(Box<str>),
}

macro_rules! standard_names {
    ($(($konst:ident, $text:literal),)+) => {
        impl FieldName {
            $(
                pub const $konst: FieldName = FieldName { repr: Repr::Standard($text) };
            )+
        }

        /// Canonical spellings of every registered standard name.
        const STANDARD: &[&str] = &[$($text,)+];
    };
}

standard_names! {
    (ACCEPT, "Accept"),
    (ACCEPT_CHARSET, "Accept-Charset"),
    (ACCEPT_ENCODING, "Accept-Encoding"),
    (ACCEPT_LANGUAGE, "Accept-Language"),
    (ACCEPT_RANGES, "Accept-Ranges"),
    (AGE, "Age"),
    (ALLOW, "Allow"),
    (AUTHORIZATION, "Authorization"),
    (CACHE_CONTROL, "Cache-Control"),
    (CONNECTION, "Connection"),
    (CONTENT_ENCODING, "Content-Encoding"),
    (CONTENT_LANGUAGE, "Content-Language"),
    (CONTENT_LENGTH, "Content-Length"),
    (CONTENT_LOCATION, "Content-Location"),
    (CONTENT_RANGE, "Content-Range"),
    (CONTENT_TYPE, "Content-Type"),
    (DATE, "Date"),
    (ETAG, "ETag"),
    (EXPECT, "Expect"),
    (EXPIRES, "Expires"),
    (HOST, "Host"),
    (IF_MATCH, "If-Match"),
    (IF_MODIFIED_SINCE, "If-Modified-Since"),
    (IF_NONE_MATCH, "If-None-Match"),
    (IF_RANGE, "If-Range"),
    (IF_UNMODIFIED_SINCE, "If-Unmodified-Since"),
    (LAST_MODIFIED, "Last-Modified"),
    (LOCATION, "Location"),
    (RANGE, "Range"),
    (REFERER, "Referer"),
    (RETRY_AFTER, "Retry-After"),
    (SERVER, "Server"),
    (TRANSFER_ENCODING, "Transfer-Encoding"),
    (UPGRADE, "Upgrade"),
    (USER_AGENT, "User-Agent"),
    (VARY, "Vary"),
    (VIA, "Via"),
}

/// Lookup table from lowercase spelling to the canonical standard spelling.
static REGISTRY: Lazy<HashMap<String, &'static str>> =
    Lazy::new(|| STANDARD.iter().map(|name| (name.to_ascii_lowercase(), *name)).collect());

impl FieldName {
    /// Returns the name for `text`.
    ///
    /// Standard names resolve to their shared constant regardless of case.
    /// Anything else must be a valid RFC 9110 token and is carried with the
    /// given spelling.
    ///
    /// # Errors
    ///
    /// [`ParseError::Empty`] for an empty string, and
    /// [`ParseError::InvalidCharacter`] naming the first non-token byte.
    pub fn with(text: &str) -> Result<FieldName, ParseError> {
        ensure!(!text.is_empty(), ParseError::empty("header name"));

        if let Some(canonical) = REGISTRY.get(&text.to_ascii_lowercase()) {
            return Ok(FieldName { repr: Repr::Standard(canonical) });
        }

        for (at, ch) in text.char_indices() {
            ensure!(is_tchar(ch), ParseError::invalid_character(ch, at, text));
        }
        Ok(FieldName { repr: Repr::Custom(text.into()) })
    }

    /// The name's text: the canonical spelling for standard names, the
    /// original spelling otherwise.
    pub fn as_str(&self) -> &str {
        match &self.repr {
            Repr::Standard(text) => text,
            Repr::Custom(text) => text,
        }
    }

    /// Whether this name is one of the registered standard names.
    pub fn is_standard(&self) -> bool {
        matches!(self.repr, Repr::Standard(_))
    }
}

impl PartialEq for FieldName {
    fn eq(&self, other: &Self) -> bool {
        CaseSensitivity::Insensitive.eq(self.as_str(), other.as_str())
    }
}

impl Eq for FieldName {}

impl PartialEq<str> for FieldName {
    fn eq(&self, other: &str) -> bool {
        CaseSensitivity::Insensitive.eq(self.as_str(), other)
    }
}

impl Hash for FieldName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        CaseSensitivity::Insensitive.hash_into(self.as_str(), state);
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::with(s)
    }
}

impl From<&FieldName> for http::HeaderName {
    fn from(name: &FieldName) -> Self {
        // field names are validated tchars, always a valid http name
        http::HeaderName::from_bytes(name.as_str().as_bytes()).unwrap()
    }
}

impl TryFrom<&http::HeaderName> for FieldName {
    type Error = ParseError;

    fn try_from(name: &http::HeaderName) -> Result<Self, Self::Error> {
        FieldName::with(name.as_str())
    }
}

impl Serialize for FieldName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        FieldName::with(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_lookup_is_case_insensitive() {
        for spelling in ["etag", "ETAG", "ETag", "eTaG"] {
            let name = FieldName::with(spelling).unwrap();
            assert!(name.is_standard(), "{spelling} should hit the registry");
            assert_eq!(name.as_str(), "ETag");
            assert_eq!(name, FieldName::ETAG);
        }
    }

    #[test]
    fn custom_names_keep_their_spelling() {
        let name = FieldName::with("X-Request-Id").unwrap();
        assert!(!name.is_standard());
        assert_eq!(name.as_str(), "X-Request-Id");
        assert_eq!(name, FieldName::with("x-request-id").unwrap());
    }

    #[test]
    fn equality_and_hash_are_case_insensitive() {
        let mut set = HashSet::new();
        set.insert(FieldName::with("x-trace").unwrap());
        assert!(set.contains(&FieldName::with("X-Trace").unwrap()));
        assert_eq!(FieldName::CONTENT_LENGTH, *"content-length");
    }

    #[test]
    fn rejects_invalid_characters() {
        assert_eq!(FieldName::with(""), Err(ParseError::empty("header name")));
        assert_eq!(
            FieldName::with("bad name"),
            Err(ParseError::invalid_character(' ', 3, "bad name"))
        );
        assert_eq!(
            FieldName::with("x:y"),
            Err(ParseError::invalid_character(':', 1, "x:y"))
        );
    }

    #[test]
    fn converts_to_and_from_http() {
        let name = http::HeaderName::from(&FieldName::CONTENT_RANGE);
        assert_eq!(name, http::header::CONTENT_RANGE);
        let back = FieldName::try_from(&http::header::ETAG).unwrap();
        assert_eq!(back, FieldName::ETAG);
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&FieldName::ETAG).unwrap();
        assert_eq!(json, "\"ETag\"");
        let back: FieldName = serde_json::from_str("\"etag\"").unwrap();
        assert_eq!(back, FieldName::ETAG);
        assert!(serde_json::from_str::<FieldName>("\"bad name\"").is_err());
    }
}
