//! Entity tags (RFC 7232).
//!
//! An [`ETag`] is either the wildcard `*` or a quoted validator string with
//! an optional weak indicator: `"xyzzy"`, `W/"xyzzy"`, `*`. Lists of tags
//! appear in `If-Match` / `If-None-Match`; [`ETag::parse_list`] handles the
//! comma-separated form and [`ETag::parse_one`] the single-tag form used by
//! the `ETag` response header itself.
//!
//! Equality is structural: wildcard only equals wildcard, and two tags are
//! equal when both value and weakness agree. The RFC's two comparison
//! functions are available separately as [`strong_eq`](ETag::strong_eq) and
//! [`weak_eq`](ETag::weak_eq).

mod parser;

use crate::chars::is_etagc;
use crate::error::ParseError;
use crate::utils::ensure;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An HTTP entity tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ETag {
    repr: Repr,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    /// `*`
    Wildcard,
    /// `"value"` or `W/"value"`
    Tag { value: Box<str>, weak: bool },
}

impl ETag {
    /// The wildcard tag `*`.
    pub const WILDCARD: ETag = ETag { repr: Repr::Wildcard };

    /// Builds a strong tag, validating `value` against the `etagc` grammar.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidCharacter`] naming the first byte that may not
    /// appear inside a quoted entity-tag (`"` included).
    pub fn strong(value: impl Into<String>) -> Result<ETag, ParseError> {
        Self::tag(value.into(), false)
    }

    /// Builds a weak tag (`W/"value"`), validating `value`.
    pub fn weak(value: impl Into<String>) -> Result<ETag, ParseError> {
        Self::tag(value.into(), true)
    }

    fn tag(value: String, weak: bool) -> Result<ETag, ParseError> {
        for (at, ch) in value.char_indices() {
            ensure!(is_etagc(ch), ParseError::invalid_character(ch, at, &value));
        }
        Ok(ETag { repr: Repr::Tag { value: value.into(), weak } })
    }

    /// Parses exactly one tag; separators and trailing text are rejected.
    pub fn parse_one(text: &str) -> Result<ETag, ParseError> {
        parser::parse_one(text)
    }

    /// Parses a comma-separated tag list, at least one tag.
    pub fn parse_list(text: &str) -> Result<Vec<ETag>, ParseError> {
        parser::parse_list(text)
    }

    /// The validator string. Empty for the wildcard and possibly for a tag
    /// written as `""`; [`is_wildcard`](Self::is_wildcard) disambiguates.
    pub fn value(&self) -> &str {
        match &self.repr {
            Repr::Wildcard => "",
            Repr::Tag { value, .. } => value,
        }
    }

    /// Whether this tag carries the weak indicator.
    pub fn is_weak(&self) -> bool {
        matches!(self.repr, Repr::Tag { weak: true, .. })
    }

    /// Whether this is the wildcard `*`.
    pub fn is_wildcard(&self) -> bool {
        matches!(self.repr, Repr::Wildcard)
    }

    /// Strong comparison (RFC 7232 §2.3.2): both tags must be strong and
    /// their values equal. The wildcard matches anything.
    pub fn strong_eq(&self, other: &ETag) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Wildcard, _) | (_, Repr::Wildcard) => true,
            (Repr::Tag { value: a, weak: false }, Repr::Tag { value: b, weak: false }) => a == b,
            _ => false,
        }
    }

    /// Weak comparison (RFC 7232 §2.3.2): values equal, weakness ignored.
    /// The wildcard matches anything.
    pub fn weak_eq(&self, other: &ETag) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Wildcard, _) | (_, Repr::Wildcard) => true,
            (Repr::Tag { value: a, .. }, Repr::Tag { value: b, .. }) => a == b,
        }
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Wildcard => f.write_str("*"),
            Repr::Tag { value, weak: false } => write!(f, "\"{value}\""),
            Repr::Tag { value, weak: true } => write!(f, "W/\"{value}\""),
        }
    }
}

impl FromStr for ETag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ETag::parse_one(s)
    }
}

impl Serialize for ETag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ETag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        ETag::parse_one(&text).map_err(serde::de::Error::custom)
    }
}
