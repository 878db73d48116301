//! HTTP request methods.
//!
//! [`Method`] is an interned uppercase method token. The standard verbs are
//! constants backed by a registry, so [`Method::with`] returns the shared
//! [`Method::GET`] for both `"GET"` and `"get"`. Non-standard tokens are
//! validated and stored uppercased, which keeps equality a plain string
//! comparison.

use crate::chars::is_tchar;
use crate::error::ParseError;
use crate::utils::ensure;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// An HTTP request method token.
#[derive(Debug, Clone)]
pub struct Method {
    repr: Repr,
}

#[derive(Debug, Clone)]
enum Repr {
    Standard(&'static str),
    Custom(Box<str>),
}

macro_rules! standard_methods {
    ($(($konst:ident, $text:literal),)+) => {
        impl Method {
            $(
                pub const $konst: Method = Method { repr: Repr::Standard($text) };
            )+
        }

        const STANDARD: &[&str] = &[$($text,)+];
    };
}

standard_methods! {
    (GET, "GET"),
    (HEAD, "HEAD"),
    (POST, "POST"),
    (PUT, "PUT"),
    (DELETE, "DELETE"),
    (CONNECT, "CONNECT"),
    (OPTIONS, "OPTIONS"),
    (TRACE, "TRACE"),
    (PATCH, "PATCH"),
}

static REGISTRY: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| STANDARD.iter().map(|method| (*method, *method)).collect());

impl Method {
    /// Returns the method for `text`, case-insensitively.
    ///
    /// Standard verbs resolve to their shared constant; anything else must
    /// be a valid token and is stored uppercased.
    ///
    /// # Errors
    ///
    /// [`ParseError::Empty`] for an empty string, and
    /// [`ParseError::InvalidCharacter`] naming the first non-token byte of
    /// the input as given.
    pub fn with(text: &str) -> Result<Method, ParseError> {
        ensure!(!text.is_empty(), ParseError::empty("method"));

        let upper = text.to_ascii_uppercase();
        if let Some(standard) = REGISTRY.get(upper.as_str()) {
            return Ok(Method { repr: Repr::Standard(standard) });
        }

        for (at, ch) in text.char_indices() {
            ensure!(is_tchar(ch), ParseError::invalid_character(ch, at, text));
        }
        Ok(Method { repr: Repr::Custom(upper.into()) })
    }

    /// The uppercase method text.
    pub fn as_str(&self) -> &str {
        match &self.repr {
            Repr::Standard(text) => text,
            Repr::Custom(text) => text,
        }
    }

    /// Whether this is one of the registered standard verbs.
    pub fn is_standard(&self) -> bool {
        matches!(self.repr, Repr::Standard(_))
    }

    /// Safe methods never modify server state (RFC 9110 §9.2.1).
    pub fn is_safe(&self) -> bool {
        matches!(self.as_str(), "GET" | "HEAD" | "OPTIONS" | "TRACE")
    }

    /// Idempotent methods may be retried freely (RFC 9110 §9.2.2).
    pub fn is_idempotent(&self) -> bool {
        self.is_safe() || matches!(self.as_str(), "PUT" | "DELETE")
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Method {}

impl Hash for Method {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::with(s)
    }
}

impl From<&Method> for http::Method {
    fn from(method: &Method) -> Self {
        // method tokens are validated tchars, always a valid http method
        http::Method::from_bytes(method.as_str().as_bytes()).unwrap()
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = ParseError;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        Method::with(method.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Method::with(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_is_case_insensitive() {
        let lower = Method::with("get").unwrap();
        let upper = Method::with("GET").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower, Method::GET);
        assert!(lower.is_standard());
        assert_eq!(lower.as_str(), "GET");
    }

    #[test]
    fn custom_tokens_are_uppercased() {
        let method = Method::with("purge").unwrap();
        assert!(!method.is_standard());
        assert_eq!(method.as_str(), "PURGE");
        assert_eq!(method, Method::with("PURGE").unwrap());
    }

    #[test]
    fn rejects_invalid_tokens() {
        assert_eq!(Method::with(""), Err(ParseError::empty("method")));
        assert_eq!(
            Method::with("GE T"),
            Err(ParseError::invalid_character(' ', 2, "GE T"))
        );
    }

    #[test]
    fn safety_and_idempotence() {
        assert!(Method::GET.is_safe());
        assert!(Method::HEAD.is_safe());
        assert!(!Method::POST.is_safe());
        assert!(Method::PUT.is_idempotent());
        assert!(Method::DELETE.is_idempotent());
        assert!(!Method::POST.is_idempotent());
        assert!(!Method::PATCH.is_idempotent());
    }

    #[test]
    fn converts_to_and_from_http() {
        assert_eq!(http::Method::from(&Method::DELETE), http::Method::DELETE);
        assert_eq!(Method::try_from(&http::Method::OPTIONS).unwrap(), Method::OPTIONS);
    }

    #[test]
    fn serde_round_trip() {
        assert_eq!(serde_json::to_string(&Method::GET).unwrap(), "\"GET\"");
        let back: Method = serde_json::from_str("\"put\"").unwrap();
        assert_eq!(back, Method::PUT);
    }
}
