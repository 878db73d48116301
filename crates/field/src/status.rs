//! HTTP status codes, categories and reason phrases.

use crate::error::ParseError;
use crate::utils::ensure;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A numeric HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u16);

/// The class of a status code, derived from its hundreds digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    /// 1xx
    Informational,
    /// 2xx
    Successful,
    /// 3xx
    Redirection,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
    /// anything outside 100..=599
    Unknown,
}

impl StatusCode {
    pub const CONTINUE: StatusCode = StatusCode(100);
    pub const SWITCHING_PROTOCOLS: StatusCode = StatusCode(101);
    pub const OK: StatusCode = StatusCode(200);
    pub const CREATED: StatusCode = StatusCode(201);
    pub const ACCEPTED: StatusCode = StatusCode(202);
    pub const NO_CONTENT: StatusCode = StatusCode(204);
    pub const PARTIAL_CONTENT: StatusCode = StatusCode(206);
    pub const MOVED_PERMANENTLY: StatusCode = StatusCode(301);
    pub const FOUND: StatusCode = StatusCode(302);
    pub const SEE_OTHER: StatusCode = StatusCode(303);
    pub const NOT_MODIFIED: StatusCode = StatusCode(304);
    pub const TEMPORARY_REDIRECT: StatusCode = StatusCode(307);
    pub const PERMANENT_REDIRECT: StatusCode = StatusCode(308);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const UNAUTHORIZED: StatusCode = StatusCode(401);
    pub const FORBIDDEN: StatusCode = StatusCode(403);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const METHOD_NOT_ALLOWED: StatusCode = StatusCode(405);
    pub const NOT_ACCEPTABLE: StatusCode = StatusCode(406);
    pub const CONFLICT: StatusCode = StatusCode(409);
    pub const GONE: StatusCode = StatusCode(410);
    pub const LENGTH_REQUIRED: StatusCode = StatusCode(411);
    pub const PRECONDITION_FAILED: StatusCode = StatusCode(412);
    pub const RANGE_NOT_SATISFIABLE: StatusCode = StatusCode(416);
    pub const EXPECTATION_FAILED: StatusCode = StatusCode(417);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);
    pub const NOT_IMPLEMENTED: StatusCode = StatusCode(501);
    pub const BAD_GATEWAY: StatusCode = StatusCode(502);
    pub const SERVICE_UNAVAILABLE: StatusCode = StatusCode(503);
    pub const GATEWAY_TIMEOUT: StatusCode = StatusCode(504);
    pub const HTTP_VERSION_NOT_SUPPORTED: StatusCode = StatusCode(505);

    /// Builds a status code, rejecting values outside the three-digit wire
    /// form.
    pub fn from_u16(code: u16) -> Result<StatusCode, ParseError> {
        ensure!((100..=999).contains(&code), ParseError::InvalidStatusCode { code });
        Ok(StatusCode(code))
    }

    /// The numeric code.
    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// The code's category, bucketed by integer division.
    ///
    /// Boundary behavior: 199 is still informational, 200 and 299 are
    /// successful, 300 starts the redirects.
    pub fn category(self) -> StatusCategory {
        match self.0 / 100 {
            1 => StatusCategory::Informational,
            2 => StatusCategory::Successful,
            3 => StatusCategory::Redirection,
            4 => StatusCategory::ClientError,
            5 => StatusCategory::ServerError,
            _ => StatusCategory::Unknown,
        }
    }

    /// The standard reason phrase for this code, if it has one.
    pub fn default_reason(self) -> Option<&'static str> {
        let reason = match self.0 {
            100 => "Continue",
            101 => "Switching Protocols",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            203 => "Non-Authoritative Information",
            204 => "No Content",
            205 => "Reset Content",
            206 => "Partial Content",
            300 => "Multiple Choices",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            304 => "Not Modified",
            305 => "Use Proxy",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            402 => "Payment Required",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            406 => "Not Acceptable",
            407 => "Proxy Authentication Required",
            408 => "Request Timeout",
            409 => "Conflict",
            410 => "Gone",
            411 => "Length Required",
            412 => "Precondition Failed",
            413 => "Content Too Large",
            414 => "URI Too Long",
            415 => "Unsupported Media Type",
            416 => "Range Not Satisfiable",
            417 => "Expectation Failed",
            421 => "Misdirected Request",
            426 => "Upgrade Required",
            428 => "Precondition Required",
            429 => "Too Many Requests",
            431 => "Request Header Fields Too Large",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            505 => "HTTP Version Not Supported",
            _ => return None,
        };
        Some(reason)
    }

    /// Pairs this code with its default reason phrase (empty when the code
    /// has no registered phrase).
    pub fn status(self) -> Status {
        Status { code: self, reason: Cow::Borrowed(self.default_reason().unwrap_or("")) }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl From<http::StatusCode> for StatusCode {
    fn from(code: http::StatusCode) -> Self {
        StatusCode(code.as_u16())
    }
}

impl TryFrom<StatusCode> for http::StatusCode {
    type Error = ParseError;

    fn try_from(code: StatusCode) -> Result<Self, Self::Error> {
        http::StatusCode::from_u16(code.0).map_err(|_| ParseError::InvalidStatusCode { code: code.0 })
    }
}

impl Serialize for StatusCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u16::deserialize(deserializer)?;
        StatusCode::from_u16(code).map_err(serde::de::Error::custom)
    }
}

/// A status code together with its reason phrase.
///
/// Immutable: [`with_reason`](Status::with_reason) returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    code: StatusCode,
    reason: Cow<'static, str>,
}

impl Status {
    /// The numeric code.
    pub fn code(&self) -> StatusCode {
        self.code
    }

    /// The reason phrase.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns a copy of this status carrying `reason` instead.
    pub fn with_reason(&self, reason: impl Into<Cow<'static, str>>) -> Status {
        Status { code: self.code, reason: reason.into() }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reason.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} {}", self.code, self.reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_bucket_by_hundreds() {
        assert_eq!(StatusCode::NOT_FOUND.category(), StatusCategory::ClientError);
        assert_eq!(StatusCode::OK.category(), StatusCategory::Successful);
        assert_eq!(StatusCode::SERVICE_UNAVAILABLE.category(), StatusCategory::ServerError);
        assert_eq!(StatusCode::NOT_MODIFIED.category(), StatusCategory::Redirection);
        assert_eq!(StatusCode::CONTINUE.category(), StatusCategory::Informational);
    }

    #[test]
    fn category_boundaries() {
        assert_eq!(StatusCode::from_u16(199).unwrap().category(), StatusCategory::Informational);
        assert_eq!(StatusCode::from_u16(200).unwrap().category(), StatusCategory::Successful);
        assert_eq!(StatusCode::from_u16(299).unwrap().category(), StatusCategory::Successful);
        assert_eq!(StatusCode::from_u16(300).unwrap().category(), StatusCategory::Redirection);
        assert_eq!(StatusCode::from_u16(999).unwrap().category(), StatusCategory::Unknown);
    }

    #[test]
    fn rejects_non_wire_codes() {
        assert_eq!(StatusCode::from_u16(99), Err(ParseError::InvalidStatusCode { code: 99 }));
        assert_eq!(StatusCode::from_u16(1000), Err(ParseError::InvalidStatusCode { code: 1000 }));
    }

    #[test]
    fn default_reasons() {
        assert_eq!(StatusCode::NOT_FOUND.default_reason(), Some("Not Found"));
        assert_eq!(StatusCode::OK.default_reason(), Some("OK"));
        assert_eq!(StatusCode::from_u16(299).unwrap().default_reason(), None);
    }

    #[test]
    fn status_is_immutable() {
        let status = StatusCode::NOT_FOUND.status();
        assert_eq!(status.to_string(), "404 Not Found");

        let teapot = status.with_reason("I'm Lost");
        assert_eq!(teapot.to_string(), "404 I'm Lost");
        // the original is untouched
        assert_eq!(status.reason(), "Not Found");
    }

    #[test]
    fn converts_to_and_from_http() {
        let code: StatusCode = http::StatusCode::IM_A_TEAPOT.into();
        assert_eq!(code.as_u16(), 418);
        assert_eq!(http::StatusCode::try_from(StatusCode::OK).unwrap(), http::StatusCode::OK);
    }

    #[test]
    fn serde_uses_the_number() {
        assert_eq!(serde_json::to_string(&StatusCode::OK).unwrap(), "200");
        let back: StatusCode = serde_json::from_str("404").unwrap();
        assert_eq!(back, StatusCode::NOT_FOUND);
        assert!(serde_json::from_str::<StatusCode>("99").is_err());
    }
}
