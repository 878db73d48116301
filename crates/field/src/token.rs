//! Content-negotiation tokens.
//!
//! A [`FieldToken`] is a token value plus named parameters, the shape shared
//! by `Accept-Charset`, `Accept-Encoding`, `Accept-Language`, `TE` and
//! friends: `gzip;q=1.0`, `iso-8859-1;q=0.5`. Lists are comma-separated;
//! parameters keep their order, and parameter names compare
//! case-insensitively, so `q=0.5` and `Q=0.5` are the same parameter.

use crate::chars::{is_ows, is_tchar};
use crate::error::ParseError;
use crate::utils::ensure;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use tracing::trace;
use wirefield_text::CaseSensitivity;

/// A token parameter name, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct ParamName {
    repr: ParamRepr,
}

#[derive(Debug, Clone)]
enum ParamRepr {
    Standard(&'static str),
    Custom(Box<str>),
}

impl ParamName {
    /// The quality parameter `q`.
    pub const Q: ParamName = ParamName { repr: ParamRepr::Standard("q") };
    /// The `charset` parameter.
    pub const CHARSET: ParamName = ParamName { repr: ParamRepr::Standard("charset") };

    /// Parses a parameter name token.
    pub fn with(text: &str) -> Result<ParamName, ParseError> {
        ensure!(!text.is_empty(), ParseError::empty("parameter name"));
        for (at, ch) in text.char_indices() {
            ensure!(is_tchar(ch), ParseError::invalid_character(ch, at, text));
        }
        Ok(Self::from_token(text))
    }

    /// Builds a name from an already-validated token.
    fn from_token(text: &str) -> ParamName {
        if text.eq_ignore_ascii_case("q") {
            ParamName::Q
        } else if text.eq_ignore_ascii_case("charset") {
            ParamName::CHARSET
        } else {
            ParamName { repr: ParamRepr::Custom(text.into()) }
        }
    }

    pub fn as_str(&self) -> &str {
        match &self.repr {
            ParamRepr::Standard(text) => text,
            ParamRepr::Custom(text) => text,
        }
    }
}

impl PartialEq for ParamName {
    fn eq(&self, other: &Self) -> bool {
        CaseSensitivity::Insensitive.eq(self.as_str(), other.as_str())
    }
}

impl Eq for ParamName {}

impl Hash for ParamName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        CaseSensitivity::Insensitive.hash_into(self.as_str(), state);
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token value with ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldToken {
    value: String,
    params: Vec<(ParamName, String)>,
}

impl FieldToken {
    /// Builds a bare token, validating `value` against the token grammar.
    pub fn new(value: impl Into<String>) -> Result<FieldToken, ParseError> {
        let value = value.into();
        ensure!(!value.is_empty(), ParseError::empty("token"));
        for (at, ch) in value.char_indices() {
            ensure!(is_tchar(ch), ParseError::invalid_character(ch, at, &value));
        }
        Ok(FieldToken { value, params: Vec::new() })
    }

    /// Returns a copy of this token with `name=value` appended to its
    /// parameters.
    pub fn with_param(&self, name: ParamName, value: impl Into<String>) -> Result<FieldToken, ParseError> {
        let value = value.into();
        ensure!(!value.is_empty(), ParseError::empty("parameter value"));
        for (at, ch) in value.char_indices() {
            ensure!(is_tchar(ch), ParseError::invalid_character(ch, at, &value));
        }
        let mut token = self.clone();
        token.params.push((name, value));
        Ok(token)
    }

    /// The token value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The parameters, in the order they were written.
    pub fn params(&self) -> &[(ParamName, String)] {
        &self.params
    }

    /// The value of the first parameter named `name`, case-insensitively.
    pub fn param(&self, name: &ParamName) -> Option<&str> {
        self.params.iter().find(|(param, _)| param == name).map(|(_, value)| value.as_str())
    }

    /// The parsed `q` parameter, `None` when absent.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidQValue`] when the parameter is present but not
    /// a number in `0.0..=1.0`.
    pub fn qvalue(&self) -> Result<Option<f32>, ParseError> {
        let Some(text) = self.param(&ParamName::Q) else {
            return Ok(None);
        };
        let q: f32 = text.parse().map_err(|_| ParseError::invalid_q_value(text))?;
        ensure!((0.0..=1.0).contains(&q), ParseError::invalid_q_value(text));
        Ok(Some(q))
    }

    /// Parses exactly one token; separators are rejected.
    pub fn parse_one(text: &str) -> Result<FieldToken, ParseError> {
        let mut tokens = scan(text, false)?;
        // scan(.., false) never yields more than one
        Ok(tokens.remove(0))
    }

    /// Parses a comma-separated token list, at least one token.
    pub fn parse_list(text: &str) -> Result<Vec<FieldToken>, ParseError> {
        let tokens = scan(text, true)?;
        trace!(count = tokens.len(), "parsed token list");
        Ok(tokens)
    }
}

impl fmt::Display for FieldToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)?;
        for (name, value) in &self.params {
            write!(f, "; {name}={value}")?;
        }
        Ok(())
    }
}

impl FromStr for FieldToken {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldToken::parse_one(s)
    }
}

/// What the scanner expects at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Start of a token: OWS or the first value character.
    Begin,
    /// Inside the token value.
    Value,
    /// After a value or parameter: OWS, `;`, a separator or the end.
    Divider,
    /// After `;`: OWS or the first parameter-name character.
    ParamBegin,
    /// Inside a parameter name, terminated by `=`.
    ParamName,
    /// Immediately after `=`.
    ParamValueBegin,
    /// Inside a parameter value.
    ParamValue,
}

fn scan(text: &str, list: bool) -> Result<Vec<FieldToken>, ParseError> {
    let mut tokens: Vec<FieldToken> = Vec::new();
    let mut mode = Mode::Begin;
    let mut value = String::new();
    let mut params: Vec<(ParamName, String)> = Vec::new();
    let mut param_name = String::new();
    let mut param_value = String::new();
    let mut separator_at = 0;

    fn finish_param(params: &mut Vec<(ParamName, String)>, name: &mut String, value: &mut String) {
        params.push((ParamName::from_token(name), std::mem::take(value)));
        name.clear();
    }
    fn finish_token(tokens: &mut Vec<FieldToken>, value: &mut String, params: &mut Vec<(ParamName, String)>) {
        tokens.push(FieldToken { value: std::mem::take(value), params: std::mem::take(params) });
    }

    for (at, ch) in text.char_indices() {
        mode = match mode {
            Mode::Begin => match ch {
                c if is_ows(c) => Mode::Begin,
                c if is_tchar(c) => {
                    value.push(c);
                    Mode::Value
                }
                c => return Err(ParseError::invalid_character(c, at, text)),
            },

            Mode::Value => match ch {
                c if is_tchar(c) => {
                    value.push(c);
                    Mode::Value
                }
                ';' => Mode::ParamBegin,
                ',' if list => {
                    finish_token(&mut tokens, &mut value, &mut params);
                    separator_at = at;
                    Mode::Begin
                }
                c if is_ows(c) => Mode::Divider,
                c => return Err(ParseError::invalid_character(c, at, text)),
            },

            Mode::Divider => match ch {
                c if is_ows(c) => Mode::Divider,
                ';' => Mode::ParamBegin,
                ',' if list => {
                    finish_token(&mut tokens, &mut value, &mut params);
                    separator_at = at;
                    Mode::Begin
                }
                c => return Err(ParseError::invalid_character(c, at, text)),
            },

            Mode::ParamBegin => match ch {
                c if is_ows(c) => Mode::ParamBegin,
                c if is_tchar(c) => {
                    param_name.push(c);
                    Mode::ParamName
                }
                c => return Err(ParseError::invalid_character(c, at, text)),
            },

            Mode::ParamName => match ch {
                c if is_tchar(c) => {
                    param_name.push(c);
                    Mode::ParamName
                }
                '=' => Mode::ParamValueBegin,
                c => return Err(ParseError::invalid_character(c, at, text)),
            },

            Mode::ParamValueBegin => match ch {
                c if is_tchar(c) => {
                    param_value.push(c);
                    Mode::ParamValue
                }
                c => return Err(ParseError::invalid_character(c, at, text)),
            },

            Mode::ParamValue => match ch {
                c if is_tchar(c) => {
                    param_value.push(c);
                    Mode::ParamValue
                }
                ';' => {
                    finish_param(&mut params, &mut param_name, &mut param_value);
                    Mode::ParamBegin
                }
                ',' if list => {
                    finish_param(&mut params, &mut param_name, &mut param_value);
                    finish_token(&mut tokens, &mut value, &mut params);
                    separator_at = at;
                    Mode::Begin
                }
                c if is_ows(c) => {
                    finish_param(&mut params, &mut param_name, &mut param_value);
                    Mode::Divider
                }
                c => return Err(ParseError::invalid_character(c, at, text)),
            },
        };
    }

    match mode {
        Mode::Value | Mode::Divider => {
            finish_token(&mut tokens, &mut value, &mut params);
            Ok(tokens)
        }
        Mode::ParamValue => {
            finish_param(&mut params, &mut param_name, &mut param_value);
            finish_token(&mut tokens, &mut value, &mut params);
            Ok(tokens)
        }
        Mode::Begin if tokens.is_empty() => Err(ParseError::empty("token")),
        Mode::Begin => Err(ParseError::trailing_separator(separator_at, text)),
        Mode::ParamBegin | Mode::ParamName | Mode::ParamValueBegin => {
            Err(ParseError::unexpected_end(text))
        }
    }
}
