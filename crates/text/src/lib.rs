//! Character and string utilities shared by the `wirefield` workspace.
//!
//! This crate collects the small, protocol-agnostic pieces of text handling
//! that the header-field crate builds on: case-insensitive comparison,
//! padding, backslash escaping and quoting, glob pattern matching, and
//! line/column locating inside a source text.
//!
//! # Design
//!
//! Everything here operates eagerly on `&str` input and returns either a
//! [`Cow`](std::borrow::Cow) (borrowing when the input is already in the
//! requested shape) or an owned `String`. There are no lazy wrapper types:
//! the values involved are short, and an allocation-free fast path for the
//! common unchanged case is all the cleverness these helpers need.
//!
//! # Modules
//!
//! - [`case`]: [`CaseSensitivity`](case::CaseSensitivity) plus
//!   capitalization helpers
//! - [`pad`]: start/end padding to a minimum length
//! - [`quote`]: backslash escaping, unescaping, quoting and unquoting
//! - [`glob`]: [`GlobPattern`](glob::GlobPattern) matching with `*`/`?`
//! - [`position`]: [`LineColumn`](position::LineColumn) locating

pub mod case;
pub mod glob;
pub mod pad;
pub mod position;
pub mod quote;

pub use case::CaseSensitivity;
pub use glob::GlobPattern;
pub use position::LineColumn;
pub use quote::UnescapeError;
