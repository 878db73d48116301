//! Case sensitivity and capitalization helpers.
//!
//! [`CaseSensitivity`] concentrates the "compare these two strings, maybe
//! ignoring ASCII case" decision into a value that can be stored and passed
//! around, so types like header names and glob patterns can be explicit
//! about how they compare instead of sprinkling `eq_ignore_ascii_case`
//! calls everywhere. Hashing goes through the same folding so that
//! case-insensitive keys stay consistent with case-insensitive equality.

use std::borrow::Cow;
use std::hash::Hasher;

/// Whether ASCII letter case is significant for a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseSensitivity {
    /// Letter case is significant: `"ETag"` and `"etag"` differ.
    #[default]
    Sensitive,
    /// ASCII letter case is folded away: `"ETag"` equals `"etag"`.
    Insensitive,
}

impl CaseSensitivity {
    /// Folds a single character under this sensitivity.
    ///
    /// Under [`Sensitive`](CaseSensitivity::Sensitive) this is the identity;
    /// under [`Insensitive`](CaseSensitivity::Insensitive) ASCII uppercase
    /// letters fold to lowercase. Non-ASCII characters are never folded.
    #[inline]
    pub fn fold(self, ch: char) -> char {
        match self {
            CaseSensitivity::Sensitive => ch,
            CaseSensitivity::Insensitive => ch.to_ascii_lowercase(),
        }
    }

    /// Compares two characters under this sensitivity.
    #[inline]
    pub fn eq_char(self, a: char, b: char) -> bool {
        self.fold(a) == self.fold(b)
    }

    /// Compares two strings under this sensitivity.
    pub fn eq(self, a: &str, b: &str) -> bool {
        match self {
            CaseSensitivity::Sensitive => a == b,
            CaseSensitivity::Insensitive => a.eq_ignore_ascii_case(b),
        }
    }

    /// Feeds `text` into `state`, folded under this sensitivity.
    ///
    /// Two strings equal under [`eq`](Self::eq) hash identically through
    /// this function, which makes it suitable for `Hash` implementations of
    /// case-insensitive keys.
    pub fn hash_into<H: Hasher>(self, text: &str, state: &mut H) {
        match self {
            CaseSensitivity::Sensitive => state.write(text.as_bytes()),
            CaseSensitivity::Insensitive => {
                for byte in text.bytes() {
                    state.write_u8(byte.to_ascii_lowercase());
                }
            }
        }
        state.write_u8(0xff);
    }
}

/// Upper-cases the first ASCII letter of `text`, borrowing when the text is
/// already capitalized (or has no leading ASCII letter to change).
pub fn capitalize(text: &str) -> Cow<'_, str> {
    recase_first(text, char::to_ascii_uppercase)
}

/// Lower-cases the first ASCII letter of `text`, borrowing when unchanged.
pub fn decapitalize(text: &str) -> Cow<'_, str> {
    recase_first(text, char::to_ascii_lowercase)
}

fn recase_first(text: &str, f: impl Fn(&char) -> char) -> Cow<'_, str> {
    match text.chars().next() {
        Some(first) if first.is_ascii_alphabetic() && f(&first) != first => {
            let mut out = String::with_capacity(text.len());
            out.push(f(&first));
            out.push_str(&text[first.len_utf8()..]);
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(text),
    }
}
