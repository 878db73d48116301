//! Padding a string to a minimum length.

use std::borrow::Cow;

/// Prepends `pad` characters until `text` is at least `min_len` characters
/// long, borrowing when it already is.
///
/// Lengths are counted in `char`s, not bytes.
pub fn pad_start(text: &str, min_len: usize, pad: char) -> Cow<'_, str> {
    let count = text.chars().count();
    if count >= min_len {
        return Cow::Borrowed(text);
    }
    let missing = min_len - count;
    let mut out = String::with_capacity(text.len() + missing * pad.len_utf8());
    out.extend(std::iter::repeat_n(pad, missing));
    out.push_str(text);
    Cow::Owned(out)
}

/// Appends `pad` characters until `text` is at least `min_len` characters
/// long, borrowing when it already is.
pub fn pad_end(text: &str, min_len: usize, pad: char) -> Cow<'_, str> {
    let count = text.chars().count();
    if count >= min_len {
        return Cow::Borrowed(text);
    }
    let missing = min_len - count;
    let mut out = String::with_capacity(text.len() + missing * pad.len_utf8());
    out.push_str(text);
    out.extend(std::iter::repeat_n(pad, missing));
    Cow::Owned(out)
}
