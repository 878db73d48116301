//! Character classes from RFC 9110 and RFC 7232.
//!
//! The parsers in this crate all scan character by character; these
//! predicates are the shared grammar vocabulary they scan with.

/// `tchar`: a character allowed in an HTTP token (RFC 9110 §5.6.2).
#[inline]
pub fn is_tchar(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~'
        )
}

/// `etagc`: a character allowed inside a quoted entity-tag (RFC 7232 §2.3).
///
/// `0x21`, `0x23..=0x7E` and obs-text; everything printable except `"`.
#[inline]
pub fn is_etagc(ch: char) -> bool {
    matches!(ch, '\x21' | '\x23'..='\x7e') || ch as u32 >= 0x80
}

/// `qdtext`: a character allowed inside a quoted-string (RFC 9110 §5.6.4).
#[inline]
pub fn is_qdtext(ch: char) -> bool {
    matches!(ch, '\t' | ' ' | '\x21' | '\x23'..='\x5b' | '\x5d'..='\x7e') || ch as u32 >= 0x80
}

/// `OWS`: optional whitespace, space or horizontal tab.
#[inline]
pub fn is_ows(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}
