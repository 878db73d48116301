//! Writing header fields to a wire buffer.
//!
//! Serializes `Name: value\r\n` lines into a [`BytesMut`], the form a
//! message head is assembled in before the terminating blank line. The
//! value side can be raw text or any [`FieldValue`] via its codec.

use crate::name::FieldName;
use crate::typed::{FieldValue, TypedName};
use bytes::{BufMut, BytesMut};

/// Appends `Name: value\r\n` to `dst`.
pub fn write_field(dst: &mut BytesMut, name: &FieldName, value: &str) {
    dst.reserve(name.as_str().len() + value.len() + 4);
    dst.put_slice(name.as_str().as_bytes());
    dst.put_slice(b": ");
    dst.put_slice(value.as_bytes());
    dst.put_slice(b"\r\n");
}

/// Encodes `value` through its codec and appends the field line to `dst`.
pub fn write_typed<T: FieldValue>(dst: &mut BytesMut, name: &TypedName<T>, value: &T) {
    write_field(dst, name.name(), &value.encode());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etag::ETag;
    use crate::typed;

    #[test]
    fn writes_a_field_line() {
        let mut dst = BytesMut::new();
        write_field(&mut dst, &FieldName::SERVER, "wirefield/0.1");
        assert_eq!(&dst[..], b"Server: wirefield/0.1\r\n");
    }

    #[test]
    fn writes_typed_values() {
        let mut dst = BytesMut::new();
        write_typed(&mut dst, &typed::ETAG, &ETag::weak("abc").unwrap());
        write_typed(&mut dst, &typed::CONTENT_LENGTH, &42);
        assert_eq!(&dst[..], b"ETag: W/\"abc\"\r\nContent-Length: 42\r\n");
    }

    #[test]
    fn custom_names_keep_their_spelling() {
        let mut dst = BytesMut::new();
        write_field(&mut dst, &FieldName::with("X-Request-Id").unwrap(), "abc123");
        assert_eq!(&dst[..], b"X-Request-Id: abc123\r\n");
    }
}
