//! Wire-format constants and the shared header codec.
//!
//! Every value on the wire starts with a one-byte type tag. Variable-length
//! values (bytes, text, maps, arrays) follow the tag with a 4-byte big-endian
//! unsigned length; unsigned integers follow it with their 8-byte big-endian
//! value. Both the encoder and the decoder go through this module, so the two
//! directions cannot disagree on framing.

use crate::Error;
use bytes::{Buf, BufMut};

/// Type tag for an ordered map.
pub const MAP: u8 = 0xDF;

/// Type tag for a 64-bit unsigned integer.
pub const UINT64: u8 = 0xCF;

/// Type tag for a byte string.
pub const BYTES: u8 = 0xC6;

/// Type tag for a UTF-8 string.
pub const TEXT: u8 = 0xDB;

/// Type tag for a homogeneous array.
pub const ARRAY: u8 = 0xDD;

/// Size of the length-prefixed header: tag byte plus 4-byte length.
pub const HEADER_LEN: usize = 5;

/// Size of an encoded 64-bit unsigned integer: tag byte plus 8-byte value.
pub const UINT64_LEN: usize = 9;

/// Largest length or count the format carries. Capped at the 32-bit signed
/// bound so decoded sizes stay addressable on 32-bit hosts.
pub const MAX_VALUE_LEN: u32 = i32::MAX as u32;

/// Returns [Error::EndOfBuffer] unless `buf` has at least `len` bytes left.
#[inline]
pub fn at_least(buf: &impl Buf, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}

/// Writes a length-prefixed header.
#[inline]
pub fn write_header(buf: &mut impl BufMut, tag: u8, len: u32) {
    buf.put_u8(tag);
    buf.put_u32(len);
}

/// Reads a length-prefixed header, requiring the tag byte to equal `expected`.
///
/// Consumes exactly [HEADER_LEN] bytes. The returned length is untrusted:
/// callers must check it against a ceiling before allocating.
#[inline]
pub fn read_header(buf: &mut impl Buf, expected: u8) -> Result<u32, Error> {
    at_least(buf, HEADER_LEN)?;
    let tag = buf.get_u8();
    if tag != expected {
        return Err(Error::UnexpectedTag {
            expected,
            found: tag,
        });
    }
    Ok(buf.get_u32())
}

/// Writes a tagged 64-bit unsigned integer.
#[inline]
pub fn write_uint(buf: &mut impl BufMut, value: u64) {
    buf.put_u8(UINT64);
    buf.put_u64(value);
}

/// Reads a tagged 64-bit unsigned integer, consuming exactly [UINT64_LEN] bytes.
#[inline]
pub fn read_uint(buf: &mut impl Buf) -> Result<u64, Error> {
    at_least(buf, UINT64_LEN)?;
    let tag = buf.get_u8();
    if tag != UINT64 {
        return Err(Error::UnexpectedTag {
            expected: UINT64,
            found: tag,
        });
    }
    Ok(buf.get_u64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn test_tags_distinct() {
        let mut tags = [MAP, UINT64, BYTES, TEXT, ARRAY];
        tags.sort();
        for pair in tags.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_header_conformity() {
        let mut buf = BytesMut::new();
        write_header(&mut buf, BYTES, 0x01020304);
        assert_eq!(&buf[..], &[0xC6, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_header_roundtrip() {
        let mut buf = BytesMut::new();
        write_header(&mut buf, MAP, 7);
        assert_eq!(read_header(&mut &buf[..], MAP).unwrap(), 7);
    }

    #[test]
    fn test_header_wrong_tag() {
        let mut buf = BytesMut::new();
        write_header(&mut buf, TEXT, 3);
        assert!(matches!(
            read_header(&mut &buf[..], BYTES),
            Err(Error::UnexpectedTag {
                expected: BYTES,
                found: TEXT,
            })
        ));
    }

    #[test]
    fn test_header_truncated() {
        let mut buf = BytesMut::new();
        write_header(&mut buf, ARRAY, 9);
        for cut in 0..HEADER_LEN {
            assert!(matches!(
                read_header(&mut &buf[..cut], ARRAY),
                Err(Error::EndOfBuffer)
            ));
        }
    }

    #[test]
    fn test_uint_conformity() {
        let mut buf = BytesMut::new();
        write_uint(&mut buf, 0x0123456789ABCDEF);
        assert_eq!(
            &buf[..],
            &[0xCF, 0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]
        );
    }

    #[test]
    fn test_uint_roundtrip() {
        for value in [0u64, 1, 1234, u64::MAX] {
            let mut buf = BytesMut::new();
            write_uint(&mut buf, value);
            assert_eq!(buf.len(), UINT64_LEN);
            assert_eq!(read_uint(&mut &buf[..]).unwrap(), value);
        }
    }

    #[test]
    fn test_uint_truncated() {
        let mut buf = BytesMut::new();
        write_uint(&mut buf, u64::MAX);
        for cut in 0..UINT64_LEN {
            assert!(matches!(
                read_uint(&mut &buf[..cut]),
                Err(Error::EndOfBuffer)
            ));
        }
    }

    #[test]
    fn test_uint_wrong_tag() {
        let buf = [MAP, 0, 0, 0, 0, 0, 0, 0, 1];
        assert!(matches!(
            read_uint(&mut &buf[..]),
            Err(Error::UnexpectedTag { .. })
        ));
    }
}
