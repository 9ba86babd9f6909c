//! The bounded decoder.
//!
//! Decoding mirrors the encoder exactly: read a map header, require its entry
//! count to equal the target's field count, then consume each (key, value)
//! pair in canonical field order. Every wire-declared length or count is
//! checked against the caller-declared maximum, and against the buffer's
//! remaining size, before any proportional allocation happens. A ceiling is
//! never inferred from the wire itself.

use crate::{
    schema::{self, MAX_NAME_LEN},
    wire, Error, Record,
};
use bytes::Buf;
use std::panic::{self, AssertUnwindSafe};

/// Decodes a record from `buf`, requiring the buffer to be fully consumed.
///
/// Runs inside the same fault boundary as [crate::encode::encode]: unexpected
/// panics
/// surface as [Error::Fault]. On failure the returned record is dropped; no
/// partial result is ever observable.
pub fn decode<R: Record>(buf: impl Buf) -> Result<R, Error> {
    let mut out = R::default();
    decode_into(buf, &mut out)?;
    Ok(out)
}

/// Decodes a record from `buf` into `out`, requiring the buffer to be fully
/// consumed.
///
/// On failure `out` is left unspecified: it may have been partially
/// overwritten before the error was detected.
pub fn decode_into<R: Record>(mut buf: impl Buf, out: &mut R) -> Result<(), Error> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        read_record_into(&mut buf, out)?;
        match buf.remaining() {
            0 => Ok(()),
            extra => Err(Error::ExtraData(extra)),
        }
    }))
    .unwrap_or_else(|panic| Err(Error::from_panic(panic)))
}

/// Reads one record from `buf`, leaving any trailing bytes in place.
///
/// This is the recursion point for nested record fields and the entry point
/// for callers streaming multiple records out of one buffer. Unlike [decode],
/// it carries no fault boundary of its own.
pub fn read_record<R: Record>(buf: &mut impl Buf) -> Result<R, Error> {
    let mut out = R::default();
    read_record_into(buf, &mut out)?;
    Ok(out)
}

fn read_record_into<R: Record>(buf: &mut impl Buf, out: &mut R) -> Result<(), Error> {
    // Resolve descriptors first: a malformed record type fails before any
    // byte is consumed.
    let fields = schema::resolve(R::FIELDS)?;

    // A record is one map with exactly as many entries as the record has
    // fields. Anything else is a shape mismatch, not a partial record.
    let count = wire::read_header(buf, wire::MAP)?;
    if count as usize != fields.len() {
        return Err(Error::WrongArity {
            expected: fields.len(),
            found: count as usize,
        });
    }

    for field in &fields {
        // The key must be the expected wire name, in canonical order. Wire
        // order is never trusted.
        let name = read_text(buf, MAX_NAME_LEN)?;
        if name != field.name {
            return Err(Error::UnexpectedFieldName {
                expected: field.name,
                found: name,
            });
        }

        out.read_field(field.name, buf, field.max_len)
            .map_err(|err| err.for_field(field.name))?;
    }

    Ok(())
}

/// Reads a length-prefixed sequence of records, enforcing `max_len` on the
/// element count before any element is decoded.
pub fn read_records<R: Record>(buf: &mut impl Buf, max_len: u32) -> Result<Vec<R>, Error> {
    let count = wire::read_header(buf, wire::ARRAY)?;
    check_length(count, max_len)?;
    let mut out = Vec::with_capacity(count as usize);
    for _ in 0..count {
        out.push(read_record(buf)?);
    }
    Ok(out)
}

/// Reads a byte string, enforcing `max_len` before allocating.
pub fn read_bytes(buf: &mut impl Buf, max_len: u32) -> Result<Vec<u8>, Error> {
    let len = wire::read_header(buf, wire::BYTES)?;
    check_length(len, max_len)?;
    let len = len as usize;
    wire::at_least(buf, len)?;
    let mut out = vec![0u8; len];
    buf.copy_to_slice(&mut out);
    Ok(out)
}

/// Reads a UTF-8 string, enforcing `max_len` before allocating.
pub fn read_text(buf: &mut impl Buf, max_len: u32) -> Result<String, Error> {
    let len = wire::read_header(buf, wire::TEXT)?;
    check_length(len, max_len)?;
    let len = len as usize;
    wire::at_least(buf, len)?;
    let mut out = vec![0u8; len];
    buf.copy_to_slice(&mut out);
    String::from_utf8(out).map_err(|_| Error::InvalidText)
}

/// Reads a byte string into a fixed-size array. The decoded length must equal
/// `N` exactly: short values are never padded and long ones never truncated.
pub fn read_fixed<const N: usize>(buf: &mut impl Buf, max_len: u32) -> Result<[u8; N], Error> {
    let bytes = read_bytes(buf, max_len)?;
    bytes.try_into().map_err(|bytes: Vec<u8>| Error::LengthMismatch {
        expected: N,
        found: bytes.len(),
    })
}

/// Reads a 64-bit unsigned integer.
pub fn read_u64(buf: &mut impl Buf) -> Result<u64, Error> {
    wire::read_uint(buf)
}

/// Enforces the caller-declared ceiling on an untrusted wire length.
///
/// The second check is not redundant for hand-written [Record] impls, which
/// may call the readers directly with maxima above the 32-bit signed bound.
fn check_length(len: u32, max_len: u32) -> Result<(), Error> {
    if len > max_len {
        return Err(Error::LengthExceeded { len, max: max_len });
    }
    if len > wire::MAX_VALUE_LEN {
        return Err(Error::LengthExceeded {
            len,
            max: wire::MAX_VALUE_LEN,
        });
    }
    Ok(())
}
