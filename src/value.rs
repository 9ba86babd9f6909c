//! The wire value model: a closed set of tagged variants with byte-exact
//! encode rules.
//!
//! Values are constructed transiently by the encoder (see
//! [crate::encode::to_value]) and
//! serialized bottom-up into a flat byte sequence. The decoder never builds a
//! [Value] tree: it reconstructs records directly, using these shapes only as
//! the specification of what to expect on the wire.

use crate::{wire, Error};
use bytes::{BufMut, BytesMut};

/// A single value in the wire format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// A 64-bit unsigned integer.
    U64(u64),
    /// A byte string.
    Bytes(Vec<u8>),
    /// A UTF-8 string.
    Text(String),
    /// An ordered map of text keys to values. Records always encode to one
    /// map with entries sorted by wire name.
    Map(Vec<(String, Value)>),
    /// A homogeneous array of values.
    Array(Vec<Value>),
}

impl Value {
    /// Serializes this value to a freshly allocated buffer.
    pub fn encode(&self) -> Result<BytesMut, Error> {
        let size = self.encode_size()?;
        let mut buf = BytesMut::with_capacity(size);
        self.write(&mut buf)?;
        assert_eq!(buf.len(), size, "write() did not write expected bytes");
        Ok(buf)
    }

    /// Returns the exact number of bytes [Self::write] will produce.
    ///
    /// All arithmetic is checked: any length, count, or node size that would
    /// not fit the 32-bit signed range fails with [Error::Overflow] instead of
    /// silently truncating a length field.
    pub fn encode_size(&self) -> Result<usize, Error> {
        let size = match self {
            Self::U64(_) => wire::UINT64_LEN,
            Self::Bytes(bytes) => checked_node(wire::HEADER_LEN, bytes.len())?,
            Self::Text(text) => checked_node(wire::HEADER_LEN, text.len())?,
            Self::Map(entries) => {
                length32(entries.len())?;
                let mut total = wire::HEADER_LEN;
                for (key, value) in entries {
                    total = checked_add(total, checked_node(wire::HEADER_LEN, key.len())?)?;
                    total = checked_add(total, value.encode_size()?)?;
                }
                bounded(total)?
            }
            Self::Array(items) => {
                length32(items.len())?;
                let mut total = wire::HEADER_LEN;
                for item in items {
                    total = checked_add(total, item.encode_size()?)?;
                }
                bounded(total)?
            }
        };
        Ok(size)
    }

    /// Serializes this value into `buf`.
    pub fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        match self {
            Self::U64(value) => wire::write_uint(buf, *value),
            Self::Bytes(bytes) => {
                wire::write_header(buf, wire::BYTES, length32(bytes.len())?);
                buf.put_slice(bytes);
            }
            Self::Text(text) => {
                wire::write_header(buf, wire::TEXT, length32(text.len())?);
                buf.put_slice(text.as_bytes());
            }
            Self::Map(entries) => {
                wire::write_header(buf, wire::MAP, length32(entries.len())?);
                for (key, value) in entries {
                    wire::write_header(buf, wire::TEXT, length32(key.len())?);
                    buf.put_slice(key.as_bytes());
                    value.write(buf)?;
                }
            }
            Self::Array(items) => {
                wire::write_header(buf, wire::ARRAY, length32(items.len())?);
                for item in items {
                    item.write(buf)?;
                }
            }
        }
        Ok(())
    }
}

/// Converts a length or count to the 4-byte wire representation, failing with
/// [Error::Overflow] if it exceeds the 32-bit signed bound.
#[inline]
fn length32(len: usize) -> Result<u32, Error> {
    let len = u32::try_from(len).map_err(|_| Error::Overflow)?;
    if len > wire::MAX_VALUE_LEN {
        return Err(Error::Overflow);
    }
    Ok(len)
}

/// Computes `header + payload`, requiring the node size to stay within the
/// 32-bit signed bound even on 32-bit hosts.
#[inline]
fn checked_node(header: usize, payload: usize) -> Result<usize, Error> {
    bounded(checked_add(header, payload)?)
}

#[inline]
fn bounded(total: usize) -> Result<usize, Error> {
    if total > wire::MAX_VALUE_LEN as usize {
        return Err(Error::Overflow);
    }
    Ok(total)
}

#[inline]
fn checked_add(a: usize, b: usize) -> Result<usize, Error> {
    a.checked_add(b).ok_or(Error::Overflow)
}
