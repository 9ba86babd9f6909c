//! The canonical encoder.
//!
//! Encoding walks a record's fields in canonical order, converts each field
//! into a [Value] (recursing into nested records and record sequences), and
//! serializes the resulting map bottom-up. Two equal-valued records of the
//! same wire shape always encode to identical bytes, regardless of the order
//! fields were declared in.

use crate::{schema, Error, Record, Value};
use bytes::BytesMut;
use std::panic::{self, AssertUnwindSafe};

/// Encodes a record to its canonical byte representation.
///
/// The whole operation runs inside a fault boundary: any unexpected panic in
/// a [Record] implementation is converted into [Error::Fault] instead of
/// unwinding into the host process.
pub fn encode<R: Record>(record: &R) -> Result<BytesMut, Error> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let value = to_value(record)?;
        value.encode()
    }))
    .unwrap_or_else(|panic| Err(Error::from_panic(panic)))
}

/// Converts a record into the [Value::Map] it encodes as, with entries in
/// canonical field order.
pub fn to_value<R: Record>(record: &R) -> Result<Value, Error> {
    let fields = schema::resolve(R::FIELDS)?;
    let mut entries = Vec::with_capacity(fields.len());
    for field in &fields {
        let value = record
            .field_value(field.name)
            .map_err(|err| err.for_field(field.name))?;
        entries.push((field.name.to_string(), value));
    }
    Ok(Value::Map(entries))
}
