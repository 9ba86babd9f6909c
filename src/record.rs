//! The [Record] trait and the [record!] declaration macro.
//!
//! A record is an application-defined aggregate with a fixed, non-empty set of
//! named fields. Instead of reflecting over struct fields at runtime, each
//! record type carries a static, per-type adapter: the field declarations and
//! the per-field value conversions are fixed at compile time, so an
//! unsupported field kind is a compile error rather than a runtime one.

use crate::{Error, FieldDecl, Value};
use bytes::Buf;

/// A typed record that can be encoded to and decoded from the wire format.
///
/// Implementations are usually generated with the [record!] macro, which
/// keeps the declarations and the per-field conversions in one place. The
/// trait can also be implemented by hand; the contract is:
///
/// - [Self::FIELDS] lists every field's wire declaration in definition order.
/// - [Self::field_value] converts the named field into its [Value].
/// - [Self::read_field] decodes the named field from the buffer, enforcing
///   `max_len` via the readers in [mod@crate::decode].
///
/// The `Default` bound supplies the zero value that decoding populates.
pub trait Record: Default {
    /// Wire declarations for every field, in definition order.
    const FIELDS: &'static [FieldDecl];

    /// Converts the named field into its wire value.
    fn field_value(&self, name: &str) -> Result<Value, Error>;

    /// Decodes the named field's value from `buf`, honoring `max_len`.
    fn read_field(&mut self, name: &str, buf: &mut impl Buf, max_len: u32)
        -> Result<(), Error>;
}

/// Declares a struct and implements [Record] for it.
///
/// Each field line is `kind "wire-name" [max N] => [vis] name: type`, where
/// `kind` is one of:
///
/// - `uint` — `u64` (fixed width, no `max` needed)
/// - `bytes` — `Vec<u8>`
/// - `text` — `String`
/// - `fixed` — `[u8; N]` (decoded length must equal `N` exactly)
/// - `record` — a nested [Record] type
/// - `records` — `Vec<R>` of a [Record] type (`max` bounds the element count)
///
/// Omitting `max` leaves it at 0, which rejects any nonzero wire length for
/// that field. The struct must derive (or implement) `Default`.
///
/// ```
/// use canonpack::{decode, encode, record};
///
/// record! {
///     #[derive(Debug, Clone, PartialEq, Default)]
///     pub struct Ping {
///         uint "seq" => pub seq: u64,
///         text "from" max 64 => pub from: String,
///     }
/// }
///
/// let ping = Ping { seq: 9, from: "relay-1".into() };
/// let encoded = encode(&ping).unwrap();
/// let decoded: Ping = decode(&encoded[..]).unwrap();
/// assert_eq!(ping, decoded);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $kind:ident $wire:literal $(max $max:expr)? => $fvis:vis $fname:ident : $fty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $fvis $fname: $fty, )+
        }

        impl $crate::Record for $name {
            const FIELDS: &'static [$crate::FieldDecl] = &[
                $( $crate::FieldDecl::new($wire, $crate::record!(@max $($max)?)) ),+
            ];

            fn field_value(&self, name: &str) -> Result<$crate::Value, $crate::Error> {
                match name {
                    $( $wire => $crate::record!(@value $kind, self.$fname), )+
                    other => Err($crate::Error::UnknownField(other.to_string())),
                }
            }

            #[allow(unused_variables)]
            fn read_field(
                &mut self,
                name: &str,
                buf: &mut impl $crate::bytes::Buf,
                max_len: u32,
            ) -> Result<(), $crate::Error> {
                match name {
                    $( $wire => {
                        self.$fname = $crate::record!(@read $kind, buf, max_len);
                        Ok(())
                    } )+
                    other => Err($crate::Error::UnknownField(other.to_string())),
                }
            }
        }
    };

    // Default max length is 0: no variable-length content allowed.
    (@max) => { 0 };
    (@max $max:expr) => { $max };

    (@value uint, $field:expr) => { Ok($crate::Value::U64($field)) };
    (@value bytes, $field:expr) => { Ok($crate::Value::Bytes($field.clone())) };
    (@value text, $field:expr) => { Ok($crate::Value::Text($field.clone())) };
    (@value fixed, $field:expr) => { Ok($crate::Value::Bytes($field.to_vec())) };
    (@value record, $field:expr) => { $crate::encode::to_value(&$field) };
    (@value records, $field:expr) => {{
        let mut items = Vec::with_capacity($field.len());
        for item in &$field {
            items.push($crate::encode::to_value(item)?);
        }
        Ok($crate::Value::Array(items))
    }};
    (@value $other:ident, $field:expr) => {
        compile_error!(concat!("unsupported field kind: ", stringify!($other)))
    };

    (@read uint, $buf:expr, $max:expr) => { $crate::decode::read_u64($buf)? };
    (@read bytes, $buf:expr, $max:expr) => { $crate::decode::read_bytes($buf, $max)? };
    (@read text, $buf:expr, $max:expr) => { $crate::decode::read_text($buf, $max)? };
    (@read fixed, $buf:expr, $max:expr) => { $crate::decode::read_fixed($buf, $max)? };
    (@read record, $buf:expr, $max:expr) => { $crate::decode::read_record($buf)? };
    (@read records, $buf:expr, $max:expr) => { $crate::decode::read_records($buf, $max)? };
    (@read $other:ident, $buf:expr, $max:expr) => {
        compile_error!(concat!("unsupported field kind: ", stringify!($other)))
    };
}
