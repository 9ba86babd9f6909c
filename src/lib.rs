//! Canonical, bounded binary serialization for typed records.
//!
//! # Overview
//!
//! A binary codec designed as a safe boundary for untrusted input:
//! - Serialize typed records into a canonical, length-prefixed byte format
//! - Deserialize adversarial bytes back into the same records, rejecting
//!   anything malformed, oversized, or non-canonical
//!
//! Every record encodes to one map whose entries are sorted by wire name, so
//! equal values always produce identical bytes. Every variable-length value
//! on the wire carries a length the decoder refuses to trust: the
//! caller-declared maximum for the field is enforced before any proportional
//! allocation. The format is deliberately verbose (explicit type tags,
//! fixed-width lengths) in exchange for auditability.
//!
//! # Supported Field Kinds
//!
//! `u64`, byte strings (`Vec<u8>`), fixed-size byte arrays (`[u8; N]`),
//! UTF-8 strings (`String`), nested records, and sequences of records
//! (`Vec<R>`). Anything else is a compile error in the [record!] declaration.
//!
//! # Example
//!
//! ```
//! use canonpack::{decode, encode, record};
//!
//! record! {
//!     #[derive(Debug, Clone, PartialEq, Default)]
//!     pub struct Account {
//!         fixed "id" max 8 => pub id: [u8; 8],
//!         uint "balance" => pub balance: u64,
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Clone, PartialEq, Default)]
//!     pub struct Transfer {
//!         record "from" => pub from: Account,
//!         uint "amount" => pub amount: u64,
//!         text "memo" max 64 => pub memo: String,
//!     }
//! }
//!
//! let transfer = Transfer {
//!     from: Account { id: [7; 8], balance: 100 },
//!     amount: 25,
//!     memo: "rent".into(),
//! };
//!
//! let encoded = encode(&transfer).unwrap();
//! let decoded: Transfer = decode(&encoded[..]).unwrap();
//! assert_eq!(transfer, decoded);
//! ```
//!
//! # Decoding Untrusted Input
//!
//! Declared maxima are the only defense a field gets; a field declared
//! without `max` accepts only zero-length content (fail-closed):
//!
//! ```
//! use canonpack::{decode, encode, record, Error};
//!
//! record! {
//!     #[derive(Debug, Clone, PartialEq, Default)]
//!     pub struct Tight {
//!         bytes "payload" max 3 => pub payload: Vec<u8>,
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Clone, PartialEq, Default)]
//!     pub struct Loose {
//!         bytes "payload" max 1024 => pub payload: Vec<u8>,
//!     }
//! }
//!
//! // Five bytes encode fine under the loose declaration...
//! let encoded = encode(&Loose { payload: vec![0; 5] }).unwrap();
//!
//! // ...but the tight decoder rejects them before allocating anything.
//! let result: Result<Tight, Error> = decode(&encoded[..]);
//! assert!(result.unwrap_err().to_string().contains("max is 3"));
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod record;
pub mod schema;
pub mod value;
pub mod wire;

// Re-export main types and entry points.
pub use decode::{decode, decode_into, read_bytes, read_fixed, read_record, read_records,
    read_text, read_u64};
pub use encode::{encode, to_value};
pub use error::Error;
pub use record::Record;
pub use schema::{resolve, FieldDecl, MAX_FIELDS, MAX_NAME_LEN};
pub use value::Value;

// Used by the `record!` macro expansion.
#[doc(hidden)]
pub use bytes;
