//! Error types for codec operations.

use std::any::Any;
use thiserror::Error;

/// Error type for codec operations.
///
/// Definition errors (a malformed record type) are always detected before any
/// byte is read or written. Wire errors reject the entire record: there is no
/// partial decode and no retry.
#[derive(Error, Debug)]
pub enum Error {
    // Definition errors
    #[error("field {0} declared with an empty wire name")]
    MissingName(usize),
    #[error("wire name '{0}' too long")]
    NameTooLong(&'static str),
    #[error("found duplicate wire name '{0}'")]
    DuplicateName(&'static str),
    #[error("record must declare between 1 and {max} fields, got {found}")]
    InvalidRecord { found: usize, max: usize },
    #[error("max length {max} for field '{field}' overflows 32-bit signed integers")]
    InvalidMaxLength { field: &'static str, max: u32 },
    #[error("record has no field named '{0}'")]
    UnknownField(String),

    // Wire errors
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("got wrong tag byte {found:#04x}, wanted {expected:#04x}")]
    UnexpectedTag { expected: u8, found: u8 },
    #[error("got map of {found} entries for record with {expected} fields")]
    WrongArity { expected: usize, found: usize },
    #[error("got unexpected field name '{found}' on wire, wanted '{expected}'")]
    UnexpectedFieldName {
        expected: &'static str,
        found: String,
    },
    #[error("expected value of exactly {expected} bytes, got {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("cannot decode value of length {len}, max is {max}{}", max_hint(.max))]
    LengthExceeded { len: u32, max: u32 },
    #[error("invalid utf-8 in text value")]
    InvalidText,
    #[error("integer overflow during encoding")]
    Overflow,

    // Context and fault conversion
    #[error("error in field '{field}': {source}")]
    Field {
        field: &'static str,
        #[source]
        source: Box<Error>,
    },
    #[error("recovered fault: {0}")]
    Fault(String),
}

impl Error {
    /// Wraps this error with the name of the field being processed.
    pub fn for_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }

    /// Converts a payload caught by `catch_unwind` into a reported error.
    pub(crate) fn from_panic(panic: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = panic.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        Self::Fault(message)
    }
}

/// A forgotten maximum silently makes a field undecodable (fail-closed), so
/// point at the likely cause when the configured maximum is zero.
fn max_hint(max: &u32) -> &'static str {
    if *max == 0 {
        " -- did you remember to set a max length in the field declaration?"
    } else {
        ""
    }
}
