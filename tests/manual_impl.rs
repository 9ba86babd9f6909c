//! Integration tests for hand-written [Record] implementations and the
//! fault boundary at the encode/decode entry points.

use bytes::Buf;
use canonpack::{
    decode, encode, read_bytes, read_u64, Error, FieldDecl, Record, Value,
};

/// A record implemented by hand instead of through the `record!` macro.
#[derive(Debug, Clone, PartialEq, Default)]
struct Handshake {
    version: u64,
    token: Vec<u8>,
}

impl Record for Handshake {
    const FIELDS: &'static [FieldDecl] =
        &[FieldDecl::named("version"), FieldDecl::new("token", 16)];

    fn field_value(&self, name: &str) -> Result<Value, Error> {
        match name {
            "version" => Ok(Value::U64(self.version)),
            "token" => Ok(Value::Bytes(self.token.clone())),
            other => Err(Error::UnknownField(other.to_string())),
        }
    }

    fn read_field(&mut self, name: &str, buf: &mut impl Buf, max_len: u32) -> Result<(), Error> {
        match name {
            "version" => self.version = read_u64(buf)?,
            "token" => self.token = read_bytes(buf, max_len)?,
            other => return Err(Error::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

#[test]
fn test_manual_impl_roundtrip() {
    let handshake = Handshake {
        version: 3,
        token: vec![0xAB; 16],
    };
    let encoded = encode(&handshake).unwrap();
    let decoded: Handshake = decode(&encoded[..]).unwrap();
    assert_eq!(handshake, decoded);
}

/// A record type with no fields at all, which the codec must refuse.
#[derive(Debug, Default)]
struct Empty;

impl Record for Empty {
    const FIELDS: &'static [FieldDecl] = &[];

    fn field_value(&self, name: &str) -> Result<Value, Error> {
        Err(Error::UnknownField(name.to_string()))
    }

    fn read_field(&mut self, name: &str, _: &mut impl Buf, _: u32) -> Result<(), Error> {
        Err(Error::UnknownField(name.to_string()))
    }
}

#[test]
fn test_zero_field_record_rejected() {
    assert!(matches!(
        encode(&Empty).unwrap_err(),
        Error::InvalidRecord { found: 0, .. }
    ));

    // Decoding fails the same way, before consuming any input.
    let result: Result<Empty, Error> = decode(&b""[..]);
    assert!(matches!(
        result.unwrap_err(),
        Error::InvalidRecord { found: 0, .. }
    ));
}

/// A record whose implementation panics, to exercise the fault boundary.
#[derive(Debug, Default)]
struct Hostile;

impl Record for Hostile {
    const FIELDS: &'static [FieldDecl] = &[FieldDecl::named("boom")];

    fn field_value(&self, _: &str) -> Result<Value, Error> {
        panic!("field_value blew up");
    }

    fn read_field(&mut self, _: &str, _: &mut impl Buf, _: u32) -> Result<(), Error> {
        panic!("read_field blew up");
    }
}

#[test]
fn test_encode_fault_boundary() {
    let err = encode(&Hostile).unwrap_err();
    let Error::Fault(message) = err else {
        panic!("expected fault, got {err:?}");
    };
    assert!(message.contains("field_value blew up"));
}

#[test]
fn test_decode_fault_boundary() {
    // A well-formed single-field map for "boom", holding a u64.
    let wire = Value::Map(vec![("boom".to_string(), Value::U64(1))]);
    let encoded = wire.encode().unwrap();

    let result: Result<Hostile, Error> = decode(&encoded[..]);
    let Error::Fault(message) = result.unwrap_err() else {
        panic!("expected fault");
    };
    assert!(message.contains("read_field blew up"));
}
