//! Field descriptor resolution.
//!
//! Each record field carries a wire name and a maximum permitted length.
//! [resolve] turns a record type's declarations into the canonical field
//! order: lexicographic ascending order of wire names under byte-wise
//! comparison. Encode and decode both recompute this order from the same
//! declarations, so they agree on field order without any schema exchange on
//! the wire.

use crate::{wire, Error};

/// Maximum allowed length of a wire name, in bytes.
pub const MAX_NAME_LEN: u32 = 32;

/// Maximum number of fields a record may declare. Guards against degenerate
/// type definitions; the wire format itself could carry up to `u32` entries.
pub const MAX_FIELDS: usize = 1024;

/// The wire declaration for a single record field.
///
/// `max_len` is the ceiling enforced on the field's wire-declared length (or
/// element count, for arrays of records) before any allocation. A `max_len`
/// of 0 means no variable-length content is permitted: decoding any nonzero
/// length fails. Fixed-width fields (u64) ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    /// Name of the field on the wire.
    pub name: &'static str,
    /// Maximum permitted wire length, enforced before allocation.
    pub max_len: u32,
}

impl FieldDecl {
    /// Declares a field with a maximum wire length.
    pub const fn new(name: &'static str, max_len: u32) -> Self {
        Self { name, max_len }
    }

    /// Declares a fixed-width field (no variable-length content allowed).
    pub const fn named(name: &'static str) -> Self {
        Self::new(name, 0)
    }
}

/// Validates a record's field declarations and returns them in canonical
/// order.
///
/// Pure function of the declarations: no side effects, no caching. Fails if
/// any field lacks a wire name, a name is longer than [MAX_NAME_LEN], two
/// fields share a name, a maximum overflows the 32-bit signed bound, or the
/// record declares zero or more than [MAX_FIELDS] fields.
pub fn resolve(decls: &'static [FieldDecl]) -> Result<Vec<FieldDecl>, Error> {
    if decls.is_empty() || decls.len() > MAX_FIELDS {
        return Err(Error::InvalidRecord {
            found: decls.len(),
            max: MAX_FIELDS,
        });
    }

    for (index, field) in decls.iter().enumerate() {
        if field.name.is_empty() {
            return Err(Error::MissingName(index));
        }
        if field.name.len() > MAX_NAME_LEN as usize {
            return Err(Error::NameTooLong(field.name));
        }
        if field.max_len > wire::MAX_VALUE_LEN {
            return Err(Error::InvalidMaxLength {
                field: field.name,
                max: field.max_len,
            });
        }
    }

    // Sort by wire name (str comparison is byte-wise), then scan adjacent
    // entries for duplicates.
    let mut fields = decls.to_vec();
    fields.sort_by(|a, b| a.name.cmp(b.name));
    for pair in fields.windows(2) {
        if pair[0].name == pair[1].name {
            return Err(Error::DuplicateName(pair[0].name));
        }
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        static FIELDS: &[FieldDecl] = &[
            FieldDecl::named("zeta"),
            FieldDecl::new("alpha", 10),
            FieldDecl::named("mid"),
        ];
        let resolved = resolve(FIELDS).unwrap();
        let names: Vec<_> = resolved.iter().map(|f| f.name).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
        assert_eq!(resolved[0].max_len, 10);
    }

    #[test]
    fn test_order_is_bytewise() {
        // 'Z' (0x5A) sorts before 'a' (0x61) under byte comparison.
        static FIELDS: &[FieldDecl] = &[FieldDecl::named("a"), FieldDecl::named("Z")];
        let resolved = resolve(FIELDS).unwrap();
        assert_eq!(resolved[0].name, "Z");
    }

    #[test]
    fn test_empty_name() {
        static FIELDS: &[FieldDecl] = &[FieldDecl::named("ok"), FieldDecl::named("")];
        assert!(matches!(resolve(FIELDS), Err(Error::MissingName(1))));
    }

    #[test]
    fn test_name_too_long() {
        static FIELDS: &[FieldDecl] =
            &[FieldDecl::named("this_wire_name_is_far_too_long_to_accept")];
        assert!(matches!(resolve(FIELDS), Err(Error::NameTooLong(_))));
    }

    #[test]
    fn test_name_at_limit() {
        static FIELDS: &[FieldDecl] = &[FieldDecl::named("abcdefghijklmnopqrstuvwxyz_01234")];
        assert_eq!(FIELDS[0].name.len(), MAX_NAME_LEN as usize);
        assert!(resolve(FIELDS).is_ok());
    }

    #[test]
    fn test_duplicate_name() {
        static FIELDS: &[FieldDecl] = &[
            FieldDecl::named("dup"),
            FieldDecl::named("other"),
            FieldDecl::new("dup", 5),
        ];
        assert!(matches!(resolve(FIELDS), Err(Error::DuplicateName("dup"))));
    }

    #[test]
    fn test_zero_fields() {
        static FIELDS: &[FieldDecl] = &[];
        assert!(matches!(
            resolve(FIELDS),
            Err(Error::InvalidRecord { found: 0, .. })
        ));
    }

    #[test]
    fn test_max_len_too_large() {
        static FIELDS: &[FieldDecl] = &[FieldDecl::new("big", u32::MAX)];
        assert!(matches!(
            resolve(FIELDS),
            Err(Error::InvalidMaxLength { field: "big", .. })
        ));
    }
}
