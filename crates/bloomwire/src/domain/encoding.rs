//! Canonical byte encoding for non-binary values.
//!
//! Membership is defined over bytes: two logical values are "the same
//! element" exactly when they encode to the same bytes. This module fixes
//! one deterministic scheme for the whole crate, bincode v1 in its default
//! configuration (fixed-width, little-endian integers), so a value
//! inserted on one machine or crate version is found by the same value on
//! another. Callers that already hold raw bytes bypass encoding entirely
//! via [`crate::BloomFilter::insert`].
//!
//! Note that the encoding is per-type: `1u32` and `1u64` are different
//! elements, as are a `&str` and a single-element tuple wrapping it.

use serde::Serialize;

use crate::error::FilterError;

/// Encode `value` with the crate's canonical scheme.
pub fn canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, FilterError> {
    Ok(bincode::serialize(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_is_deterministic() {
        let first = canonical_bytes(&("alpha", 7u32)).unwrap();
        let second = canonical_bytes(&("alpha", 7u32)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_integers_encode_fixed_width_little_endian() {
        assert_eq!(canonical_bytes(&7u32).unwrap(), vec![7, 0, 0, 0]);
        assert_eq!(
            canonical_bytes(&1u64).unwrap(),
            vec![1, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_borrowed_and_owned_strings_agree() {
        let borrowed = canonical_bytes("alpha").unwrap();
        let owned = canonical_bytes(&String::from("alpha")).unwrap();
        assert_eq!(borrowed, owned);
    }

    #[test]
    fn test_distinct_types_are_distinct_elements() {
        assert_ne!(
            canonical_bytes(&1u32).unwrap(),
            canonical_bytes(&1u64).unwrap()
        );
    }

    #[test]
    fn test_derived_structs_encode_fieldwise() {
        #[derive(Serialize)]
        struct Session {
            user: String,
            id: u64,
        }

        let session = Session {
            user: "ada".into(),
            id: 9,
        };
        // Struct encoding is the concatenation of its fields' encodings.
        let fields = [
            canonical_bytes("ada").unwrap(),
            canonical_bytes(&9u64).unwrap(),
        ]
        .concat();
        assert_eq!(canonical_bytes(&session).unwrap(), fields);
    }
}
