//! Bit offset generation.
//!
//! One cryptographic digest per element, sliced into consecutive
//! non-overlapping 32-bit big-endian words. A 256-bit digest yields up to 8
//! pseudo-independent offsets; past that the 512-bit digest is used, for up
//! to 16. The digest width is a pure function of the hash count, never a
//! separate configuration knob.
//!
//! Offsets span the full `u32` range; the caller folds them into its bit
//! range with an index mask.

use sha2::{Digest, Sha256, Sha512};

/// Most offsets extractable from a 256-bit digest.
pub const MAX_SHA256_OFFSETS: u8 = 8;

/// Most offsets extractable from a 512-bit digest, and the overall cap.
pub const MAX_OFFSETS: u8 = 16;

/// Derive `hash_count` bit-offset candidates for `element`.
///
/// Deterministic: identical bytes always yield identical offsets.
///
/// # Panics
///
/// Debug-asserts `hash_count` in `[1, 16]`; the filter constructors enforce
/// the range before any element is hashed.
pub fn bit_offsets(element: &[u8], hash_count: u8) -> Vec<u32> {
    debug_assert!(
        (1..=MAX_OFFSETS).contains(&hash_count),
        "hash count {hash_count} outside [1, 16]"
    );
    if hash_count <= MAX_SHA256_OFFSETS {
        digest_words(&Sha256::digest(element), hash_count)
    } else {
        digest_words(&Sha512::digest(element), hash_count)
    }
}

/// Split a digest into its first `count` big-endian 32-bit words.
fn digest_words(digest: &[u8], count: u8) -> Vec<u32> {
    digest
        .chunks_exact(4)
        .take(count as usize)
        .map(|word| u32::from_be_bytes([word[0], word[1], word[2], word[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // FIPS 180 reference digests for the message "abc".
    const SHA256_ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
    const SHA512_ABC: &str = "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
                              2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f";

    fn reference_words(digest_hex: &str, count: usize) -> Vec<u32> {
        hex::decode(digest_hex)
            .expect("valid hex")
            .chunks_exact(4)
            .take(count)
            .map(|word| u32::from_be_bytes(word.try_into().unwrap()))
            .collect()
    }

    #[test]
    fn test_offsets_slice_the_sha256_digest() {
        assert_eq!(bit_offsets(b"abc", 8), reference_words(SHA256_ABC, 8));
        assert_eq!(bit_offsets(b"abc", 3), reference_words(SHA256_ABC, 3));
    }

    #[test]
    fn test_offsets_slice_the_sha512_digest_above_eight() {
        assert_eq!(bit_offsets(b"abc", 16), reference_words(SHA512_ABC, 16));
        assert_eq!(bit_offsets(b"abc", 9), reference_words(SHA512_ABC, 9));
    }

    #[test]
    fn test_digest_switches_at_nine_hashes() {
        // The first eight words of the 512-bit path must differ from the
        // 256-bit path: different digest, not a prefix.
        let narrow = bit_offsets(b"same input", 8);
        let wide = bit_offsets(b"same input", 9);
        assert_ne!(narrow[..], wide[..8]);
    }

    #[test]
    fn test_offsets_are_deterministic() {
        for count in [1, 4, 8, 9, 16] {
            assert_eq!(
                bit_offsets(b"determinism", count),
                bit_offsets(b"determinism", count),
                "count {count} must be a pure function of the input"
            );
        }
    }

    #[test]
    fn test_offset_count_matches_request() {
        for count in 1..=MAX_OFFSETS {
            assert_eq!(bit_offsets(b"x", count).len(), count as usize);
        }
    }

    #[test]
    fn test_distinct_inputs_diverge() {
        assert_ne!(bit_offsets(b"alpha", 8), bit_offsets(b"beta", 8));
    }
}
