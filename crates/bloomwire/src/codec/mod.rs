//! Wire Codec
//!
//! Binary layout, fixed-size header then variable-size body:
//!
//! ```text
//! byte 0   format version (1)
//! byte 1   magic constant (42)
//! byte 2   bit-address width b
//! byte 3   hash count k
//! byte 4.. raw bit-array body, exactly 2^(b-3) bytes
//! ```
//!
//! Encoding is available single-shot ([`encode::to_bytes`]) or as a lazy
//! chunk sequence ([`encode::to_chunks`], [`encode::to_stream`]) so large
//! filters never need a second in-memory copy. Decoding runs through an
//! explicit state machine ([`decode::StreamDecoder`]) that tolerates
//! arbitrary chunk boundaries, including headers split across chunks.

pub mod decode;
pub mod encode;

pub use decode::{from_bytes, from_chunks, from_stream, StreamDecoder};
pub use encode::{to_bytes, to_chunks, to_stream};

use crate::domain::filter::BloomFilter;
use crate::domain::sizing::{MAX_BIT_WIDTH, MAX_HASH_COUNT, MIN_BIT_WIDTH, MIN_HASH_COUNT};
use crate::ports::BitStore;

/// Wire format version.
pub const FORMAT_VERSION: u8 = 1;

/// Fixed magic constant, byte 1 of every encoded filter.
pub const MAGIC: u8 = 42;

/// Header length in bytes.
pub const HEADER_LEN: usize = 4;

/// Bounded lookahead while hunting for a header in an incoming stream.
/// Generous: the header is only 4 bytes, but an upstream transport may
/// split it arbitrarily.
pub const MAX_HEADER_SCAN: usize = 100;

/// The decoded 4-byte header: everything needed to allocate storage before
/// the body arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WireHeader {
    /// Bit-address width `b`; the body carries `2^(b-3)` bytes.
    pub width: u8,
    /// Hash count `k`.
    pub hash_count: u8,
}

impl WireHeader {
    /// The header describing `filter`.
    pub fn for_filter<S: BitStore>(filter: &BloomFilter<S>) -> Self {
        Self {
            width: filter.bit_address_width(),
            hash_count: filter.hash_count(),
        }
    }

    /// Body length in bytes (`2^(b-3)`).
    pub fn body_len(&self) -> u64 {
        1u64 << (self.width - 3)
    }

    /// Encode as the 4 wire bytes.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        [FORMAT_VERSION, MAGIC, self.width, self.hash_count]
    }

    /// Parse 4 candidate bytes. `None` when the version or magic byte is
    /// wrong or the announced parameters are outside their valid ranges.
    pub fn parse(bytes: [u8; HEADER_LEN]) -> Option<Self> {
        let [version, magic, width, hash_count] = bytes;
        if version != FORMAT_VERSION || magic != MAGIC {
            return None;
        }
        if !(MIN_BIT_WIDTH..=MAX_BIT_WIDTH).contains(&width) {
            return None;
        }
        if !(MIN_HASH_COUNT..=MAX_HASH_COUNT).contains(&hash_count) {
            return None;
        }
        Some(Self { width, hash_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_encode_parse_roundtrip() {
        let header = WireHeader {
            width: 10,
            hash_count: 7,
        };
        assert_eq!(header.encode(), [1, 42, 10, 7]);
        assert_eq!(WireHeader::parse(header.encode()), Some(header));
    }

    #[test]
    fn test_header_rejects_bad_version_and_magic() {
        assert_eq!(WireHeader::parse([2, 42, 10, 7]), None);
        assert_eq!(WireHeader::parse([1, 41, 10, 7]), None);
    }

    #[test]
    fn test_header_rejects_out_of_range_parameters() {
        assert_eq!(WireHeader::parse([1, 42, 5, 7]), None);
        assert_eq!(WireHeader::parse([1, 42, 33, 7]), None);
        assert_eq!(WireHeader::parse([1, 42, 10, 0]), None);
        assert_eq!(WireHeader::parse([1, 42, 10, 17]), None);
    }

    #[test]
    fn test_body_len_follows_width() {
        assert_eq!(
            WireHeader {
                width: 6,
                hash_count: 1
            }
            .body_len(),
            8
        );
        assert_eq!(
            WireHeader {
                width: 32,
                hash_count: 16
            }
            .body_len(),
            512 * 1024 * 1024
        );
    }
}
