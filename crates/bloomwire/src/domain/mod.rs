//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Core Bloom filter implementation
//! - Digest-sliced bit offset generation
//! - Sizing policy (hash-count selection, named size tiers)
//! - Canonical value encoding
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod encoding;
pub mod filter;
pub mod offsets;
pub mod sizing;

pub use encoding::canonical_bytes;
pub use filter::BloomFilter;
pub use offsets::{bit_offsets, MAX_OFFSETS, MAX_SHA256_OFFSETS};
pub use sizing::{
    false_positive_estimate, select_hash_count, FilterSize, MAX_BIT_WIDTH, MAX_HASH_COUNT,
    MIN_BIT_WIDTH, MIN_HASH_COUNT,
};
