//! Error types for filter construction and wire decoding.

use thiserror::Error;

/// Errors raised while constructing or combining filters.
///
/// All variants are rejected eagerly: once a filter exists, insert, query
/// and the estimators cannot fail.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("bit-address width {width} outside supported range [6, 32]")]
    BitWidthOutOfRange { width: u8 },

    #[error("expected element count must be positive")]
    ZeroExpectedElements,

    #[error("hash count {hash_count} outside supported range [1, 16]")]
    HashCountOutOfRange { hash_count: u8 },

    #[error("byte budget {bytes} is below the smallest supported filter (8 bytes)")]
    ByteBudgetTooSmall { bytes: u64 },

    #[error(
        "cannot union filters with different parameters: \
         {bit_len} bits / {hash_count} hashes vs {other_bit_len} bits / {other_hash_count} hashes"
    )]
    IncompatibleFilters {
        bit_len: u64,
        hash_count: u8,
        other_bit_len: u64,
        other_hash_count: u8,
    },

    #[error("value encoding failed: {0}")]
    ValueEncoding(#[from] bincode::Error),
}

/// Errors raised while reconstructing a filter from a byte stream.
///
/// These are recoverable results, not crashes: a caller feeding untrusted
/// bytes gets a typed rejection and keeps running.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// No recognizable header appeared within the bounded lookahead window
    /// (100 bytes), or the stream ended before one did.
    #[error("no recognizable header within the first {scanned} bytes")]
    InvalidHeader { scanned: usize },

    /// The stream ended before the filter body announced by the header was
    /// fully delivered.
    #[error("stream ended after {received} of {expected} body bytes")]
    TruncatedBody { expected: u64, received: u64 },

    /// The stream carried bytes past the end of the filter body.
    #[error("{extra} bytes past the end of the filter body")]
    TrailingBytes { extra: u64 },
}
