//! # Bloomwire
//!
//! Streaming Bloom filter: probabilistic set membership with no false
//! negatives, a tunable false-positive rate, and a binary wire format that
//! can be written and reconstructed chunk by chunk.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BloomFilter`: core probabilistic data structure
//!   - `offsets`: digest-sliced bit offset generation (SHA-256/SHA-512)
//!   - `sizing`: hash-count selection and the named capacity tiers
//!   - `encoding`: canonical byte encoding for non-binary values
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `BitStore`: driven port for the bit array backend
//!
//! - **Adapters Layer** (`adapters`): `BitStore` implementation for the
//!   packed storage in `bloomwire-bitarray` (the default store)
//!
//! - **Codec Layer** (`codec/`): the 4-byte-header wire format, chunked
//!   encoding, and the streaming decoder state machine
//!
//! ## Invariants
//!
//! - **No false negatives**: once inserted, an element is always reported
//!   as possibly present.
//! - **Monotonic storage**: bits only ever flip 0 → 1; there is no
//!   deletion and no resizing.
//! - **Power-of-two capacity**: the store always holds `2^b` bits,
//!   `b ∈ [6, 32]`, so offsets fold into range with one mask.
//!
//! ## Usage
//!
//! ```
//! use bloomwire::{BloomFilter, FilterSize};
//!
//! // 2^10 bits, sized for roughly 100 elements.
//! let mut filter = BloomFilter::new(10, 100)?;
//! filter.insert(b"alpha");
//! filter.insert(b"beta");
//!
//! assert!(filter.contains(b"alpha"));
//! assert!(filter.absent(b"gamma"));
//!
//! // Capacity can also come from a named tier.
//! let tiered = BloomFilter::with_size(FilterSize::K64, 10_000)?;
//! assert_eq!(tiered.bit_len(), 64 * 1024 * 8);
//!
//! // Ship the filter and rebuild it, chunk by chunk.
//! let restored: BloomFilter = bloomwire::from_chunks(bloomwire::to_chunks(&filter))?;
//! assert!(restored.contains(b"beta"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Reconstruction also runs over an async chunk stream, pulling lazily so
//! the producer's pace drives consumption:
//!
//! ```ignore
//! use bloomwire::BloomFilter;
//! use tokio_stream::wrappers::ReceiverStream;
//!
//! let (tx, rx) = tokio::sync::mpsc::channel(4);
//! tokio::spawn(transport_task(tx));
//! let filter: BloomFilter = bloomwire::from_stream(ReceiverStream::new(rx)).await?;
//! ```
//!
//! ## Concurrency
//!
//! All operations are synchronous and run on the caller's thread; the only
//! suspension points are the chunk boundaries of the async codec entry
//! points. A filter exclusively owns its store. Unsynchronized concurrent
//! writers are out of contract: the monotonic 0 → 1 sets bound the damage
//! of a racing write to a lost insertion, but that is a limitation, not a
//! guarantee.

pub mod adapters;
pub mod codec;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use codec::{
    from_bytes, from_chunks, from_stream, to_bytes, to_chunks, to_stream, StreamDecoder,
    WireHeader,
};
pub use domain::{
    bit_offsets, canonical_bytes, false_positive_estimate, select_hash_count, BloomFilter,
    FilterSize, MAX_BIT_WIDTH, MAX_HASH_COUNT, MIN_BIT_WIDTH, MIN_HASH_COUNT,
};
pub use error::{CodecError, FilterError};
pub use ports::BitStore;

// The default storage backend, re-exported so callers need only one crate.
pub use bloomwire_bitarray::BitArray;
