//! Filter encoding: single-shot and chunked.

use futures::Stream;

use super::{WireHeader, HEADER_LEN};
use crate::domain::filter::BloomFilter;
use crate::ports::BitStore;

/// Encode the whole filter into one buffer.
///
/// Retained for callers that want the simple form; the streaming pair
/// ([`to_chunks`], [`to_stream`]) supersedes it and should be preferred for
/// anything large, since this materializes the entire body at once.
pub fn to_bytes<S: BitStore>(filter: &BloomFilter<S>) -> Vec<u8> {
    let header = WireHeader::for_filter(filter);
    let mut bytes = Vec::with_capacity(HEADER_LEN + header.body_len() as usize);
    bytes.extend_from_slice(&header.encode());
    for chunk in filter.store().chunks() {
        bytes.extend_from_slice(chunk);
    }
    bytes
}

/// Encode the filter as a finite, non-restartable sequence of byte chunks:
/// the 4-byte header first, then the backend's own chunked export (the
/// backend decides body chunk boundaries).
pub fn to_chunks<S: BitStore>(filter: &BloomFilter<S>) -> impl Iterator<Item = Vec<u8>> + '_ {
    let header = WireHeader::for_filter(filter);
    std::iter::once(header.encode().to_vec())
        .chain(filter.store().chunks().map(|chunk| chunk.to_vec()))
}

/// [`to_chunks`] as an asynchronous stream, for wiring into sinks that pull
/// with backpressure.
pub fn to_stream<S: BitStore>(filter: &BloomFilter<S>) -> impl Stream<Item = Vec<u8>> + '_ {
    futures::stream::iter(to_chunks(filter))
}
