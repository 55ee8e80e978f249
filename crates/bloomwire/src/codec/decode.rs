//! Streaming filter reconstruction.
//!
//! The decoder is an explicit accumulator state machine:
//!
//! ```text
//! AwaitingHeader --(4 valid bytes)--> StreamingBody --(body complete)--> Done
//!       |                                  |
//!       +--(100 bytes, no header)--> Failed(InvalidHeader)
//!       +--(overrun)---------------> Failed(TrailingBytes)
//! ```
//!
//! Incoming chunk boundaries carry no meaning: the header may arrive a byte
//! at a time, or welded onto the first half of the body. Header detection
//! buffers at most [`MAX_HEADER_SCAN`] bytes; once the header is known, the
//! buffered tail and every later chunk are ORed straight into a freshly
//! allocated store with no further buffering, so memory stays bounded no
//! matter how large the filter is.

use bloomwire_bitarray::BitArray;
use futures::{Stream, StreamExt};
use tracing::debug;

use super::{WireHeader, HEADER_LEN, MAX_HEADER_SCAN};
use crate::domain::filter::BloomFilter;
use crate::error::CodecError;
use crate::ports::BitStore;

enum DecodeState<S: BitStore> {
    /// Accumulating bytes until the first four form a valid header.
    AwaitingHeader { buffer: Vec<u8> },
    /// Header known; body bytes flow straight into the store.
    StreamingBody {
        header: WireHeader,
        store: S,
        received: u64,
    },
    /// Body complete; only empty pushes are acceptable now.
    Done { header: WireHeader, store: S },
    /// Fatal decode error; replayed on every later push.
    Failed(CodecError),
}

/// Incremental filter decoder.
///
/// Feed chunks with [`push`](Self::push) as they arrive, then call
/// [`finish`](Self::finish) when the input is exhausted. Most callers want
/// the [`from_chunks`] / [`from_stream`] drivers instead.
pub struct StreamDecoder<S: BitStore = BitArray> {
    state: DecodeState<S>,
}

impl<S: BitStore> StreamDecoder<S> {
    pub fn new() -> Self {
        Self {
            state: DecodeState::AwaitingHeader { buffer: Vec::new() },
        }
    }

    /// Feed the next chunk of the stream.
    ///
    /// Errors are sticky: after a fatal error every later push returns the
    /// same error.
    pub fn push(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        // Park a placeholder so `advance` can consume the state by value;
        // it is unconditionally overwritten below.
        let parked = DecodeState::Failed(CodecError::InvalidHeader { scanned: 0 });
        let state = std::mem::replace(&mut self.state, parked);
        let (state, result) = Self::advance(state, bytes);
        self.state = state;
        result
    }

    /// Whether the full body has been received.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, DecodeState::Done { .. })
    }

    /// Consume the decoder and yield the reconstructed filter.
    ///
    /// Fails with [`CodecError::InvalidHeader`] if the input ended before a
    /// header was recognized, or [`CodecError::TruncatedBody`] if it ended
    /// mid-body.
    pub fn finish(self) -> Result<BloomFilter<S>, CodecError> {
        match self.state {
            DecodeState::Done { header, store } => {
                Ok(BloomFilter::from_raw_parts(store, header.hash_count))
            }
            DecodeState::AwaitingHeader { buffer } => Err(CodecError::InvalidHeader {
                scanned: buffer.len(),
            }),
            DecodeState::StreamingBody {
                header, received, ..
            } => Err(CodecError::TruncatedBody {
                expected: header.body_len(),
                received,
            }),
            DecodeState::Failed(err) => Err(err),
        }
    }

    fn advance(state: DecodeState<S>, bytes: &[u8]) -> (DecodeState<S>, Result<(), CodecError>) {
        match state {
            DecodeState::AwaitingHeader { mut buffer } => {
                buffer.extend_from_slice(bytes);
                if buffer.len() < HEADER_LEN {
                    return (DecodeState::AwaitingHeader { buffer }, Ok(()));
                }
                match WireHeader::parse([buffer[0], buffer[1], buffer[2], buffer[3]]) {
                    Some(header) => {
                        debug!(
                            width = header.width,
                            hash_count = header.hash_count,
                            "wire header accepted"
                        );
                        let body = buffer.split_off(HEADER_LEN);
                        let store = S::with_bit_len(1u64 << header.width);
                        Self::advance(
                            DecodeState::StreamingBody {
                                header,
                                store,
                                received: 0,
                            },
                            &body,
                        )
                    }
                    None if buffer.len() >= MAX_HEADER_SCAN => {
                        let err = CodecError::InvalidHeader {
                            scanned: buffer.len(),
                        };
                        (DecodeState::Failed(err.clone()), Err(err))
                    }
                    None => (DecodeState::AwaitingHeader { buffer }, Ok(())),
                }
            }
            DecodeState::StreamingBody {
                header,
                mut store,
                received,
            } => {
                let body_len = header.body_len();
                let total = received + bytes.len() as u64;
                if total > body_len {
                    let err = CodecError::TrailingBytes {
                        extra: total - body_len,
                    };
                    return (DecodeState::Failed(err.clone()), Err(err));
                }
                store.load_bytes_at(received, bytes);
                if total == body_len {
                    debug!(body_len, "filter body complete");
                    (DecodeState::Done { header, store }, Ok(()))
                } else {
                    (
                        DecodeState::StreamingBody {
                            header,
                            store,
                            received: total,
                        },
                        Ok(()),
                    )
                }
            }
            DecodeState::Done { header, store } => {
                if bytes.is_empty() {
                    (DecodeState::Done { header, store }, Ok(()))
                } else {
                    let err = CodecError::TrailingBytes {
                        extra: bytes.len() as u64,
                    };
                    (DecodeState::Failed(err.clone()), Err(err))
                }
            }
            DecodeState::Failed(err) => (DecodeState::Failed(err.clone()), Err(err)),
        }
    }
}

impl<S: BitStore> Default for StreamDecoder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reconstruct a filter from a finite sequence of byte chunks whose
/// boundaries need not align with anything.
pub fn from_chunks<S, I>(chunks: I) -> Result<BloomFilter<S>, CodecError>
where
    S: BitStore,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut decoder = StreamDecoder::new();
    for chunk in chunks {
        decoder.push(chunk.as_ref())?;
    }
    decoder.finish()
}

/// Reconstruct a filter from one contiguous buffer.
pub fn from_bytes<S: BitStore>(bytes: &[u8]) -> Result<BloomFilter<S>, CodecError> {
    from_chunks([bytes])
}

/// Reconstruct a filter from an asynchronous chunk stream.
///
/// Chunks are pulled lazily, one at a time, so consumption is driven by the
/// producer's pace; nothing is buffered beyond the header-detection window.
/// A stream that never ends suspends this future indefinitely.
pub async fn from_stream<S, St, B>(mut stream: St) -> Result<BloomFilter<S>, CodecError>
where
    S: BitStore,
    St: Stream<Item = B> + Unpin,
    B: AsRef<[u8]>,
{
    let mut decoder = StreamDecoder::new();
    while let Some(chunk) = stream.next().await {
        decoder.push(chunk.as_ref())?;
    }
    decoder.finish()
}

#[cfg(test)]
mod tests {
    use super::super::encode::{to_bytes, to_chunks};
    use super::*;

    fn sample_filter() -> BloomFilter {
        let mut filter = BloomFilter::new(10, 100).unwrap();
        filter.insert(b"alpha");
        filter.insert(b"beta");
        filter
    }

    #[test]
    fn test_roundtrip_through_chunks() {
        let filter = sample_filter();
        let restored: BloomFilter = from_chunks(to_chunks(&filter)).unwrap();

        assert_eq!(restored, filter);
        assert_eq!(restored.bit_len(), filter.bit_len());
        assert_eq!(restored.hash_count(), filter.hash_count());
        assert!(restored.contains(b"alpha"));
        assert!(restored.contains(b"beta"));
    }

    #[test]
    fn test_roundtrip_one_byte_at_a_time() {
        let filter = sample_filter();
        let bytes = to_bytes(&filter);
        let restored: BloomFilter = from_chunks(bytes.chunks(1)).unwrap();
        assert_eq!(restored, filter);
    }

    #[test]
    fn test_header_split_across_chunks() {
        let filter = sample_filter();
        let bytes = to_bytes(&filter);

        let mut decoder: StreamDecoder = StreamDecoder::new();
        decoder.push(&bytes[..3]).unwrap();
        assert!(!decoder.is_complete());
        decoder.push(&bytes[3..]).unwrap();
        assert!(decoder.is_complete());
        assert_eq!(decoder.finish().unwrap(), filter);
    }

    #[test]
    fn test_unrecognized_prefix_fails_at_the_scan_limit() {
        let mut decoder: StreamDecoder = StreamDecoder::new();
        // 99 garbage bytes are still inconclusive...
        decoder.push(&[0xAB; 99]).unwrap();
        // ...the hundredth settles it.
        let err = decoder.push(&[0xAB]).unwrap_err();
        assert_eq!(err, CodecError::InvalidHeader { scanned: 100 });
    }

    #[test]
    fn test_short_garbage_fails_only_at_finish() {
        let mut decoder: StreamDecoder = StreamDecoder::new();
        decoder.push(&[0xAB; 10]).unwrap();
        assert_eq!(
            decoder.finish().unwrap_err(),
            CodecError::InvalidHeader { scanned: 10 }
        );
    }

    #[test]
    fn test_wrong_version_is_never_recognized() {
        let mut bytes = to_bytes(&sample_filter());
        bytes[0] = 2;
        let result = from_bytes::<BitArray>(&bytes);
        assert!(matches!(result, Err(CodecError::InvalidHeader { .. })));
    }

    #[test]
    fn test_truncated_body_is_reported() {
        let bytes = to_bytes(&sample_filter());
        let err = from_bytes::<BitArray>(&bytes[..bytes.len() - 1]).unwrap_err();
        assert_eq!(
            err,
            CodecError::TruncatedBody {
                expected: 128,
                received: 127
            }
        );
    }

    #[test]
    fn test_trailing_bytes_are_rejected() {
        let mut bytes = to_bytes(&sample_filter());
        bytes.push(0);
        let err = from_bytes::<BitArray>(&bytes).unwrap_err();
        assert_eq!(err, CodecError::TrailingBytes { extra: 1 });
    }

    #[test]
    fn test_errors_are_sticky() {
        let mut decoder: StreamDecoder = StreamDecoder::new();
        let first = decoder.push(&[0xAB; 150]).unwrap_err();
        let second = decoder.push(&[1, 42, 10, 7]).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_filter_roundtrips() {
        let filter = BloomFilter::new(6, 1).unwrap();
        let restored: BloomFilter = from_chunks(to_chunks(&filter)).unwrap();
        assert_eq!(restored, filter);
        assert!(restored.is_empty());
    }
}
