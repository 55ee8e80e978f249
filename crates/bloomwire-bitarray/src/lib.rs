//! # Bloomwire Bit Array
//!
//! Fixed-length packed bit storage for the bloomwire filter core.
//!
//! The array owns its bits for its whole lifetime: no resizing, no
//! reallocation. Bits are addressed individually, counted in bulk, and
//! exported/imported as raw bytes, either the whole array at once or as a
//! sequence of fixed-size chunks, so multi-hundred-megabyte arrays can be
//! shipped over a wire without materializing a second copy.
//!
//! ## Byte layout
//!
//! Bit `i` lives in byte `i / 8` at position `i % 8` (least significant bit
//! first). This is the same byte image as little-endian 64-bit word storage,
//! so exported buffers are portable across word sizes.
//!
//! ## Import semantics
//!
//! [`BitArray::load_bytes_at`] ORs incoming bytes into the array rather than
//! overwriting. Bits only ever flip from 0 to 1, so re-delivering a chunk is
//! harmless and partial imports never erase earlier ones.

use bitvec::prelude::*;

/// Export chunk granularity in bytes (1024 64-bit words).
pub const CHUNK_LEN: usize = 8192;

/// Fixed-length bit vector with chunked byte export/import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitArray {
    bits: BitVec<u8, Lsb0>,
}

impl BitArray {
    /// Create an all-zero array of `bit_len` bits.
    ///
    /// # Panics
    ///
    /// Panics if `bit_len` is zero or not a multiple of 8. Callers size the
    /// array in whole bytes; the filter core only ever passes powers of two.
    pub fn new(bit_len: u64) -> Self {
        assert!(bit_len > 0, "bit array length must be positive");
        assert!(
            bit_len % 8 == 0,
            "bit array length must be a multiple of 8, got {bit_len}"
        );
        Self {
            bits: bitvec![u8, Lsb0; 0; bit_len as usize],
        }
    }

    /// Read a single bit.
    ///
    /// # Panics
    ///
    /// Panics if `index >= bit_len()`.
    pub fn get(&self, index: u64) -> bool {
        self.bits[index as usize]
    }

    /// Write a single bit.
    ///
    /// # Panics
    ///
    /// Panics if `index >= bit_len()`.
    pub fn set(&mut self, index: u64, value: bool) {
        self.bits.set(index as usize, value);
    }

    /// Total number of bits.
    pub fn bit_len(&self) -> u64 {
        self.bits.len() as u64
    }

    /// Number of bits currently set to one. O(bit_len / 64).
    pub fn count_ones(&self) -> u64 {
        self.bits.count_ones() as u64
    }

    /// Borrow the whole array as raw bytes, length `bit_len() / 8`.
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Copy the whole array out as raw bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Rebuild an array from a previously exported byte buffer.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bits: BitVec::from_slice(bytes),
        }
    }

    /// Iterate the array as [`CHUNK_LEN`]-byte chunks covering every byte
    /// exactly once. The final chunk may be shorter.
    pub fn chunks(&self) -> std::slice::Chunks<'_, u8> {
        self.as_bytes().chunks(CHUNK_LEN)
    }

    /// OR `bytes` into the array starting at `byte_offset`.
    ///
    /// # Panics
    ///
    /// Panics if the range `byte_offset..byte_offset + bytes.len()` falls
    /// outside the array.
    pub fn load_bytes_at(&mut self, byte_offset: u64, bytes: &[u8]) {
        let start = byte_offset as usize;
        let end = start + bytes.len();
        let raw = self.bits.as_raw_mut_slice();
        assert!(
            end <= raw.len(),
            "import range {start}..{end} exceeds array of {} bytes",
            raw.len()
        );
        for (dst, src) in raw[start..end].iter_mut().zip(bytes) {
            *dst |= *src;
        }
    }

    /// Populate the array from a sequence of byte chunks, in order,
    /// starting at offset zero.
    ///
    /// # Panics
    ///
    /// Panics if the chunks together exceed the array length.
    pub fn consume_chunks<I>(&mut self, chunks: I)
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut offset = 0u64;
        for chunk in chunks {
            let chunk = chunk.as_ref();
            self.load_bytes_at(offset, chunk);
            offset += chunk.len() as u64;
        }
    }
}
