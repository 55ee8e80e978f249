//! Core Bloom filter implementation.
//!
//! INVARIANTS:
//! - Storage length is always a power of two, and `index_mask` is always
//!   that length minus one.
//! - Bits only ever flip from 0 to 1; no operation clears a bit, which is
//!   what makes a negative query a proof of absence.
//! - `hash_count` is fixed at construction and never exceeds 16 (8 on the
//!   256-bit digest path).

use bloomwire_bitarray::BitArray;
use serde::Serialize;

use super::encoding::canonical_bytes;
use super::offsets::bit_offsets;
use super::sizing::{
    select_hash_count, FilterSize, MAX_BIT_WIDTH, MAX_HASH_COUNT, MIN_BIT_WIDTH, MIN_HASH_COUNT,
};
use crate::error::FilterError;
use crate::ports::BitStore;

/// Probabilistic set membership with no false negatives.
///
/// A filter owns a fixed-length bit store of `2^b` bits and folds each of
/// an element's hash-derived offsets into range with a single mask. Querying
/// an element that was inserted always answers `true`; querying anything
/// else answers `true` with the probability reported by
/// [`Self::false_positive_probability`] and `false` otherwise.
///
/// There is no deletion and no resizing: a filter stays useful until its
/// fill ratio degrades past the caller's tolerance, then gets replaced.
///
/// # Examples
///
/// ```
/// use bloomwire::BloomFilter;
///
/// let mut filter = BloomFilter::new(10, 100)?;
/// filter.insert(b"alpha");
///
/// assert!(filter.contains(b"alpha"));
/// assert!(filter.absent(b"gamma"));
/// # Ok::<(), bloomwire::FilterError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilter<S: BitStore = BitArray> {
    /// Bit storage, exclusively owned. Length `2^b` bits.
    store: S,
    /// `2^b - 1`; folds any 32-bit offset into the valid bit range.
    index_mask: u32,
    /// Number of bit positions set per insert / checked per query (k).
    hash_count: u8,
}

impl BloomFilter<BitArray> {
    /// Create a filter of `2^bit_width` bits sized for `expected_elements`
    /// insertions, picking the hash count that minimizes the theoretical
    /// false-positive rate.
    ///
    /// `bit_width` must lie in `[6, 32]` and `expected_elements` must be
    /// positive; both are rejected eagerly.
    pub fn new(bit_width: u8, expected_elements: u64) -> Result<Self, FilterError> {
        if !(MIN_BIT_WIDTH..=MAX_BIT_WIDTH).contains(&bit_width) {
            return Err(FilterError::BitWidthOutOfRange { width: bit_width });
        }
        if expected_elements == 0 {
            return Err(FilterError::ZeroExpectedElements);
        }
        let hash_count = select_hash_count(expected_elements, 1u64 << bit_width);
        Self::with_parameters(bit_width, hash_count)
    }

    /// Create a filter at a named capacity tier.
    pub fn with_size(size: FilterSize, expected_elements: u64) -> Result<Self, FilterError> {
        Self::new(size.bit_address_width(), expected_elements)
    }

    /// Create a filter from an arbitrary byte budget, rounding **down** to
    /// the nearest power-of-two capacity (budgets past 512 MB clamp to the
    /// largest supported width).
    pub fn with_byte_budget(bytes: u64, expected_elements: u64) -> Result<Self, FilterError> {
        if bytes < FilterSize::B8.byte_len() {
            return Err(FilterError::ByteBudgetTooSmall { bytes });
        }
        // floor(log2(bytes * 8)), without the * 8 overflowing.
        let bit_width = (bytes.ilog2() as u8 + 3).min(MAX_BIT_WIDTH);
        Self::new(bit_width, expected_elements)
    }

    /// Create a filter with explicit parameters, bypassing the sizing
    /// policy.
    pub fn with_parameters(bit_width: u8, hash_count: u8) -> Result<Self, FilterError> {
        if !(MIN_BIT_WIDTH..=MAX_BIT_WIDTH).contains(&bit_width) {
            return Err(FilterError::BitWidthOutOfRange { width: bit_width });
        }
        if !(MIN_HASH_COUNT..=MAX_HASH_COUNT).contains(&hash_count) {
            return Err(FilterError::HashCountOutOfRange { hash_count });
        }
        let store = BitArray::new(1u64 << bit_width);
        Ok(Self::from_raw_parts(store, hash_count))
    }
}

impl<S: BitStore> BloomFilter<S> {
    /// Assemble a filter around an existing store. The codec path lands
    /// here after validating the wire header.
    pub(crate) fn from_raw_parts(store: S, hash_count: u8) -> Self {
        debug_assert!(store.bit_len().is_power_of_two());
        debug_assert!((MIN_HASH_COUNT..=MAX_HASH_COUNT).contains(&hash_count));
        let index_mask = (store.bit_len() - 1) as u32;
        Self {
            store,
            index_mask,
            hash_count,
        }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Insert raw bytes into the filter.
    ///
    /// Idempotent: re-inserting an element changes nothing after the first
    /// insertion. After this call, `contains(element)` returns `true`.
    pub fn insert(&mut self, element: &[u8]) {
        for offset in bit_offsets(element, self.hash_count) {
            self.store.set(u64::from(offset & self.index_mask), true);
        }
    }

    /// Insert any serializable value via the canonical byte encoding.
    pub fn insert_value<T>(&mut self, value: &T) -> Result<(), FilterError>
    where
        T: Serialize + ?Sized,
    {
        self.insert(&canonical_bytes(value)?);
        Ok(())
    }

    /// Test whether `element` might be in the set.
    ///
    /// `false` is definitive; `true` means "possibly present" with the
    /// probability reported by
    /// [`false_positive_probability`](Self::false_positive_probability).
    pub fn contains(&self, element: &[u8]) -> bool {
        bit_offsets(element, self.hash_count)
            .into_iter()
            .all(|offset| self.store.get(u64::from(offset & self.index_mask)))
    }

    /// Test a serializable value via the canonical byte encoding.
    pub fn contains_value<T>(&self, value: &T) -> Result<bool, FilterError>
    where
        T: Serialize + ?Sized,
    {
        Ok(self.contains(&canonical_bytes(value)?))
    }

    /// `true` iff `element` is definitely not in the set. Readability alias
    /// for `!contains(element)`; carries no extra guarantee.
    pub fn absent(&self, element: &[u8]) -> bool {
        !self.contains(element)
    }

    /// Empirical false-positive probability `(ones / bits)^k` from the live
    /// bit population, not the at-construction estimate.
    ///
    /// Costs a full population count, O(bit_len). Call it for monitoring,
    /// not on a query path.
    pub fn false_positive_probability(&self) -> f64 {
        self.fill_ratio().powi(i32::from(self.hash_count))
    }

    /// Estimate how many distinct elements have been inserted, from the
    /// observed fill ratio: `-ln(1 - fill) * bits / k`, rounded to nearest.
    ///
    /// Accuracy degrades as the filter saturates; at full saturation the
    /// estimator diverges and the result saturates to `u64::MAX`. Same
    /// O(bit_len) cost caveat as
    /// [`false_positive_probability`](Self::false_positive_probability).
    pub fn estimated_cardinality(&self) -> u64 {
        let ones = self.store.count_ones();
        if ones == 0 {
            return 0;
        }
        let bits = self.bit_len() as f64;
        let fill = ones as f64 / bits;
        (-(1.0 - fill).ln() * bits / f64::from(self.hash_count)).round() as u64
    }

    /// Fold another filter's members into this one (bitwise OR).
    ///
    /// Both filters must share the same capacity and hash count, otherwise
    /// their bit positions are not comparable and the union is rejected.
    pub fn union(&mut self, other: &Self) -> Result<(), FilterError> {
        if self.bit_len() != other.bit_len() || self.hash_count != other.hash_count {
            return Err(FilterError::IncompatibleFilters {
                bit_len: self.bit_len(),
                hash_count: self.hash_count,
                other_bit_len: other.bit_len(),
                other_hash_count: other.hash_count,
            });
        }
        let mut offset = 0u64;
        for chunk in other.store.chunks() {
            self.store.load_bytes_at(offset, chunk);
            offset += chunk.len() as u64;
        }
        Ok(())
    }

    /// Capacity in bits (`2^b`).
    pub fn bit_len(&self) -> u64 {
        self.store.bit_len()
    }

    /// The bit-address width `b`.
    pub fn bit_address_width(&self) -> u8 {
        self.bit_len().trailing_zeros() as u8
    }

    /// Number of hash functions (k).
    pub fn hash_count(&self) -> u8 {
        self.hash_count
    }

    /// Number of bits currently set. O(bit_len).
    pub fn bits_set(&self) -> u64 {
        self.store.count_ones()
    }

    /// Fraction of bits currently set. O(bit_len).
    pub fn fill_ratio(&self) -> f64 {
        self.store.count_ones() as f64 / self.bit_len() as f64
    }

    /// `true` iff nothing has ever been inserted.
    pub fn is_empty(&self) -> bool {
        self.store.count_ones() == 0
    }
}
