//! Sizing policy: hash-count selection and named size tiers.
//!
//! Capacity is always a power of two, expressed as a bit-address width
//! `b` in `[6, 32]`: the filter occupies `2^b` bits, so any 32-bit offset
//! folds into range with a single mask. The hash count is picked by
//! evaluating the closed-form false-positive estimate
//! `fp(k) = (1 - e^(-k*n/m))^k` for every candidate `k` and keeping the
//! argmin.

use std::fmt;

use tracing::warn;

/// Smallest supported bit-address width (64 bits, 8 bytes).
pub const MIN_BIT_WIDTH: u8 = 6;

/// Largest supported bit-address width (2^32 bits, 512 MB).
pub const MAX_BIT_WIDTH: u8 = 32;

/// Smallest usable hash count.
pub const MIN_HASH_COUNT: u8 = 1;

/// Largest hash count a 512-bit digest can feed.
pub const MAX_HASH_COUNT: u8 = 16;

/// Closed-form false-positive estimate `(1 - e^(-k*n/m))^k` for a filter of
/// `bits` bits after `elements` insertions with `hash_count` hashes.
pub fn false_positive_estimate(bits: u64, elements: u64, hash_count: u8) -> f64 {
    let exponent = -f64::from(hash_count) * (elements as f64) / (bits as f64);
    (1.0 - exponent.exp()).powi(i32::from(hash_count))
}

/// Pick the hash count that minimizes the theoretical false-positive rate
/// for `expected_elements` insertions into `bits` bits.
///
/// Candidates are evaluated in ascending order and the first minimum wins,
/// so ties break toward the smaller (cheaper) hash count. A result of 1
/// means the requested capacity is too small for the expected load to be
/// statistically useful; that is logged as a warning and returned anyway,
/// since the choice is advisory, never an error.
pub fn select_hash_count(expected_elements: u64, bits: u64) -> u8 {
    let mut best = MIN_HASH_COUNT;
    let mut best_estimate = f64::INFINITY;

    for hash_count in MIN_HASH_COUNT..=MAX_HASH_COUNT {
        let estimate = false_positive_estimate(bits, expected_elements, hash_count);
        if estimate < best_estimate {
            best_estimate = estimate;
            best = hash_count;
        }
    }

    if best == MIN_HASH_COUNT {
        warn!(
            expected_elements,
            bits,
            "filter is undersized for the expected load; a single hash \
             function was selected and accuracy will be poor"
        );
    }
    best
}

macro_rules! filter_sizes {
    ($($variant:ident = $width:expr => $label:literal),+ $(,)?) => {
        /// Named capacity tiers, 8 bytes through 512 MB.
        ///
        /// Each tier doubles the previous one; the discriminant is the
        /// tier's bit-address width.
        #[repr(u8)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum FilterSize {
            $($variant = $width),+
        }

        impl FilterSize {
            /// Every tier, ascending.
            pub const ALL: [FilterSize; 27] = [$(FilterSize::$variant),+];

            /// Human-readable tier name, e.g. `"64 KB"`.
            pub fn label(self) -> &'static str {
                match self {
                    $(FilterSize::$variant => $label),+
                }
            }

            /// Look a tier up by its label.
            pub fn from_label(label: &str) -> Option<FilterSize> {
                match label {
                    $($label => Some(FilterSize::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

filter_sizes! {
    B8   = 6  => "8 B",
    B16  = 7  => "16 B",
    B32  = 8  => "32 B",
    B64  = 9  => "64 B",
    B128 = 10 => "128 B",
    B256 = 11 => "256 B",
    B512 = 12 => "512 B",
    K1   = 13 => "1 KB",
    K2   = 14 => "2 KB",
    K4   = 15 => "4 KB",
    K8   = 16 => "8 KB",
    K16  = 17 => "16 KB",
    K32  = 18 => "32 KB",
    K64  = 19 => "64 KB",
    K128 = 20 => "128 KB",
    K256 = 21 => "256 KB",
    K512 = 22 => "512 KB",
    M1   = 23 => "1 MB",
    M2   = 24 => "2 MB",
    M4   = 25 => "4 MB",
    M8   = 26 => "8 MB",
    M16  = 27 => "16 MB",
    M32  = 28 => "32 MB",
    M64  = 29 => "64 MB",
    M128 = 30 => "128 MB",
    M256 = 31 => "256 MB",
    M512 = 32 => "512 MB",
}

impl FilterSize {
    /// The tier's bit-address width `b`; the filter occupies `2^b` bits.
    pub fn bit_address_width(self) -> u8 {
        self as u8
    }

    /// The tier's capacity in bytes.
    pub fn byte_len(self) -> u64 {
        1u64 << (self.bit_address_width() - 3)
    }
}

impl fmt::Display for FilterSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
