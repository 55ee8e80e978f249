//! Adapters Layer (Driven Adapters)
//!
//! Connects the [`BitStore`] port to the packed storage crate. `BitArray`
//! is the store every public constructor and codec entry point defaults to.

use bloomwire_bitarray::BitArray;

use crate::ports::BitStore;

impl BitStore for BitArray {
    type Chunks<'a> = std::slice::Chunks<'a, u8>;

    fn with_bit_len(bit_len: u64) -> Self {
        BitArray::new(bit_len)
    }

    fn get(&self, index: u64) -> bool {
        BitArray::get(self, index)
    }

    fn set(&mut self, index: u64, value: bool) {
        BitArray::set(self, index, value);
    }

    fn bit_len(&self) -> u64 {
        BitArray::bit_len(self)
    }

    fn count_ones(&self) -> u64 {
        BitArray::count_ones(self)
    }

    fn to_bytes(&self) -> Vec<u8> {
        BitArray::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        BitArray::from_bytes(bytes)
    }

    fn chunks(&self) -> Self::Chunks<'_> {
        BitArray::chunks(self)
    }

    fn load_bytes_at(&mut self, byte_offset: u64, bytes: &[u8]) {
        BitArray::load_bytes_at(self, byte_offset, bytes);
    }
}
