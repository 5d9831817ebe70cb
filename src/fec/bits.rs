//! MSB-first bit helpers shared by the codecs.
//!
//! Every scheme unpacks a byte buffer so that bit 7 of byte 0 is stream
//! position 0, bit 6 of byte 0 is position 1, and so on. Words loaded from a
//! bit slice follow the same order: stream position 0 becomes the most
//! significant bit of the word.

use bitvec::prelude::*;

/// Borrow a byte buffer as an MSB-first bit stream
pub fn unpack(data: &[u8]) -> &BitSlice<u8, Msb0> {
    data.view_bits::<Msb0>()
}

/// Allocate a zeroed MSB-first bit stream of `len` bits
pub fn zeroed(len: usize) -> BitVec<u8, Msb0> {
    bitvec![u8, Msb0; 0; len]
}

/// Repack an MSB-first bit stream into bytes.
///
/// A trailing partial byte is zero-padded in its low bits.
pub fn pack(bits: BitVec<u8, Msb0>) -> Vec<u8> {
    bits.into_vec()
}

/// Read up to 32 bits as a word, first bit most significant
pub fn load_word(bits: &BitSlice<u8, Msb0>) -> u32 {
    debug_assert!(bits.len() <= 32);
    bits.iter()
        .by_vals()
        .fold(0u32, |acc, bit| (acc << 1) | u32::from(bit))
}

/// Write the low `bits.len()` bits of `word` into `bits`, most significant first
pub fn store_word(bits: &mut BitSlice<u8, Msb0>, word: u32) {
    let width = bits.len();
    debug_assert!(width <= 32);
    for i in 0..width {
        bits.set(i, (word >> (width - 1 - i)) & 1 == 1);
    }
}

/// Hamming weight of a binary vector held in a word
#[inline]
pub fn weight(v: u32) -> u32 {
    v.count_ones()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_is_msb_first() {
        let bits = unpack(&[0b1000_0001, 0b0100_0000]);
        assert!(bits[0]);
        assert!(!bits[1]);
        assert!(bits[7]);
        assert!(bits[9]);
        assert_eq!(bits.count_ones(), 3);
    }

    #[test]
    fn test_load_and_store_word() {
        let data = [0xAB, 0xCD, 0xEF];
        let bits = unpack(&data);
        assert_eq!(load_word(&bits[..12]), 0xABC);
        assert_eq!(load_word(&bits[12..]), 0xDEF);
        assert_eq!(load_word(bits), 0xABCDEF);

        let mut out = zeroed(24);
        store_word(&mut out[..12], 0xDEF);
        store_word(&mut out[12..], 0xABC);
        assert_eq!(pack(out), vec![0xDE, 0xFA, 0xBC]);
    }

    #[test]
    fn test_store_word_ignores_high_bits() {
        let mut out = zeroed(8);
        store_word(&mut out[..4], 0xF5);
        assert_eq!(pack(out), vec![0x50]);
    }

    #[test]
    fn test_pack_pads_partial_byte() {
        let mut out = zeroed(12);
        out.set(0, true);
        out.set(11, true);
        assert_eq!(pack(out), vec![0x80, 0x10]);
    }

    #[test]
    fn test_weight() {
        assert_eq!(weight(0), 0);
        assert_eq!(weight(0b1011), 3);
        assert_eq!(weight(0xFFF), 12);
    }
}
