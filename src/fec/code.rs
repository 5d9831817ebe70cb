//! Algebraic definition of the extended binary Golay (24,12) code.
//!
//! The code is described by a symmetric 12x12 matrix `P` with `P * P = I`.
//! From it follow the systematic generator `G = [P | I]` and the transposed
//! parity-check matrix `H^T = [I ; P^T]`, so every codeword `c = u * G` has a
//! zero syndrome `c * H^T = u*P + u*P^T = 0`. Because `P` is symmetric the
//! code is self-dual.
//!
//! Vectors are held in machine words: element 0 of a 12-bit vector is bit 11
//! of a `u16`, element 0 of a 24-bit vector is bit 23 of a `u32`. This matches
//! the MSB-first order in which bits are read off the wire.

use crate::fec::bits::weight;

/// Number of data bits per codeword
pub const DATA_BITS: usize = 12;

/// Number of bits per codeword
pub const CODE_BITS: usize = 24;

const MASK_12: u16 = 0x0FFF;

/// The `P` matrix of the code, row by row
pub const P_MATRIX: [[u8; DATA_BITS]; DATA_BITS] = [
    [1, 0, 0, 0, 1, 1, 1, 0, 1, 1, 0, 1],
    [0, 0, 0, 1, 1, 1, 0, 1, 1, 0, 1, 1],
    [0, 0, 1, 1, 1, 0, 1, 1, 0, 1, 0, 1],
    [0, 1, 1, 1, 0, 1, 1, 0, 1, 0, 0, 1],
    [1, 1, 1, 0, 1, 1, 0, 1, 0, 0, 0, 1],
    [1, 1, 0, 1, 1, 0, 1, 0, 0, 0, 1, 1],
    [1, 0, 1, 1, 0, 1, 0, 0, 0, 1, 1, 1],
    [0, 1, 1, 0, 1, 0, 0, 0, 1, 1, 1, 1],
    [1, 1, 0, 1, 0, 0, 0, 1, 1, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 1, 1, 1, 0, 1, 1],
    [0, 1, 0, 0, 0, 1, 1, 1, 0, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
];

/// Shared instance of the Golay (24,12) code, built at compile time
pub static GOLAY_24_12: CodeDefinition = CodeDefinition::new();

/// Constant matrices of the extended Golay (24,12) code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDefinition {
    /// Rows of `P`, 12 bits each
    p: [u16; DATA_BITS],
    /// Rows of `G = [P | I]`, 24 bits each
    g: [u32; DATA_BITS],
    /// Rows of `H^T = [I ; P^T]`, 12 bits each
    h_t: [u16; CODE_BITS],
}

impl Default for CodeDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeDefinition {
    /// Build the matrices from [`P_MATRIX`]
    pub const fn new() -> Self {
        let mut p = [0u16; DATA_BITS];
        let mut g = [0u32; DATA_BITS];
        let mut h_t = [0u16; CODE_BITS];

        let mut i = 0;
        while i < DATA_BITS {
            let mut row = 0u16;
            let mut col = 0u16;
            let mut j = 0;
            while j < DATA_BITS {
                row = (row << 1) | P_MATRIX[i][j] as u16;
                // Column i of P becomes row 12 + i of H^T
                col = (col << 1) | P_MATRIX[j][i] as u16;
                j += 1;
            }
            let unit = unit_vector(i);

            p[i] = row;
            g[i] = ((row as u32) << DATA_BITS) | unit as u32;
            h_t[i] = unit;
            h_t[DATA_BITS + i] = col;
            i += 1;
        }

        Self { p, g, h_t }
    }

    /// The shared compile-time instance
    pub fn standard() -> &'static CodeDefinition {
        &GOLAY_24_12
    }

    /// Row `i` of `P`
    pub fn p_row(&self, i: usize) -> u16 {
        self.p[i]
    }

    /// Row `i` of `G`
    pub fn g_row(&self, i: usize) -> u32 {
        self.g[i]
    }

    /// Row `i` of `H^T`
    pub fn h_t_row(&self, i: usize) -> u16 {
        self.h_t[i]
    }

    /// Entry `(i, j)` of `P`
    pub fn p(&self, i: usize, j: usize) -> bool {
        (self.p[i] >> (DATA_BITS - 1 - j)) & 1 == 1
    }

    /// Entry `(i, j)` of `G`
    pub fn g(&self, i: usize, j: usize) -> bool {
        (self.g[i] >> (CODE_BITS - 1 - j)) & 1 == 1
    }

    /// Entry `(i, j)` of `H^T`
    pub fn h_t(&self, i: usize, j: usize) -> bool {
        (self.h_t[i] >> (DATA_BITS - 1 - j)) & 1 == 1
    }

    /// Codeword `u * G` for a 12-bit data word
    pub fn encode(&self, u: u16) -> u32 {
        accumulate_rows(u32::from(u & MASK_12), &self.g, DATA_BITS) as u32
    }

    /// Syndrome `r * H^T` of a 24-bit received word
    pub fn syndrome(&self, r: u32) -> u16 {
        accumulate_rows(r & 0x00FF_FFFF, &self.h_t, CODE_BITS) as u16
    }

    /// Product `v * P` of a 12-bit row vector with `P`
    pub fn mul_p(&self, v: u16) -> u16 {
        accumulate_rows(u32::from(v & MASK_12), &self.p, DATA_BITS) as u16
    }

    /// Whether `G * H^T = 0`, `P` is symmetric and `P * P = I`.
    ///
    /// The decoder relies on all three.
    pub fn is_self_dual(&self) -> bool {
        let orthogonal = (0..DATA_BITS).all(|i| self.syndrome(self.g[i]) == 0);
        let symmetric = (0..DATA_BITS).all(|i| (0..DATA_BITS).all(|j| self.p(i, j) == self.p(j, i)));
        let involution = (0..DATA_BITS).all(|i| self.mul_p(self.p[i]) == unit_vector(i));
        orthogonal && symmetric && involution
    }

    /// Minimum Hamming weight over all nonzero codewords
    pub fn minimum_distance(&self) -> u32 {
        (1u16..1 << DATA_BITS)
            .map(|u| weight(self.encode(u)))
            .min()
            .unwrap_or(0)
    }
}

/// 12-bit vector with a single 1 at element `i`
pub const fn unit_vector(i: usize) -> u16 {
    1 << (DATA_BITS - 1 - i)
}

/// XOR of the rows selected by the set bits of `v`, a `width`-bit row vector
fn accumulate_rows<T>(v: u32, rows: &[T], width: usize) -> u64
where
    T: Copy + Into<u64>,
{
    rows.iter()
        .take(width)
        .enumerate()
        .filter(|(l, _)| (v >> (width - 1 - l)) & 1 == 1)
        .fold(0u64, |acc, (_, &row)| acc ^ row.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_layout() {
        let code = CodeDefinition::standard();
        for i in 0..DATA_BITS {
            for j in 0..DATA_BITS {
                assert_eq!(code.g(i, j), code.p(i, j));
                assert_eq!(code.g(i, DATA_BITS + j), i == j);
            }
        }
    }

    #[test]
    fn test_parity_check_layout() {
        let code = CodeDefinition::standard();
        for i in 0..DATA_BITS {
            for j in 0..DATA_BITS {
                assert_eq!(code.h_t(i, j), i == j);
                assert_eq!(code.h_t(DATA_BITS + i, j), code.p(j, i));
            }
        }
    }

    #[test]
    fn test_matrix_rows_match_constant() {
        let code = CodeDefinition::standard();
        assert_eq!(code.p_row(0), 0b1000_1110_1101);
        assert_eq!(code.p_row(11), 0b1111_1111_1110);
        assert_eq!(code.g_row(11), 0b1111_1111_1110_0000_0000_0001);
        assert_eq!(code.h_t_row(0), 0b1000_0000_0000);
        assert_eq!(code.h_t_row(23), code.p_row(11));
    }

    #[test]
    fn test_code_is_self_dual() {
        assert!(GOLAY_24_12.is_self_dual());
        assert_eq!(CodeDefinition::new(), GOLAY_24_12);
        assert_eq!(CodeDefinition::default(), GOLAY_24_12);
    }

    #[test]
    fn test_every_codeword_has_zero_syndrome() {
        let code = CodeDefinition::standard();
        for u in 0u16..1 << DATA_BITS {
            let c = code.encode(u);
            assert_eq!(code.syndrome(c), 0, "nonzero syndrome for data {u:03x}");
            // Message half of the codeword carries the data verbatim
            assert_eq!((c & 0xFFF) as u16, u);
        }
    }

    #[test]
    fn test_minimum_distance_is_eight() {
        assert_eq!(CodeDefinition::standard().minimum_distance(), 8);
    }

    #[test]
    fn test_encode_unit_data_word() {
        let code = CodeDefinition::standard();
        // u = 000000000001 selects the last row of G
        assert_eq!(code.encode(0x001), 0xFFE001);
    }

    #[test]
    fn test_single_bit_syndromes() {
        let code = CodeDefinition::standard();
        for i in 0..CODE_BITS {
            let e = 1u32 << (CODE_BITS - 1 - i);
            assert_eq!(code.syndrome(e), code.h_t_row(i));
        }
    }

    #[test]
    fn test_unit_vector() {
        assert_eq!(unit_vector(0), 0x800);
        assert_eq!(unit_vector(11), 0x001);
    }
}
