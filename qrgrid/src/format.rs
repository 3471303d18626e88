//! Format information: EC level + mask pattern, BCH(15,5) protected.
//!
//! ```text
//! 15-bit format info = [EC level (2 bits)][Mask (3 bits)][BCH EC (10 bits)]
//! XOR'd with 0b101010000010010 to ensure non-zero.
//! ```

use crate::mask::MaskPattern;

/// BCH generator polynomial: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1.
const GENERATOR: u16 = 0b101_0011_0111;

/// XOR mask applied to the whole 15-bit field.
const FORMAT_MASK: u16 = 0b101_0100_0001_0010;

/// Number of bits in the format field.
pub(crate) const FORMAT_LEN: usize = 15;

/// QR Code error correction levels.
///
/// In this crate the level is recorded in the format information only; the
/// number of EC codewords is fixed per version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ErrorCorrectionLevel {
    /// Low
    L = 0,
    /// Medium
    #[default]
    M = 1,
    /// Quartile
    Q = 2,
    /// High
    H = 3,
}

impl ErrorCorrectionLevel {
    pub const ALL: [ErrorCorrectionLevel; 4] = [
        ErrorCorrectionLevel::L,
        ErrorCorrectionLevel::M,
        ErrorCorrectionLevel::Q,
        ErrorCorrectionLevel::H,
    ];

    /// Two-bit indicator written into the format field.
    ///
    /// L = 01, M = 00, Q = 11, H = 10. This differs from the enum ordering.
    pub(crate) fn format_info_bits(self) -> u16 {
        match self {
            ErrorCorrectionLevel::L => 0b01,
            ErrorCorrectionLevel::M => 0b00,
            ErrorCorrectionLevel::Q => 0b11,
            ErrorCorrectionLevel::H => 0b10,
        }
    }

    fn from_format_info_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0b01 => ErrorCorrectionLevel::L,
            0b00 => ErrorCorrectionLevel::M,
            0b11 => ErrorCorrectionLevel::Q,
            _ => ErrorCorrectionLevel::H,
        }
    }
}

/// Remainder of `data << 10` modulo the BCH generator.
fn bch_remainder(data: u16) -> u16 {
    let mut bits = data << 10;
    for i in (0..=4).rev() {
        if (bits >> (i + 10)) & 1 == 1 {
            bits ^= GENERATOR << i;
        }
    }
    bits
}

/// Compute the masked 15-bit format field.
pub fn format_bits(level: ErrorCorrectionLevel, mask: MaskPattern) -> u16 {
    let data = (level.format_info_bits() << 3) | mask.id() as u16;
    ((data << 10) | bch_remainder(data)) ^ FORMAT_MASK
}

/// Recover (level, mask) from a possibly corrupted 15-bit field.
///
/// Returns the pair whose codeword is nearest in Hamming distance, as long as
/// it is within the 3 errors BCH(15,5) can correct.
pub fn decode_format_bits(bits: u16) -> Option<(ErrorCorrectionLevel, MaskPattern)> {
    let (distance, data) = (0u16..32)
        .map(|data| {
            let codeword = ((data << 10) | bch_remainder(data)) ^ FORMAT_MASK;
            ((codeword ^ bits).count_ones(), data)
        })
        .min_by_key(|&(distance, _)| distance)?;

    if distance > 3 {
        return None;
    }
    let level = ErrorCorrectionLevel::from_format_info_bits(data >> 3);
    let mask = MaskPattern::from_id((data & 0b111) as u8)?;
    Some((level, mask))
}

/// Cells of the primary copy, indexed by format bit (bit 0 = LSB).
///
/// Bits 0-5 run along row 8, bits 6-8 turn the corner around (8, 8) and
/// bits 9-14 climb column 8.
pub(crate) fn primary_positions() -> [(usize, usize); FORMAT_LEN] {
    let mut positions = [(0, 0); FORMAT_LEN];
    for (i, pos) in positions.iter_mut().enumerate() {
        *pos = match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        };
    }
    positions
}

/// Cells of the mirror copy for a symbol of side `size`.
///
/// Bits 0-7 descend column 8 from the bottom edge, bits 8-14 run along row 8
/// to the right edge.
pub(crate) fn mirror_positions(size: usize) -> [(usize, usize); FORMAT_LEN] {
    let mut positions = [(0, 0); FORMAT_LEN];
    for (i, pos) in positions.iter_mut().enumerate() {
        *pos = if i < 8 {
            (size - 1 - i, 8)
        } else {
            (8, size - FORMAT_LEN + i)
        };
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ec_level_format_info_bits() {
        assert_eq!(ErrorCorrectionLevel::L.format_info_bits(), 0b01);
        assert_eq!(ErrorCorrectionLevel::M.format_info_bits(), 0b00);
        assert_eq!(ErrorCorrectionLevel::Q.format_info_bits(), 0b11);
        assert_eq!(ErrorCorrectionLevel::H.format_info_bits(), 0b10);
    }

    /// Values from the standard's format information table.
    #[test]
    fn format_bits_known_values() {
        use ErrorCorrectionLevel::*;
        let cases = [
            (M, 0, 0b101010000010010),
            (M, 1, 0b101000100100101),
            (M, 2, 0b101111001111100),
            (L, 0, 0b111011111000100),
            (L, 1, 0b111001011110011),
            (H, 0, 0b001011010001001),
            (H, 1, 0b001001110111110),
            (Q, 0, 0b011010101011111),
            (Q, 1, 0b011000001101000),
        ];

        for (level, mask, expected) in cases {
            let mask = MaskPattern::from_id(mask).unwrap();
            let result = format_bits(level, mask);
            assert_eq!(
                result, expected,
                "Format bits mismatch for {:?}/{:?}: got {:#017b}, expected {:#017b}",
                level, mask, result, expected
            );
        }
    }

    #[test]
    fn round_trip_all_pairs() {
        for level in ErrorCorrectionLevel::ALL {
            for mask in MaskPattern::ALL {
                let bits = format_bits(level, mask);
                assert!(bits < 1 << 15);
                assert_eq!(decode_format_bits(bits), Some((level, mask)));
            }
        }
    }

    #[test]
    fn corrects_up_to_three_flipped_bits() {
        let bits = format_bits(ErrorCorrectionLevel::Q, MaskPattern::Diamonds);
        let damaged = bits ^ 0b100_0000_0100_0001;
        assert_eq!(
            decode_format_bits(damaged),
            Some((ErrorCorrectionLevel::Q, MaskPattern::Diamonds))
        );
    }

    #[test]
    fn positions_do_not_overlap() {
        let size = 21;
        let mut cells: Vec<(usize, usize)> = primary_positions().to_vec();
        cells.extend(mirror_positions(size));
        let count = cells.len();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), count);
        assert!(cells.iter().all(|&(r, c)| r < size && c < size));
    }

    #[test]
    fn mirror_layout() {
        let mirror = mirror_positions(21);
        assert_eq!(mirror[0], (20, 8));
        assert_eq!(mirror[7], (13, 8));
        assert_eq!(mirror[8], (8, 14));
        assert_eq!(mirror[14], (8, 20));
    }

    #[test]
    fn primary_layout() {
        let primary = primary_positions();
        assert_eq!(primary[5], (8, 5));
        assert_eq!(primary[6], (8, 7));
        assert_eq!(primary[8], (7, 8));
        assert_eq!(primary[9], (5, 8));
        assert_eq!(primary[14], (0, 8));
    }
}
