//! Module placement: function patterns, format information, and data.
//!
//! ```text
//!     Version 1 (21x21)
//!     +-------+---+-------+
//!     |#######| F |#######|
//!     |# ### #| M |# ### #|
//!     |# ### #| T |# ### #|
//!     |#######|   |#######|
//!     +-------+---+-------+
//!     |  T    |   |       |
//!     |  I    | D | DATA  |
//!     |  M    | A |       |
//!     +-------+---+-------+
//!     |#######|   |       |
//!     |# ### #|   |       |
//!     |#######|   |       |
//!     +-------+---+-------+
//! ```
//!
//! [`MatrixBuilder`] owns the module grid together with a parallel
//! `reserved` grid for the duration of an encode. A reserved cell is never
//! written as data and never flipped by a mask.

use log::debug;

use crate::QrCode;
use crate::format::{self, ErrorCorrectionLevel};
use crate::mask::{self, MaskPattern};
use crate::version::Version;

/// Side of a finder pattern.
const FINDER_SIZE: usize = 7;

/// Column holding the vertical timing pattern, skipped by data placement.
const TIMING_COL: usize = 6;

/// Grid under construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MatrixBuilder {
    version: Version,
    /// true = dark
    modules: Vec<Vec<bool>>,
    /// Cells with a structural or format meaning.
    reserved: Vec<Vec<bool>>,
}

impl MatrixBuilder {
    pub(crate) fn new(version: Version) -> Self {
        let size = version.size();
        Self {
            version,
            modules: vec![vec![false; size]; size],
            reserved: vec![vec![false; size]; size],
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.modules.len()
    }

    pub(crate) fn modules(&self) -> &[Vec<bool>] {
        &self.modules
    }

    pub(crate) fn reserved(&self) -> &[Vec<bool>] {
        &self.reserved
    }

    fn set_function_module(&mut self, row: usize, col: usize, dark: bool) {
        self.modules[row][col] = dark;
        self.reserved[row][col] = true;
    }

    /// Place finder patterns, separators, timing patterns and the dark module.
    pub(crate) fn place_function_patterns(&mut self) {
        let size = self.size();

        self.place_finder_pattern(0, 0);
        self.place_finder_pattern(0, size - FINDER_SIZE);
        self.place_finder_pattern(size - FINDER_SIZE, 0);

        self.place_timing_patterns();
        self.place_dark_module();
    }

    /// Place a 7x7 finder pattern with its top-left corner at (row, col),
    /// framed by a one-module light separator.
    ///
    /// ```text
    /// #######
    /// #.....#
    /// #.###.#
    /// #.###.#
    /// #.###.#
    /// #.....#
    /// #######
    /// ```
    fn place_finder_pattern(&mut self, row: usize, col: usize) {
        let size = self.size() as isize;

        for dr in -1..=FINDER_SIZE as isize {
            for dc in -1..=FINDER_SIZE as isize {
                let (r, c) = (row as isize + dr, col as isize + dc);
                if r < 0 || c < 0 || r >= size || c >= size {
                    continue;
                }

                // Separator ring (dr or dc is -1 or 7) stays light.
                let inside = (0..FINDER_SIZE as isize).contains(&dr)
                    && (0..FINDER_SIZE as isize).contains(&dc);
                let is_edge = dr == 0 || dr == 6 || dc == 0 || dc == 6;
                let is_center = (2..=4).contains(&dr) && (2..=4).contains(&dc);
                self.set_function_module(r as usize, c as usize, inside && (is_edge || is_center));
            }
        }
    }

    /// Alternating modules along row 6 and column 6 between the finders.
    fn place_timing_patterns(&mut self) {
        let size = self.size();

        for i in FINDER_SIZE + 1..size - FINDER_SIZE - 1 {
            let dark = i.is_multiple_of(2);
            self.set_function_module(TIMING_COL, i, dark);
            self.set_function_module(i, TIMING_COL, dark);
        }
    }

    fn place_dark_module(&mut self) {
        let (row, col) = self.version.dark_module();
        self.set_function_module(row, col, true);
    }

    /// Write both copies of the format information, reserving their cells.
    ///
    /// The mirror copy's bit 7 shares its cell with the dark module, which is
    /// re-asserted afterwards so it stays dark.
    pub(crate) fn place_format_info(&mut self, level: ErrorCorrectionLevel, mask: MaskPattern) {
        let bits = format::format_bits(level, mask);
        let primary = format::primary_positions();
        let mirror = format::mirror_positions(self.size());

        for i in 0..format::FORMAT_LEN {
            let dark = (bits >> i) & 1 == 1;
            let (row, col) = primary[i];
            self.set_function_module(row, col, dark);
            let (row, col) = mirror[i];
            self.set_function_module(row, col, dark);
        }

        self.place_dark_module();
    }

    /// Place codewords MSB-first along the zigzag path.
    ///
    /// Starts at the bottom-right corner, walks 2-column strips alternately
    /// up and down, and skips the timing column. Modules left over once the
    /// stream is exhausted stay light.
    pub(crate) fn place_data(&mut self, codewords: &[u8]) {
        let size = self.size();
        let total_bits = codewords.len() * 8;
        let mut bit_idx = 0;

        let mut col = size - 1;
        let mut going_up = true;

        while col > 0 {
            if col == TIMING_COL {
                col -= 1;
            }

            for step in 0..size {
                let row = if going_up { size - 1 - step } else { step };
                for c in [col, col - 1] {
                    if self.reserved[row][c] {
                        continue;
                    }
                    self.modules[row][c] = bit_idx < total_bits
                        && (codewords[bit_idx / 8] >> (7 - bit_idx % 8)) & 1 == 1;
                    bit_idx += 1;
                }
            }

            going_up = !going_up;
            col = col.saturating_sub(2);
        }

        debug!("placed {} codeword bits into {} data modules", total_bits, bit_idx);
    }

    pub(crate) fn apply_mask(&mut self, mask: MaskPattern) {
        mask::apply_mask(&mut self.modules, &self.reserved, mask);
    }

    /// Drop the reserved grid and freeze the result.
    pub(crate) fn finish(self, level: ErrorCorrectionLevel, mask: MaskPattern) -> QrCode {
        QrCode::from_parts(self.version, level, mask, self.modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structural(version: Version) -> MatrixBuilder {
        let mut builder = MatrixBuilder::new(version);
        builder.place_function_patterns();
        builder
    }

    #[test]
    fn finder_patterns_and_separators() {
        let builder = structural(Version::V1);
        let size = builder.size();

        for (row, col) in [(0, 0), (0, size - 7), (size - 7, 0)] {
            for dr in 0..7 {
                for dc in 0..7 {
                    let ring = dr == 0 || dr == 6 || dc == 0 || dc == 6;
                    let core = (2..=4).contains(&dr) && (2..=4).contains(&dc);
                    assert_eq!(builder.modules[row + dr][col + dc], ring || core);
                    assert!(builder.reserved[row + dr][col + dc]);
                }
            }
        }

        // Separators: row 7 / column 7 next to the top-left finder.
        for i in 0..8 {
            assert!(!builder.modules[7][i] && builder.reserved[7][i]);
            assert!(!builder.modules[i][7] && builder.reserved[i][7]);
            assert!(!builder.modules[7][size - 1 - i] && builder.reserved[7][size - 1 - i]);
            assert!(!builder.modules[size - 8][i] && builder.reserved[size - 8][i]);
        }

        // Bottom-right corner is free.
        assert!(!builder.reserved[size - 1][size - 1]);
    }

    #[test]
    fn timing_patterns() {
        for version in Version::ALL {
            let builder = structural(version);
            let size = builder.size();
            for i in 8..size - 8 {
                assert_eq!(builder.modules[6][i], i % 2 == 0);
                assert_eq!(builder.modules[i][6], i % 2 == 0);
                assert!(builder.reserved[6][i] && builder.reserved[i][6]);
            }
        }
    }

    #[test]
    fn dark_module() {
        for version in Version::ALL {
            let builder = structural(version);
            let row = 4 * version.number() as usize + 9;
            assert!(builder.modules[row][8]);
            assert!(builder.reserved[row][8]);
        }
    }

    #[test]
    fn function_patterns_are_idempotent() {
        for version in Version::ALL {
            let once = structural(version);
            let mut twice = structural(version);
            twice.place_function_patterns();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn format_info_is_written_twice_and_reserved() {
        let mut builder = structural(Version::V1);
        let level = ErrorCorrectionLevel::L;
        let mask = MaskPattern::Fields;
        builder.place_format_info(level, mask);

        let bits = format::format_bits(level, mask);
        let size = builder.size();
        let dark_module = Version::V1.dark_module();
        for (i, (&p, &m)) in format::primary_positions()
            .iter()
            .zip(&format::mirror_positions(size))
            .enumerate()
        {
            let expected = (bits >> i) & 1 == 1;
            assert_eq!(builder.modules[p.0][p.1], expected, "primary bit {}", i);
            assert!(builder.reserved[p.0][p.1]);
            assert!(builder.reserved[m.0][m.1]);
            if m != dark_module {
                assert_eq!(builder.modules[m.0][m.1], expected, "mirror bit {}", i);
            }
        }
        assert!(builder.modules[dark_module.0][dark_module.1]);
    }

    #[test]
    fn data_fills_unreserved_modules_in_zigzag_order() {
        let mut builder = structural(Version::V1);
        builder.place_format_info(ErrorCorrectionLevel::M, MaskPattern::Checkerboard);
        // 0b1100_0000: first two bits dark.
        builder.place_data(&[0b1100_0000, 0b1000_0000]);

        let size = builder.size();
        // First strip goes up from the bottom-right corner, right column first.
        assert!(builder.modules[size - 1][size - 1]);
        assert!(builder.modules[size - 1][size - 2]);
        assert!(!builder.modules[size - 2][size - 1]);
        // Bit 8 (first bit of the second byte) sits five rows up.
        assert!(builder.modules[size - 5][size - 1]);
        assert!(!builder.modules[size - 5][size - 2]);
    }

    #[test]
    fn modules_past_the_stream_stay_light() {
        let mut builder = structural(Version::V2);
        builder.place_format_info(ErrorCorrectionLevel::M, MaskPattern::Checkerboard);
        let before = builder.clone();
        builder.place_data(&[0xFF, 0xFF]);

        let size = builder.size();
        let mut dark_data = 0;
        for r in 0..size {
            for c in 0..size {
                if before.reserved[r][c] {
                    assert_eq!(builder.modules[r][c], before.modules[r][c]);
                } else if builder.modules[r][c] {
                    dark_data += 1;
                }
            }
        }
        // Only the 16 stream bits are dark; the first strip holds all of them.
        assert_eq!(dark_data, 16);
        for row in size - 8..size {
            assert!(builder.modules[row][size - 1] && builder.modules[row][size - 2]);
        }
    }

    #[test]
    fn mask_ties_go_to_the_lowest_id() {
        let mut builder = structural(Version::V1);
        builder.place_format_info(ErrorCorrectionLevel::M, MaskPattern::Checkerboard);
        // Nothing left for a mask to flip, so every candidate scores the same.
        for row in builder.reserved.iter_mut() {
            row.fill(true);
        }
        let before = builder.modules.clone();

        let chosen = mask::select_mask(&mut builder, ErrorCorrectionLevel::M);
        assert_eq!(chosen, MaskPattern::Checkerboard);
        assert_eq!(builder.modules, before);
    }

    #[test]
    fn data_capacity_covers_codewords() {
        for version in Version::ALL {
            let mut builder = structural(version);
            builder.place_format_info(ErrorCorrectionLevel::M, MaskPattern::Checkerboard);
            let free = builder.reserved.iter().flatten().filter(|&&r| !r).count();
            assert!(free >= version.capacity().total() * 8, "{:?}", version);
        }
    }

    #[test]
    fn data_never_touches_reserved_cells() {
        let mut builder = structural(Version::V2);
        builder.place_format_info(ErrorCorrectionLevel::H, MaskPattern::Meadow);
        let before = builder.clone();
        // More bits than free modules, so every free module ends up dark.
        builder.place_data(&[0xFF; 64]);

        let size = builder.size();
        for r in 0..size {
            for c in 0..size {
                if before.reserved[r][c] {
                    assert_eq!(builder.modules[r][c], before.modules[r][c]);
                } else {
                    assert!(builder.modules[r][c], "({}, {}) should hold a data bit", r, c);
                }
            }
        }
    }
}
