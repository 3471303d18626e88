//! Data masking and mask selection.
//!
//! ```text
//! Mask 0: (row + col) % 2 == 0        Mask 4: (row/2 + col/3) % 2 == 0
//! Mask 1: row % 2 == 0                Mask 5: (row*col)%2 + (row*col)%3 == 0
//! Mask 2: col % 3 == 0                Mask 6: ((row*col)%2 + (row*col)%3) % 2 == 0
//! Mask 3: (row + col) % 3 == 0        Mask 7: ((row+col)%2 + (row*col)%3) % 2 == 0
//! ```
//!
//! Candidates are scored by the run-length rule only: every horizontal or
//! vertical run of 5 or more same-colored modules costs `length - 2`.

use log::{debug, trace};

use crate::format::ErrorCorrectionLevel;
use crate::matrix::MatrixBuilder;

/// Shortest run that is penalized.
const MIN_PENALIZED_RUN: usize = 5;

/// One of the eight data mask patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaskPattern {
    Checkerboard = 0,
    HorizontalLines = 1,
    VerticalLines = 2,
    DiagonalLines = 3,
    LargeCheckerboard = 4,
    Fields = 5,
    Diamonds = 6,
    Meadow = 7,
}

impl MaskPattern {
    /// All patterns in id order.
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Checkerboard,
        MaskPattern::HorizontalLines,
        MaskPattern::VerticalLines,
        MaskPattern::DiagonalLines,
        MaskPattern::LargeCheckerboard,
        MaskPattern::Fields,
        MaskPattern::Diamonds,
        MaskPattern::Meadow,
    ];

    /// Pattern id, 0 to 7.
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Whether this pattern inverts the module at (row, col).
    pub fn flips(self, row: usize, col: usize) -> bool {
        let (i, j) = (row, col);
        match self {
            MaskPattern::Checkerboard => (i + j).is_multiple_of(2),
            MaskPattern::HorizontalLines => i.is_multiple_of(2),
            MaskPattern::VerticalLines => j.is_multiple_of(3),
            MaskPattern::DiagonalLines => (i + j).is_multiple_of(3),
            MaskPattern::LargeCheckerboard => (i / 2 + j / 3).is_multiple_of(2),
            MaskPattern::Fields => (i * j) % 2 + (i * j) % 3 == 0,
            MaskPattern::Diamonds => ((i * j) % 2 + (i * j) % 3).is_multiple_of(2),
            MaskPattern::Meadow => ((i + j) % 2 + (i * j) % 3).is_multiple_of(2),
        }
    }
}

/// Invert every unreserved module selected by `mask`.
///
/// XOR semantics: applying the same mask twice restores the grid.
pub(crate) fn apply_mask(modules: &mut [Vec<bool>], reserved: &[Vec<bool>], mask: MaskPattern) {
    for (row, (cells, fixed)) in modules.iter_mut().zip(reserved).enumerate() {
        for (col, (module, &is_reserved)) in cells.iter_mut().zip(fixed).enumerate() {
            if !is_reserved && mask.flips(row, col) {
                *module = !*module;
            }
        }
    }
}

/// Penalty for one line of modules: `length - 2` per run of 5 or more.
pub fn run_penalty(line: impl IntoIterator<Item = bool>) -> u32 {
    let mut penalty = 0u32;
    let mut run_color = None;
    let mut run_len = 0usize;

    for module in line {
        if run_color == Some(module) {
            run_len += 1;
            continue;
        }
        if run_len >= MIN_PENALIZED_RUN {
            penalty += (run_len - 2) as u32;
        }
        run_color = Some(module);
        run_len = 1;
    }

    if run_len >= MIN_PENALIZED_RUN {
        penalty += (run_len - 2) as u32;
    }

    penalty
}

/// Run-length penalty summed over every row and every column.
pub fn penalty(modules: &[Vec<bool>]) -> u32 {
    let size = modules.len();
    let rows: u32 = modules.iter().map(|row| run_penalty(row.iter().copied())).sum();
    let cols: u32 = (0..size)
        .map(|col| run_penalty(modules.iter().map(|row| row[col])))
        .sum();
    rows + cols
}

/// Try every mask on a scratch copy, apply the cheapest one to `builder`
/// and record it in the format information.
///
/// Ties go to the lowest mask id.
pub(crate) fn select_mask(builder: &mut MatrixBuilder, level: ErrorCorrectionLevel) -> MaskPattern {
    let mut best_mask = MaskPattern::Checkerboard;
    let mut best_penalty = u32::MAX;

    for mask in MaskPattern::ALL {
        let mut scratch = builder.modules().to_vec();
        apply_mask(&mut scratch, builder.reserved(), mask);
        let score = penalty(&scratch);
        trace!("mask {} penalty {}", mask.id(), score);

        if score < best_penalty {
            best_penalty = score;
            best_mask = mask;
        }
    }

    debug!("selected mask {} (penalty {})", best_mask.id(), best_penalty);
    builder.apply_mask(best_mask);
    builder.place_format_info(level, best_mask);
    best_mask
}
