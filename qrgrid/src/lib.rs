//! # qrgrid
//!
//! A minimal QR module grid encoder for byte payloads up to 106 bytes
//! (versions 1 to 5), with half-block terminal rendering.
//!
//! ## Library Organization
//!
//! ```text
//! lib.rs
//! +-- QrCode::encode()            Entry point: bytes -> module grid
//! +-- QrCode::to_ascii_compact()  Half-block terminal rendering
//! |
//! +-- version.rs   Version enum, fixed capacity table, payload breakpoints
//! +-- data.rs      BitBuffer, byte-mode bitstream + padding
//! +-- gf256.rs     GF(2^8) log/exp tables, mul/div
//! +-- ec.rs        Reed-Solomon generator + remainder
//! +-- format.rs    EC level, BCH(15,5) format info, bit coordinates
//! +-- matrix.rs    MatrixBuilder: function patterns, format cells, zigzag
//! +-- mask.rs      Mask patterns, run-length penalty, mask selection
//! +-- render.rs    Half-block / full-block text renderers
//! ```
//!
//! ## Encoding Pipeline
//!
//! ```text
//! payload -> version -> data codewords -> + EC codewords
//!         -> function patterns -> format info (mask 0) -> zigzag data
//!         -> best mask -> format info (chosen mask)
//! ```
//!
//! The number of EC codewords depends on the version only: the requested
//! error correction level is recorded in the format information but does not
//! change the data/EC split. Mask selection scores only runs of 5 or more
//! same-colored modules.
//!
//! ## Example Usage
//!
//! ```
//! use qrgrid::{ErrorCorrectionLevel, QrCode};
//!
//! let qr = QrCode::encode(b"HELLO", ErrorCorrectionLevel::M).unwrap();
//! assert_eq!(qr.size(), 21);
//! print!("{}", qr.to_ascii_compact(2));
//! ```

use log::debug;

mod data;
mod ec;
pub mod error;
pub mod format;
pub mod gf256;
pub mod mask;
mod matrix;
pub mod render;
pub mod version;

pub use error::{QrError, Result};
pub use format::ErrorCorrectionLevel;
pub use mask::MaskPattern;
pub use version::{Capacity, MAX_PAYLOAD_LEN, Version};

use matrix::MatrixBuilder;

/// A finished QR symbol: a square grid of modules, `true` = dark.
///
/// Rows are stored top to bottom, columns left to right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCode {
    modules: Vec<Vec<bool>>,
    version: Version,
    error_correction: ErrorCorrectionLevel,
    mask: MaskPattern,
}

impl QrCode {
    /// Encode `payload` in byte mode.
    ///
    /// Selects the smallest version whose breakpoint covers the payload and
    /// fails with [`QrError::CapacityExceeded`] when it is longer than
    /// [`MAX_PAYLOAD_LEN`].
    pub fn encode(payload: &[u8], ecl: ErrorCorrectionLevel) -> Result<Self> {
        // Step 1: Determine the version
        let version = Version::for_payload_len(payload.len())?;
        debug!(
            "encoding {} bytes as version {} ({:?})",
            payload.len(),
            version.number(),
            ecl
        );

        // Step 2: Encode data into codewords
        let data_codewords = data::encode_data(payload, version);

        // Step 3: Add error correction
        let all_codewords = ec::add_error_correction(&data_codewords, version);
        debug!(
            "{} data + {} ec codewords",
            data_codewords.len(),
            all_codewords.len() - data_codewords.len()
        );

        // Step 4: Function patterns, then format cells with a placeholder mask
        let mut builder = MatrixBuilder::new(version);
        builder.place_function_patterns();
        builder.place_format_info(ecl, MaskPattern::Checkerboard);

        // Step 5: Place data bits
        builder.place_data(&all_codewords);

        // Step 6: Apply best mask and record it
        let mask = mask::select_mask(&mut builder, ecl);

        Ok(builder.finish(ecl, mask))
    }

    pub(crate) fn from_parts(
        version: Version,
        error_correction: ErrorCorrectionLevel,
        mask: MaskPattern,
        modules: Vec<Vec<bool>>,
    ) -> Self {
        Self {
            modules,
            version,
            error_correction,
            mask,
        }
    }

    /// Modules per side: `4 * version + 17`.
    pub fn size(&self) -> usize {
        self.modules.len()
    }

    /// Module at (row, col). true = dark, false = light.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.modules[row][col]
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn error_correction(&self) -> ErrorCorrectionLevel {
        self.error_correction
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.iter().map(Vec::as_slice)
    }

    /// The grid flattened in row-major order.
    pub fn to_bits(&self) -> Vec<bool> {
        self.modules.concat()
    }

    /// Half-block rendering, two module rows per line.
    pub fn to_ascii_compact(&self, border: usize) -> String {
        render::render_half_blocks(self.size(), border, |row, col| self.get(row, col))
    }

    /// Full-block rendering, one module row per line, two characters per module.
    pub fn to_ascii(&self, border: usize) -> String {
        render::render_full_blocks(self.size(), border, |row, col| self.get(row, col))
    }
}
