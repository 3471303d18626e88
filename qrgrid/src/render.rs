//! Terminal rendering.
//!
//! Uses Unicode half-block characters to display 2 module rows per line:
//! - Upper half block for top dark, bottom light
//! - Lower half block for top light, bottom dark
//! - Full block for both dark
//! - Space for both light

#[cfg(feature = "external-backend")]
use crate::error::{QrError, Result};
#[cfg(feature = "external-backend")]
use crate::format::ErrorCorrectionLevel;

const FULL_BLOCK: char = '\u{2588}';
const UPPER_HALF: char = '\u{2580}';
const LOWER_HALF: char = '\u{2584}';

/// Render a `size` x `size` grid, two rows per line, surrounded by a light
/// border `border` modules wide.
///
/// `is_dark(row, col)` is only called for coordinates inside the grid.
pub fn render_half_blocks(
    size: usize,
    border: usize,
    is_dark: impl Fn(usize, usize) -> bool,
) -> String {
    let total = size + 2 * border;
    let module = |row: usize, col: usize| {
        let inside =
            (border..size + border).contains(&row) && (border..size + border).contains(&col);
        inside && is_dark(row - border, col - border)
    };

    let mut result = String::with_capacity(total.div_ceil(2) * (total * 3 + 1));
    for row in (0..total).step_by(2) {
        for col in 0..total {
            let ch = match (module(row, col), module(row + 1, col)) {
                (true, true) => FULL_BLOCK,
                (true, false) => UPPER_HALF,
                (false, true) => LOWER_HALF,
                (false, false) => ' ',
            };
            result.push(ch);
        }
        result.push('\n');
    }

    result
}

/// Render one row per line, two full blocks per dark module.
pub fn render_full_blocks(
    size: usize,
    border: usize,
    is_dark: impl Fn(usize, usize) -> bool,
) -> String {
    let total = size + 2 * border;
    let mut result = String::new();

    for row in 0..total {
        for col in 0..total {
            let inside =
                (border..size + border).contains(&row) && (border..size + border).contains(&col);
            if inside && is_dark(row - border, col - border) {
                result.push(FULL_BLOCK);
                result.push(FULL_BLOCK);
            } else {
                result.push_str("  ");
            }
        }
        result.push('\n');
    }

    result
}

/// Encode with the `qrcode` crate instead of this crate's encoder and render
/// the result with the same half-block renderer.
#[cfg(feature = "external-backend")]
pub fn render_external(
    payload: &[u8],
    level: ErrorCorrectionLevel,
    border: usize,
) -> Result<String> {
    let ec_level = match level {
        ErrorCorrectionLevel::L => qrcode::EcLevel::L,
        ErrorCorrectionLevel::M => qrcode::EcLevel::M,
        ErrorCorrectionLevel::Q => qrcode::EcLevel::Q,
        ErrorCorrectionLevel::H => qrcode::EcLevel::H,
    };
    let code = qrcode::QrCode::with_error_correction_level(payload, ec_level)
        .map_err(|e| QrError::Backend(e.to_string()))?;

    Ok(render_half_blocks(code.width(), border, |row, col| {
        code[(col, row)] != qrcode::Color::Light
    }))
}
