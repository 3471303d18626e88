//! GF(2^8) arithmetic for Reed-Solomon encoding.
//!
//! Elements are polynomials over GF(2) reduced modulo the primitive
//! polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D), with alpha = 2.
//!
//! - Addition: XOR
//! - Multiplication: `exp(log(a) + log(b) mod 255)`
//!
//! Both tables are computed at compile time and shared read-only by every
//! encode, so concurrent use needs no synchronization.

use crate::error::{QrError, Result};

/// Primitive polynomial used to reduce products.
const PRIMITIVE: u16 = 0x11D;

/// Antilogarithm table (exponent -> value). `EXP[255]` aliases `EXP[0]`.
pub(crate) const EXP: [u8; 256] = generate_exp_table();

/// Logarithm table (value -> exponent). `LOG[0]` is unused.
pub(crate) const LOG: [u8; 256] = generate_log_table();

const fn generate_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x = 1u16;

    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        x <<= 1;
        if x >= 256 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }

    table[255] = table[0];
    table
}

const fn generate_log_table() -> [u8; 256] {
    let exp = generate_exp_table();
    let mut table = [0u8; 256];

    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }

    table
}

/// alpha^n.
pub fn exp(n: u8) -> u8 {
    EXP[n as usize]
}

/// Multiply two field elements.
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let log_sum = (LOG[a as usize] as u16 + LOG[b as usize] as u16) % 255;
    EXP[log_sum as usize]
}

/// Divide `a` by `b`.
///
/// Fails with [`QrError::DivisionByZero`] when `b` is zero, whatever `a` is.
pub fn div(a: u8, b: u8) -> Result<u8> {
    if b == 0 {
        return Err(QrError::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    let log_a = LOG[a as usize] as u16;
    let log_b = LOG[b as usize] as u16;
    Ok(EXP[((log_a + 255 - log_b) % 255) as usize])
}
