//! Reed-Solomon error correction over GF(2^8).
//!
//! ```text
//! Generator polynomial: g(x) = (x - a^0)(x - a^1)...(x - a^(n-1))
//! EC = Data(x) * x^n mod g(x)
//! ```
//!
//! Symbols in this crate are a single block, so no interleaving happens.

use log::trace;

use crate::gf256;
use crate::version::Version;

/// Build the generator polynomial of the given degree.
///
/// Coefficients are stored in decreasing degree order; index 0 is the
/// leading coefficient, always 1.
pub(crate) fn generator(degree: usize) -> Vec<u8> {
    let mut result = vec![1u8];

    for i in 0..degree {
        let root = gf256::exp(i as u8);
        let mut next = vec![0u8; result.len() + 1];

        for (j, &coef) in result.iter().enumerate() {
            next[j] ^= coef;
            next[j + 1] ^= gf256::mul(coef, root);
        }

        result = next;
    }

    result
}

/// Remainder of `data(x) * x^n` divided by the monic `generator` of degree n.
pub(crate) fn remainder(data: &[u8], generator: &[u8]) -> Vec<u8> {
    let degree = generator.len() - 1;
    let mut remainder = vec![0u8; degree];

    for &byte in data {
        let factor = byte ^ remainder.first().copied().unwrap_or(0);
        remainder.rotate_left(1);
        if let Some(last) = remainder.last_mut() {
            *last = 0;
        }

        for (slot, &coef) in remainder.iter_mut().zip(&generator[1..]) {
            *slot ^= gf256::mul(coef, factor);
        }
    }

    remainder
}

/// Append the version's EC codewords to `data`.
pub(crate) fn add_error_correction(data: &[u8], version: Version) -> Vec<u8> {
    let capacity = version.capacity();
    let ec = remainder(data, &generator(capacity.ec));
    trace!("ec codewords: {:02x?}", ec);

    let mut codewords = Vec::with_capacity(capacity.total());
    codewords.extend_from_slice(data);
    codewords.extend_from_slice(&ec);
    codewords
}
