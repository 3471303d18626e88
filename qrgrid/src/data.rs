//! Byte-mode data encoding.
//!
//! ```text
//! [Mode 0100 (4 bits)] [Count (8 bits)] [Data (8 bits/byte)]
//! [Terminator 0000] [Zero bits to byte boundary] [Pad bytes]
//! ```

use crate::version::Version;

/// Mode indicator for byte mode.
const BYTE_MODE: u32 = 0b0100;

/// Alternating pad codewords appended after the terminator.
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Bit buffer for accumulating bits before converting to bytes.
#[derive(Debug, Default)]
pub(crate) struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append the low `count` bits of `value`, MSB first.
    pub(crate) fn append_bits(&mut self, value: u32, count: usize) {
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.bits.len()
    }

    /// Pack into bytes MSB-first. A trailing partial byte is zero-filled.
    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .filter(|&(_, &bit)| bit)
                    .fold(0u8, |byte, (i, _)| byte | (1 << (7 - i)))
            })
            .collect()
    }
}

/// Encode `payload` into exactly `version.capacity().data` codewords.
///
/// The payload length must already have been checked against the version
/// (see [`Version::for_payload_len`]); the count field holds its low 8 bits.
pub(crate) fn encode_data(payload: &[u8], version: Version) -> Vec<u8> {
    let capacity = version.capacity().data;
    let mut bits = BitBuffer::new();

    bits.append_bits(BYTE_MODE, 4);
    bits.append_bits(payload.len() as u32 & 0xFF, 8);
    for &byte in payload {
        bits.append_bits(byte as u32, 8);
    }

    // Terminator
    bits.append_bits(0, 4);

    while !bits.len().is_multiple_of(8) {
        bits.append_bits(0, 1);
    }

    let mut codewords = bits.to_bytes();
    let mut pad_toggle = false;
    while codewords.len() < capacity {
        codewords.push(PAD_BYTES[pad_toggle as usize]);
        pad_toggle = !pad_toggle;
    }
    codewords.truncate(capacity);

    codewords
}
