//! Supported QR versions and their fixed codeword capacities.

use crate::error::{QrError, Result};

/// Largest payload, in bytes, that fits version 5 in byte mode.
///
/// 4 mode bits + 8 count bits + 8 bits per byte + 4 terminator bits must fit
/// in 108 data codewords.
pub const MAX_PAYLOAD_LEN: usize = 106;

/// Codeword budget of a version: data codewords and EC codewords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capacity {
    pub data: usize,
    pub ec: usize,
}

impl Capacity {
    /// Total codewords placed in the matrix.
    pub fn total(self) -> usize {
        self.data + self.ec
    }
}

/// QR version. Determines the symbol size: `4 * version + 17` modules per side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    V1,
    V2,
    V3,
    V4,
    V5,
}

impl Version {
    pub const ALL: [Version; 5] = [
        Version::V1,
        Version::V2,
        Version::V3,
        Version::V4,
        Version::V5,
    ];

    /// Pick the smallest version for a payload of `len` bytes.
    ///
    /// The breakpoints are fixed (17/32/53/78) rather than derived from the
    /// capacity table.
    pub fn for_payload_len(len: usize) -> Result<Self> {
        if len > MAX_PAYLOAD_LEN {
            return Err(QrError::CapacityExceeded {
                len,
                max: MAX_PAYLOAD_LEN,
            });
        }
        let version = match len {
            0..=17 => Version::V1,
            18..=32 => Version::V2,
            33..=53 => Version::V3,
            54..=78 => Version::V4,
            _ => Version::V5,
        };
        Ok(version)
    }

    /// Version number, 1 to 5.
    pub fn number(self) -> u8 {
        match self {
            Version::V1 => 1,
            Version::V2 => 2,
            Version::V3 => 3,
            Version::V4 => 4,
            Version::V5 => 5,
        }
    }

    /// Modules per side.
    pub fn size(self) -> usize {
        4 * self.number() as usize + 17
    }

    /// Data and EC codeword counts. Independent of the EC level.
    pub fn capacity(self) -> Capacity {
        let (data, ec) = match self {
            Version::V1 => (19, 7),
            Version::V2 => (34, 10),
            Version::V3 => (55, 15),
            Version::V4 => (80, 20),
            Version::V5 => (108, 26),
        };
        Capacity { data, ec }
    }

    /// (row, col) of the always-dark module.
    pub fn dark_module(self) -> (usize, usize) {
        (4 * self.number() as usize + 9, 8)
    }
}
