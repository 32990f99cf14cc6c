//! Fixed-width hexadecimal encoding.
//!
//! Public keys (`X || Y`) and signatures (`r || s`) are pairs of 256-bit unsigned integers. Each
//! half is written as 64 zero-left-padded hex digits, most significant digit first, for a total
//! of [PAIR_HEX_LENGTH] characters. Encoding produces lowercase; decoding accepts either case
//! and rejects any input of the wrong length or containing a non-hex character.

use super::scalar::SCALAR_LENGTH;
use crate::Error;
use std::fmt::Write as _;

/// Number of hex characters encoding a single 256-bit integer.
pub const SCALAR_HEX_LENGTH: usize = SCALAR_LENGTH * 2;

/// Number of hex characters encoding a pair of 256-bit integers.
pub const PAIR_HEX_LENGTH: usize = SCALAR_HEX_LENGTH * 2;

/// Encodes bytes as lowercase hex.
pub fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Decodes exactly `2 * N` hex characters into `N` bytes.
pub fn decode<const N: usize>(hex: &str) -> Result<[u8; N], Error> {
    if hex.len() != 2 * N {
        return Err(Error::InvalidLength {
            expected: 2 * N,
            actual: hex.len(),
        });
    }
    // Rejecting non-hex characters first also rules out multi-byte characters, so byte
    // offsets below are character offsets.
    if let Some((index, character)) = hex.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(Error::InvalidHexCharacter { character, index });
    }

    let mut out = [0u8; N];
    for (byte, pair) in out.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
        *byte = (nibble(pair[0]) << 4) | nibble(pair[1]);
    }
    Ok(out)
}

/// Decodes a [PAIR_HEX_LENGTH]-character string into its two 32-byte halves.
pub fn decode_pair(hex: &str) -> Result<([u8; SCALAR_LENGTH], [u8; SCALAR_LENGTH]), Error> {
    let raw: [u8; SCALAR_LENGTH * 2] = decode(hex)?;
    let mut first = [0u8; SCALAR_LENGTH];
    let mut second = [0u8; SCALAR_LENGTH];
    first.copy_from_slice(&raw[..SCALAR_LENGTH]);
    second.copy_from_slice(&raw[SCALAR_LENGTH..]);
    Ok((first, second))
}

// Caller guarantees `c` is an ASCII hex digit.
fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => c - b'A' + 10,
    }
}
