//! Scalars modulo the group order `n`.

use super::curve::curve;
use crate::Error;
use num_bigint::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use tracing::{trace, warn};
use zeroize::Zeroizing;

/// Length of a serialized scalar (or field element) in bytes.
pub const SCALAR_LENGTH: usize = 32;

/// Returns `true` if `k` lies in `[1, n - 1]`.
pub fn is_valid(k: &BigUint) -> bool {
    !k.is_zero() && k < &curve().n
}

/// Draws a uniformly random scalar in `[1, n - 1]` by rejection sampling.
///
/// Fails with [Error::EntropyUnavailable] if `rng` reports an error and with
/// [Error::EntropyExhausted] if `max_attempts` consecutive samples fall outside the range
/// (which, for a working source, happens with probability below `2^-128` per sample).
pub fn random<R: RngCore + CryptoRng>(
    rng: &mut R,
    max_attempts: usize,
) -> Result<BigUint, Error> {
    let mut buf = Zeroizing::new([0u8; SCALAR_LENGTH]);
    for attempt in 0..max_attempts {
        rng.try_fill_bytes(&mut buf[..])?;
        let k = BigUint::from_bytes_be(&buf[..]);
        if is_valid(&k) {
            return Ok(k);
        }
        trace!(attempt, "rejected out-of-range scalar sample");
    }
    warn!(max_attempts, "exhausted attempts to sample scalar");
    Err(Error::EntropyExhausted(max_attempts))
}

/// Serializes `value` as a big-endian, zero-left-padded 32-byte array.
///
/// Returns `None` if `value` does not fit in 256 bits.
pub fn to_bytes(value: &BigUint) -> Option<[u8; SCALAR_LENGTH]> {
    let bytes = value.to_bytes_be();
    if bytes.len() > SCALAR_LENGTH {
        return None;
    }
    let mut out = [0u8; SCALAR_LENGTH];
    out[SCALAR_LENGTH - bytes.len()..].copy_from_slice(&bytes);
    Some(out)
}
