//! Modular arithmetic over [BigUint].
//!
//! Every helper returns the canonical representative in `[0, m - 1]`. Operands are reduced
//! before use, so callers may pass values that exceed the modulus.

use num_bigint::BigUint;
use num_traits::Zero;

/// Computes `(a + b) mod m`.
pub fn add(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// Computes `(a - b) mod m`.
pub fn sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    let b = b % m;
    if a >= b {
        a - b
    } else {
        m - b + a
    }
}

/// Computes `(a * b) mod m`.
pub fn mul(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// Computes `-a mod m`.
pub fn neg(a: &BigUint, m: &BigUint) -> BigUint {
    sub(&BigUint::zero(), a, m)
}

/// Computes `a^-1 mod m` for a prime modulus `m` using Fermat's little theorem.
///
/// Zero has no inverse and maps to zero; callers must rule it out beforehand.
pub fn invert(a: &BigUint, m: &BigUint) -> BigUint {
    a.modpow(&(m - 2u32), m)
}
