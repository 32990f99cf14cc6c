use super::{
    arithmetic as fn_,
    codec::{self, hex},
    curve::curve,
    point::Point,
    scalar::{self, SCALAR_LENGTH},
};
use crate::{hash_to_int, Error};
use num_bigint::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const PRIVATE_KEY_LENGTH: usize = SCALAR_LENGTH;
const PUBLIC_KEY_LENGTH: usize = 2 * SCALAR_LENGTH; // X || Y
const SIGNATURE_LENGTH: usize = 2 * SCALAR_LENGTH; // R || S

/// Default bound on sampling and signing retries.
pub const DEFAULT_MAX_ATTEMPTS: usize = 64;

/// Configuration for key generation and signing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of draws from the RNG when sampling a scalar, and maximum number of
    /// nonces tried when a signature comes out degenerate (`r = 0` or `s = 0`).
    pub max_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Generates a fresh key pair `(d, Q = d * G)` with `d` drawn uniformly from `[1, n - 1]`.
pub fn keygen<R: RngCore + CryptoRng>(rng: &mut R) -> Result<(PrivateKey, PublicKey), Error> {
    let private_key = PrivateKey::from_rng_with_config(rng, &Config::default())?;
    let public_key = private_key.public.clone();
    Ok((private_key, public_key))
}

/// Secp256k1 Private Key.
///
/// The raw scalar is zeroized on drop and never printed: [Debug] and [Display] render
/// `[REDACTED]`. Use [PrivateKey::to_bytes] or [PrivateKey::to_hex] to export it explicitly.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    raw: [u8; PRIVATE_KEY_LENGTH],
    #[zeroize(skip)]
    public: PublicKey,
}

impl crate::Signer for PrivateKey {
    type Signature = Signature;
    type PublicKey = PublicKey;

    fn public_key(&self) -> Self::PublicKey {
        self.public.clone()
    }

    fn sign<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        msg: &[u8],
    ) -> Result<Self::Signature, Error> {
        self.sign_with_config(&Config::default(), rng, msg)
    }
}

impl crate::PrivateKeyExt for PrivateKey {
    fn from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, Error> {
        Self::from_rng_with_config(rng, &Config::default())
    }
}

impl PrivateKey {
    /// Create a fresh [PrivateKey] using the supplied RNG, retrying at most
    /// `config.max_attempts` times.
    pub fn from_rng_with_config<R: RngCore + CryptoRng>(
        rng: &mut R,
        config: &Config,
    ) -> Result<Self, Error> {
        let d = scalar::random(rng, config.max_attempts)?;
        Self::from_scalar(&d)
    }

    fn from_scalar(d: &BigUint) -> Result<Self, Error> {
        if !scalar::is_valid(d) {
            return Err(Error::InvalidPrivateKey);
        }
        let raw = scalar::to_bytes(d).ok_or(Error::InvalidPrivateKey)?;
        let public = PublicKey::try_from(curve().g.mul(d))?;
        Ok(Self { raw, public })
    }

    fn scalar(&self) -> BigUint {
        BigUint::from_bytes_be(&self.raw)
    }

    /// Big-endian, fixed-width (32 byte) serialization of the private scalar.
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_LENGTH]> {
        Zeroizing::new(self.raw)
    }

    /// 64-character lowercase hex serialization of the private scalar.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex(&self.raw))
    }

    /// Parse a private key from 64 hex characters.
    pub fn from_hex(encoded: &str) -> Result<Self, Error> {
        let raw = Zeroizing::new(codec::decode::<PRIVATE_KEY_LENGTH>(encoded)?);
        Self::try_from(&raw[..])
    }

    /// Sign a message with an explicit [Config].
    ///
    /// Computes `e = SHA-256(msg)` and, for a fresh nonce `k` each attempt, `r = (k * G).x mod n`
    /// and `s = k^-1 * (e + d * r) mod n`. Nonces yielding `r = 0` or `s = 0` are discarded.
    pub fn sign_with_config<R: RngCore + CryptoRng>(
        &self,
        config: &Config,
        rng: &mut R,
        msg: &[u8],
    ) -> Result<Signature, Error> {
        let e = hash_to_int(msg);
        let d = self.scalar();
        for attempt in 0..config.max_attempts {
            let k = scalar::random(rng, config.max_attempts)?;
            match sign_with_nonce(&d, &e, &k) {
                Some(signature) => return Ok(signature),
                None => debug!(attempt, "degenerate nonce, retrying"),
            }
        }
        warn!(
            max_attempts = config.max_attempts,
            "exhausted attempts to produce signature"
        );
        Err(Error::EntropyExhausted(config.max_attempts))
    }
}

/// Computes the signature of the prehashed message `e` under private scalar `d` with nonce `k`.
///
/// Returns `None` if the nonce is degenerate (`r = 0` or `s = 0`).
fn sign_with_nonce(d: &BigUint, e: &BigUint, k: &BigUint) -> Option<Signature> {
    let curve = curve();
    let n = &curve.n;

    let r = curve.g.mul(k).x()? % n;
    if r.is_zero() {
        return None;
    }
    let s = fn_::mul(
        &fn_::invert(k, n),
        &fn_::add(e, &fn_::mul(d, &r, n), n),
        n,
    );
    if s.is_zero() {
        return None;
    }
    Signature::new(r, s).ok()
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != PRIVATE_KEY_LENGTH {
            return Err(Error::InvalidLength {
                expected: PRIVATE_KEY_LENGTH,
                actual: value.len(),
            });
        }
        Self::from_scalar(&BigUint::from_bytes_be(value))
    }
}

impl Eq for PrivateKey {}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl Display for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

/// Secp256k1 Public Key, encoded uncompressed as `X || Y` without a SEC 1 prefix.
#[derive(Clone)]
pub struct PublicKey {
    raw: [u8; PUBLIC_KEY_LENGTH],
    x: BigUint,
    y: BigUint,
}

impl crate::Verifier for PublicKey {
    type Signature = Signature;

    fn verify(&self, msg: &[u8], sig: &Self::Signature) -> bool {
        let curve = curve();
        let n = &curve.n;
        let (r, s) = (&sig.r, &sig.s);
        if !scalar::is_valid(r) || !scalar::is_valid(s) {
            debug!("signature component out of range");
            return false;
        }
        let q = self.point();
        if !q.is_on_curve() {
            debug!("public key not on curve");
            return false;
        }

        let e = hash_to_int(msg);
        let w = fn_::invert(s, n);
        let u1 = fn_::mul(&e, &w, n);
        let u2 = fn_::mul(r, &w, n);
        let point = curve.g.mul(&u1).add(&q.mul(&u2));
        let Some(x) = point.x() else {
            debug!("verification point at infinity");
            return false;
        };
        &(x % n) == r
    }
}

impl PublicKey {
    /// The affine x-coordinate.
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// The affine y-coordinate.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// The public key as a curve point (never [Point::Infinity]).
    pub fn point(&self) -> Point {
        Point::Affine {
            x: self.x.clone(),
            y: self.y.clone(),
        }
    }

    fn from_halves(x: &[u8; SCALAR_LENGTH], y: &[u8; SCALAR_LENGTH]) -> Result<Self, Error> {
        Self::try_from(Point::Affine {
            x: BigUint::from_bytes_be(x),
            y: BigUint::from_bytes_be(y),
        })
    }
}

impl TryFrom<Point> for PublicKey {
    type Error = Error;
    fn try_from(point: Point) -> Result<Self, Self::Error> {
        if !point.is_on_curve() {
            return Err(Error::InvalidPublicKey);
        }
        let Point::Affine { x, y } = point else {
            return Err(Error::InvalidPublicKey);
        };
        let x_bytes = scalar::to_bytes(&x).ok_or(Error::InvalidPublicKey)?;
        let y_bytes = scalar::to_bytes(&y).ok_or(Error::InvalidPublicKey)?;
        let mut raw = [0u8; PUBLIC_KEY_LENGTH];
        raw[..SCALAR_LENGTH].copy_from_slice(&x_bytes);
        raw[SCALAR_LENGTH..].copy_from_slice(&y_bytes);
        Ok(Self { raw, x, y })
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let raw: &[u8; PUBLIC_KEY_LENGTH] =
            value.try_into().map_err(|_| Error::InvalidLength {
                expected: PUBLIC_KEY_LENGTH,
                actual: value.len(),
            })?;
        let mut x = [0u8; SCALAR_LENGTH];
        let mut y = [0u8; SCALAR_LENGTH];
        x.copy_from_slice(&raw[..SCALAR_LENGTH]);
        y.copy_from_slice(&raw[SCALAR_LENGTH..]);
        Self::from_halves(&x, &y)
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    /// Parses the 128-character `X || Y` hex encoding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = codec::decode_pair(s)?;
        Self::from_halves(&x, &y)
    }
}

impl Eq for PublicKey {}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl Ord for PublicKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl PartialOrd for PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

/// Secp256k1 ECDSA Signature `(r, s)`, encoded as `r || s`.
///
/// Any pair of 256-bit integers can be represented; range checks (`1 <= r, s <= n - 1`) are
/// part of verification, which rejects out-of-range components rather than failing to decode.
#[derive(Clone)]
pub struct Signature {
    raw: [u8; SIGNATURE_LENGTH],
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Create a signature from its components.
    ///
    /// Fails with [Error::InvalidScalar] if either component does not fit in 256 bits.
    pub fn new(r: BigUint, s: BigUint) -> Result<Self, Error> {
        let r_bytes = scalar::to_bytes(&r).ok_or(Error::InvalidScalar)?;
        let s_bytes = scalar::to_bytes(&s).ok_or(Error::InvalidScalar)?;
        let mut raw = [0u8; SIGNATURE_LENGTH];
        raw[..SCALAR_LENGTH].copy_from_slice(&r_bytes);
        raw[SCALAR_LENGTH..].copy_from_slice(&s_bytes);
        Ok(Self { raw, r, s })
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Returns `(r, s)` in base 10.
    pub fn to_decimal(&self) -> (String, String) {
        (self.r.to_str_radix(10), self.s.to_str_radix(10))
    }

    fn from_halves(r: &[u8; SCALAR_LENGTH], s: &[u8; SCALAR_LENGTH]) -> Self {
        let mut raw = [0u8; SIGNATURE_LENGTH];
        raw[..SCALAR_LENGTH].copy_from_slice(r);
        raw[SCALAR_LENGTH..].copy_from_slice(s);
        Self {
            raw,
            r: BigUint::from_bytes_be(r),
            s: BigUint::from_bytes_be(s),
        }
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let raw: &[u8; SIGNATURE_LENGTH] =
            value.try_into().map_err(|_| Error::InvalidLength {
                expected: SIGNATURE_LENGTH,
                actual: value.len(),
            })?;
        let mut r = [0u8; SCALAR_LENGTH];
        let mut s = [0u8; SCALAR_LENGTH];
        r.copy_from_slice(&raw[..SCALAR_LENGTH]);
        s.copy_from_slice(&raw[SCALAR_LENGTH..]);
        Ok(Self::from_halves(&r, &s))
    }
}

impl FromStr for Signature {
    type Err = Error;

    /// Parses the 128-character `r || s` hex encoding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (r, s) = codec::decode_pair(s)?;
        Ok(Self::from_halves(&r, &s))
    }
}

impl Eq for Signature {}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        secp256k1::scalar::mocks::{FailingRng, ZeroThen},
        PrivateKeyExt as _, Signer as _, Verifier as _,
    };
    use num_traits::One;
    use rand::{
        rngs::{OsRng, StdRng},
        SeedableRng,
    };
    use std::{collections::HashSet, thread};

    const MESSAGE: &[u8] = b"I'm a Fullstack developer *_*";

    fn int(hex: &str) -> BigUint {
        BigUint::parse_bytes(hex.as_bytes(), 16).unwrap()
    }

    struct Vector {
        private_key: &'static str,
        message: &'static [u8],
        nonce: &'static str,
        public_key: &'static str,
        signature: &'static str,
    }

    // Computed independently with the textbook group law and SHA-256.
    fn vectors() -> [Vector; 3] {
        [
            Vector {
                private_key: "c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721",
                message: MESSAGE,
                nonce: "1234567890abcdef",
                public_key: "2c8c31fc9f990c6b55e3865a184a4ce50e09481f2eaeb3e60ec1cea13a6ae645\
                             64b95e4fdb6948c0386e189b006a29f686769b011704275e4459822dc3328085",
                signature: "f973a0b87062c389d125d8199e803b832b6ac6bf7867a4f6cd87506060fc4c58\
                            ae5d89327df5200d17feaf99c7ba924dce74bdc7ad8c39bb8da0eb645503466d",
            },
            Vector {
                private_key: "0000000000000000000000000000000000000000000000000000000000000001",
                message: b"sample",
                nonce: "2",
                public_key: "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
                signature: "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5\
                            ba982dbaf644761789799122955a4e4fbb7d55a6faec62de86dea3a1df8f3852",
            },
            Vector {
                private_key: "000000000000000000000000000000000000000000000000000000000000002a",
                message: b"",
                nonce: "7",
                public_key: "fe8d1eb1bcb3432b1db5833ff5f2226d9cb5e65cee430558c18ed3a3c86ce1af\
                             07b158f244cd0de2134ac7c1d371cffbfae4db40801a2572e531c573cda9b5b4",
                signature: "5cbdf0646e5db4eaa398f365f2ea7a0e3d419b7e0330e39ce92bddedcac4f9bc\
                            961f2c1af531af39a295208059b3648159bfea893e2cc5bfb36acbee6cdef297",
            },
        ]
    }

    #[test]
    fn test_vectors_public_key() {
        for (index, vector) in vectors().iter().enumerate() {
            let private_key = PrivateKey::from_hex(vector.private_key).unwrap();
            assert_eq!(
                private_key.public_key().to_string(),
                vector.public_key,
                "vector_{}",
                index + 1
            );
            assert_eq!(private_key.to_hex().as_str(), vector.private_key);
        }
    }

    #[test]
    fn test_vectors_sign_with_nonce() {
        for (index, vector) in vectors().iter().enumerate() {
            let private_key = PrivateKey::from_hex(vector.private_key).unwrap();
            let e = hash_to_int(vector.message);
            let k = int(vector.nonce);
            let signature = sign_with_nonce(&private_key.scalar(), &e, &k).unwrap();
            assert_eq!(signature.to_string(), vector.signature, "vector_{}", index + 1);
        }
    }

    #[test]
    fn test_vectors_verify() {
        for (index, vector) in vectors().iter().enumerate() {
            let public_key: PublicKey = vector.public_key.parse().unwrap();
            let signature: Signature = vector.signature.parse().unwrap();
            assert!(
                public_key.verify(vector.message, &signature),
                "vector_{}",
                index + 1
            );
            assert!(!public_key.verify(b"tampered", &signature), "vector_{}", index + 1);
        }
    }

    #[test]
    fn test_sign_and_verify() {
        let (private_key, public_key) = keygen(&mut OsRng).unwrap();
        let signature = private_key.sign(&mut OsRng, MESSAGE).unwrap();
        assert!(public_key.verify(MESSAGE, &signature));

        // s + 1 mod n
        let n = &curve().n;
        let s = (signature.s() + 1u32) % n;
        let tampered = Signature::new(signature.r().clone(), s).unwrap();
        assert!(!public_key.verify(MESSAGE, &tampered));
    }

    #[test]
    fn test_sign_and_verify_after_hex_roundtrip() {
        let (private_key, public_key) = keygen(&mut OsRng).unwrap();
        let signature = private_key.sign(&mut OsRng, MESSAGE).unwrap();

        let public_key_hex = public_key.to_string();
        let signature_hex = signature.to_string();
        assert_eq!(public_key_hex.len(), codec::PAIR_HEX_LENGTH);
        assert_eq!(signature_hex.len(), codec::PAIR_HEX_LENGTH);

        let decoded_public_key: PublicKey = public_key_hex.parse().unwrap();
        let decoded_signature: Signature = signature_hex.parse().unwrap();
        assert_eq!(decoded_public_key, public_key);
        assert_eq!(decoded_signature, signature);
        assert_eq!(decoded_signature.r(), signature.r());
        assert_eq!(decoded_signature.s(), signature.s());
        assert!(decoded_public_key.verify(MESSAGE, &decoded_signature));

        // Uppercase is accepted
        let upper: Signature = signature_hex.to_uppercase().parse().unwrap();
        assert_eq!(upper, signature);
    }

    #[test]
    fn test_bit_flips_fail() {
        let private_key = PrivateKey::from_seed(0).unwrap();
        let public_key = private_key.public_key();
        let signature = private_key.sign(&mut OsRng, MESSAGE).unwrap();
        for bit in (0..SIGNATURE_LENGTH * 8).step_by(11) {
            let mut raw = [0u8; SIGNATURE_LENGTH];
            raw.copy_from_slice(signature.as_ref());
            raw[bit / 8] ^= 1 << (bit % 8);
            let flipped: Signature = hex(&raw).parse().unwrap();
            assert_ne!(flipped, signature);
            assert!(!public_key.verify(MESSAGE, &flipped), "bit {bit}");
        }
    }

    #[test]
    fn test_wrong_public_key() {
        let (private_key, _) = keygen(&mut OsRng).unwrap();
        let (_, other_public_key) = keygen(&mut OsRng).unwrap();
        let signature = private_key.sign(&mut OsRng, MESSAGE).unwrap();
        assert!(!other_public_key.verify(MESSAGE, &signature));
    }

    #[test]
    fn test_verify_rejects_out_of_range() {
        let private_key = PrivateKey::from_seed(0).unwrap();
        let public_key = private_key.public_key();
        let signature = private_key.sign(&mut OsRng, MESSAGE).unwrap();
        let n = &curve().n;
        let (r, s) = (signature.r().clone(), signature.s().clone());

        let cases = [
            (BigUint::zero(), s.clone()),
            (n.clone(), s.clone()),
            (&r + n, s.clone()),
            (r.clone(), BigUint::zero()),
            (r.clone(), n.clone()),
            (r.clone(), &s + n),
            ((BigUint::one() << 256) - 1u32, s.clone()),
        ];
        for (index, (r, s)) in cases.into_iter().enumerate() {
            let Ok(signature) = Signature::new(r, s) else {
                // r + n or s + n may not fit in 256 bits
                continue;
            };
            assert!(!public_key.verify(MESSAGE, &signature), "case {index}");
        }

        let zeros: Signature = "0".repeat(codec::PAIR_HEX_LENGTH).parse().unwrap();
        assert!(!public_key.verify(MESSAGE, &zeros));
        let max: Signature = "f".repeat(codec::PAIR_HEX_LENGTH).parse().unwrap();
        assert!(!public_key.verify(MESSAGE, &max));
    }

    #[test]
    fn test_signature_new_rejects_wide_components() {
        let wide: BigUint = BigUint::one() << 256usize;
        assert!(matches!(
            Signature::new(wide.clone(), BigUint::one()),
            Err(Error::InvalidScalar)
        ));
        assert!(matches!(
            Signature::new(BigUint::one(), wide),
            Err(Error::InvalidScalar)
        ));
    }

    #[test]
    fn test_nonce_reuse_does_not_occur() {
        let private_key = PrivateKey::from_seed(0).unwrap();
        let public_key = private_key.public_key();
        let mut seen = HashSet::new();
        for _ in 0..4 {
            let signature = private_key.sign(&mut OsRng, MESSAGE).unwrap();
            assert!(public_key.verify(MESSAGE, &signature));
            assert!(seen.insert(signature.r().clone()));
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let private_key = PrivateKey::from_seed(7).unwrap();
        let signature_1 = private_key
            .sign(&mut StdRng::seed_from_u64(42), MESSAGE)
            .unwrap();
        let signature_2 = private_key
            .sign(&mut StdRng::seed_from_u64(42), MESSAGE)
            .unwrap();
        assert_eq!(signature_1, signature_2);
    }

    #[test]
    fn test_signature_components_in_range() {
        let private_key = PrivateKey::from_seed(3).unwrap();
        for seed in 0..4 {
            let mut rng = StdRng::seed_from_u64(seed);
            let signature = private_key.sign(&mut rng, MESSAGE).unwrap();
            assert!(scalar::is_valid(signature.r()));
            assert!(scalar::is_valid(signature.s()));
        }
    }

    #[test]
    fn test_zero_s_is_discarded() {
        let d = BigUint::from(0x2au32);
        let k = BigUint::from(7u32);
        let n = &curve().n;
        let r = Point::generator().mul(&k).x().unwrap() % n;

        // e = -d * r forces s = 0
        let e = fn_::neg(&fn_::mul(&d, &r, n), n);
        assert!(sign_with_nonce(&d, &e, &k).is_none());

        // The same nonce with any other digest is fine
        let e = fn_::add(&e, &BigUint::one(), n);
        let signature = sign_with_nonce(&d, &e, &k).unwrap();
        assert_eq!(signature.r(), &r);
        assert!(!signature.s().is_zero());
    }

    #[test]
    fn test_keygen_failing_source() {
        assert!(matches!(
            keygen(&mut FailingRng),
            Err(Error::EntropyUnavailable(_))
        ));
    }

    #[test]
    fn test_sign_failing_source() {
        let private_key = PrivateKey::from_seed(0).unwrap();
        assert!(matches!(
            private_key.sign(&mut FailingRng, MESSAGE),
            Err(Error::EntropyUnavailable(_))
        ));
    }

    #[test]
    fn test_sign_exhausted_source() {
        let private_key = PrivateKey::from_seed(0).unwrap();
        let mut rng = ZeroThen {
            zeros: usize::MAX,
            inner: OsRng,
        };
        let config = Config { max_attempts: 4 };
        assert!(matches!(
            private_key.sign_with_config(&config, &mut rng, MESSAGE),
            Err(Error::EntropyExhausted(4))
        ));
        assert!(matches!(
            PrivateKey::from_rng_with_config(&mut rng, &config),
            Err(Error::EntropyExhausted(4))
        ));
    }

    #[test]
    fn test_sign_recovers_from_bad_samples() {
        let private_key = PrivateKey::from_seed(0).unwrap();
        let mut rng = ZeroThen {
            zeros: 3,
            inner: OsRng,
        };
        let signature = private_key.sign(&mut rng, MESSAGE).unwrap();
        assert!(private_key.public_key().verify(MESSAGE, &signature));
    }

    #[test]
    fn test_private_key_encoding() {
        let private_key = PrivateKey::from_seed(0).unwrap();
        let bytes = private_key.to_bytes();
        assert_eq!(bytes.len(), PRIVATE_KEY_LENGTH);
        let decoded = PrivateKey::try_from(&bytes[..]).unwrap();
        assert_eq!(decoded, private_key);
        assert_eq!(decoded.public_key(), private_key.public_key());

        let hex = private_key.to_hex();
        assert_eq!(hex.len(), codec::SCALAR_HEX_LENGTH);
        assert_eq!(PrivateKey::from_hex(&hex).unwrap(), private_key);
    }

    #[test]
    fn test_private_key_rejects_out_of_range() {
        let n = &curve().n;
        let zero = [0u8; PRIVATE_KEY_LENGTH];
        assert!(matches!(
            PrivateKey::try_from(&zero[..]),
            Err(Error::InvalidPrivateKey)
        ));
        let order = scalar::to_bytes(n).unwrap();
        assert!(matches!(
            PrivateKey::try_from(&order[..]),
            Err(Error::InvalidPrivateKey)
        ));
        let max = scalar::to_bytes(&(n - 1u32)).unwrap();
        assert!(PrivateKey::try_from(&max[..]).is_ok());
        assert!(matches!(
            PrivateKey::try_from(&[1u8; 31][..]),
            Err(Error::InvalidLength {
                expected: 32,
                actual: 31
            })
        ));
        assert!(matches!(
            PrivateKey::from_hex("zz"),
            Err(Error::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_private_key_redacted() {
        let private_key = PrivateKey::from_seed(0).unwrap();
        let hex = private_key.to_hex();
        assert_eq!(format!("{private_key:?}"), "[REDACTED]");
        assert_eq!(format!("{private_key}"), "[REDACTED]");
        assert!(!format!("{private_key:?}").contains(hex.as_str()));
    }

    #[test]
    fn test_public_key_rejects_invalid_points() {
        // (0, 0) is not on the curve
        let origin = "0".repeat(codec::PAIR_HEX_LENGTH);
        assert!(matches!(
            origin.parse::<PublicKey>(),
            Err(Error::InvalidPublicKey)
        ));

        // G with a perturbed y
        let mut g = Point::generator().negate();
        if let Point::Affine { y, .. } = &mut g {
            *y += 1u32;
        }
        assert!(matches!(
            PublicKey::try_from(g),
            Err(Error::InvalidPublicKey)
        ));

        // Infinity
        assert!(matches!(
            PublicKey::try_from(Point::Infinity),
            Err(Error::InvalidPublicKey)
        ));

        // x >= p
        let p = &curve().p;
        let mut raw = [0u8; PUBLIC_KEY_LENGTH];
        raw[..SCALAR_LENGTH].copy_from_slice(&scalar::to_bytes(p).unwrap());
        assert!(matches!(
            PublicKey::try_from(&raw[..]),
            Err(Error::InvalidPublicKey)
        ));

        // Wrong length
        assert!(matches!(
            PublicKey::try_from(&raw[1..]),
            Err(Error::InvalidLength {
                expected: 64,
                actual: 63
            })
        ));
        assert!(matches!(
            "abc".parse::<PublicKey>(),
            Err(Error::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_public_key_accessors() {
        let private_key = PrivateKey::from_seed(0).unwrap();
        let public_key = private_key.public_key();
        let point = public_key.point();
        assert!(point.is_on_curve());
        assert_eq!(point.x(), Some(public_key.x()));
        assert_eq!(point.y(), Some(public_key.y()));
        assert_eq!(PublicKey::try_from(point).unwrap(), public_key);
        assert_eq!(
            PublicKey::try_from(public_key.as_ref()).unwrap(),
            public_key
        );
    }

    #[test]
    fn test_signature_decimal() {
        let signature = Signature::new(BigUint::from(10u32), BigUint::from(255u32)).unwrap();
        assert_eq!(
            signature.to_decimal(),
            ("10".to_string(), "255".to_string())
        );
        let expected = format!("{}a{}ff", "0".repeat(63), "0".repeat(62));
        assert_eq!(signature.to_string(), expected);
    }

    #[test]
    fn test_signature_try_from_bytes() {
        let private_key = PrivateKey::from_seed(0).unwrap();
        let signature = private_key.sign(&mut OsRng, MESSAGE).unwrap();
        assert_eq!(
            Signature::try_from(signature.as_ref()).unwrap(),
            signature
        );
        assert!(matches!(
            Signature::try_from(&signature.as_ref()[..63]),
            Err(Error::InvalidLength {
                expected: 64,
                actual: 63
            })
        ));
    }

    #[test]
    fn test_concurrent_sign_and_verify() {
        let private_key = PrivateKey::from_seed(0).unwrap();
        let public_key = private_key.public_key();
        thread::scope(|scope| {
            for i in 0..4u8 {
                let private_key = &private_key;
                let public_key = &public_key;
                scope.spawn(move || {
                    let message = [i; 16];
                    let signature = private_key.sign(&mut OsRng, &message).unwrap();
                    assert!(public_key.verify(&message, &signature));
                });
            }
        });
    }

    #[test]
    fn test_default_config() {
        assert_eq!(Config::default().max_attempts, DEFAULT_MAX_ATTEMPTS);
    }
}
