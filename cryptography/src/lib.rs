//! Generate secp256k1 keys, sign arbitrary messages with ECDSA, and verify signatures.
//!
//! The curve arithmetic is implemented directly over arbitrary-precision integers
//! ([num_bigint::BigUint]) rather than delegated to an optimized curve library. Operations
//! are **not** constant-time and should not be used where side-channel resistance matters.
//!
//! # Example
//! ```rust
//! use secp256k1_ecdsa::{secp256k1, PrivateKeyExt as _, Signer as _, Verifier as _};
//! use rand::rngs::OsRng;
//!
//! // Generate a new private key
//! let private_key = secp256k1::PrivateKey::from_rng(&mut OsRng).unwrap();
//!
//! // Sign a message
//! let message = b"I'm a Fullstack developer *_*";
//! let signature = private_key.sign(&mut OsRng, message).unwrap();
//!
//! // Share the public key and signature as hex
//! let public_key: secp256k1::PublicKey = private_key.public_key().to_string().parse().unwrap();
//! let signature: secp256k1::Signature = signature.to_string().parse().unwrap();
//!
//! // Verify the signature
//! assert!(public_key.verify(message, &signature));
//! ```

use num_bigint::BigUint;
use rand::{rngs::StdRng, CryptoRng, RngCore, SeedableRng};
use sha2::{Digest as _, Sha256};
use thiserror::Error;

pub mod secp256k1;

/// Length of a SHA-256 digest in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// Errors that can occur when generating keys, signing, or decoding encoded values.
#[derive(Error, Debug)]
pub enum Error {
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(#[from] rand::Error),
    #[error("entropy exhausted after {0} attempts")]
    EntropyExhausted(usize),
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("invalid hex character {character:?} at index {index}")]
    InvalidHexCharacter { character: char, index: usize },
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid scalar")]
    InvalidScalar,
}

/// Produces [Signer::Signature]s over messages that can be verified with a corresponding
/// [Signer::PublicKey].
pub trait Signer: Send + Sync + Clone + 'static {
    /// The type of signature produced by this [Signer].
    type Signature: Clone + PartialEq;

    /// The corresponding public key type.
    type PublicKey: Verifier<Signature = Self::Signature>;

    /// Returns the public key corresponding to this [Signer].
    fn public_key(&self) -> Self::PublicKey;

    /// Sign a message, drawing a fresh nonce from `rng`.
    ///
    /// The message should not be hashed prior to calling this function. It is hashed
    /// internally with SHA-256.
    ///
    /// Fails only if `rng` cannot supply entropy (or supplies unusable entropy for longer
    /// than the configured attempt budget). A fresh nonce is drawn on every call, so signing
    /// the same message twice yields different signatures.
    fn sign<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        msg: &[u8],
    ) -> Result<Self::Signature, Error>;
}

/// A [Signer] that can be generated from a seed or RNG.
pub trait PrivateKeyExt: Signer + Sized {
    /// Create a [Signer] from a seed.
    ///
    /// # Warning
    ///
    /// This function is insecure and should only be used for examples
    /// and testing.
    fn from_seed(seed: u64) -> Result<Self, Error> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_rng(&mut rng)
    }

    /// Create a fresh [Signer] using the supplied RNG.
    fn from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, Error>;
}

/// Verifies signatures over messages.
pub trait Verifier {
    /// The type of signature that this verifier can verify.
    type Signature;

    /// Verify that a signature is valid over a given message.
    ///
    /// The message should not be hashed prior to calling this function.
    ///
    /// Returns `false` (never an error) for any signature that does not verify, including
    /// signatures with out-of-range components.
    fn verify(&self, msg: &[u8], sig: &Self::Signature) -> bool;
}

/// Generate a SHA-256 digest from a message.
pub fn hash(message: &[u8]) -> [u8; DIGEST_LENGTH] {
    Sha256::digest(message).into()
}

/// Hash a message with SHA-256 and interpret the digest as a big-endian integer.
pub fn hash_to_int(message: &[u8]) -> BigUint {
    BigUint::from_bytes_be(&hash(message))
}
