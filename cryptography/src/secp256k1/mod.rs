//! ECDSA over secp256k1.
//!
//! Messages are hashed with SHA-256, nonces are drawn fresh from the caller's RNG for every
//! signature, and signatures are the standard `(r, s)` pair with `s = k^-1 * (e + d * r) mod n`.
//! Signatures are not normalized to low-s form; both `s` and `n - s` verify.
//!
//! Public keys and signatures travel as 128-character hex strings (two zero-padded 256-bit
//! integers, see [codec]).
//!
//! # Example
//! ```rust
//! use secp256k1_ecdsa::{secp256k1, Signer as _, Verifier as _};
//! use rand::rngs::OsRng;
//!
//! // Generate a key pair
//! let (private_key, public_key) = secp256k1::keygen(&mut OsRng).unwrap();
//!
//! // Sign a message
//! let msg = b"hello, world!";
//! let signature = private_key.sign(&mut OsRng, msg).unwrap();
//!
//! // Verify the signature
//! assert!(public_key.verify(msg, &signature));
//!
//! // Tampered signatures fail
//! let mut hex = signature.to_string();
//! let last = if hex.ends_with('0') { "1" } else { "0" };
//! hex.replace_range(127.., last);
//! let tampered: secp256k1::Signature = hex.parse().unwrap();
//! assert!(!public_key.verify(msg, &tampered));
//! ```

pub mod arithmetic;
pub mod codec;
pub mod curve;
pub mod point;
pub mod scalar;
mod scheme;

pub use point::Point;
pub use scheme::{keygen, Config, PrivateKey, PublicKey, Signature, DEFAULT_MAX_ATTEMPTS};
