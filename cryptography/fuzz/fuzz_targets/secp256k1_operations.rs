#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use rand::{rngs::StdRng, SeedableRng};
use secp256k1_ecdsa::{
    secp256k1::{curve::curve, Point, PrivateKey, Signature},
    PrivateKeyExt as _, Signer as _, Verifier as _,
};

#[derive(Debug, Arbitrary)]
enum FuzzOperation {
    SignVerify { seed: u64, message: Vec<u8> },
    VerifyArbitrary { seed: u64, message: Vec<u8>, r: [u8; 32], s: [u8; 32] },
    ScalarMulAdd { a: [u8; 32], b: [u8; 32] },
}

fn fuzz(op: FuzzOperation) {
    match op {
        FuzzOperation::SignVerify { seed, message } => {
            let private_key = PrivateKey::from_seed(seed).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let signature = private_key.sign(&mut rng, &message).unwrap();
            assert!(private_key.public_key().verify(&message, &signature));
        }
        FuzzOperation::VerifyArbitrary {
            seed,
            message,
            r,
            s,
        } => {
            // Never panics, whatever the components
            let private_key = PrivateKey::from_seed(seed).unwrap();
            let signature =
                Signature::new(BigUint::from_bytes_be(&r), BigUint::from_bytes_be(&s)).unwrap();
            let _ = private_key.public_key().verify(&message, &signature);
        }
        FuzzOperation::ScalarMulAdd { a, b } => {
            let (a, b) = (BigUint::from_bytes_be(&a), BigUint::from_bytes_be(&b));
            let g = Point::generator();
            let sum = g.mul(&a).add(&g.mul(&b));
            assert!(sum.is_on_curve());
            assert_eq!(sum, g.mul(&((a + b) % &curve().n)));
        }
    }
}

fuzz_target!(|op: FuzzOperation| {
    fuzz(op);
});
