#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use secp256k1_ecdsa::secp256k1::{codec::PAIR_HEX_LENGTH, PrivateKey, PublicKey, Signature};

#[derive(Debug, Arbitrary)]
pub struct FuzzInput {
    pub text: String,
    pub bytes: [u8; 64],
    pub case_selector: u8,
}

// Arbitrary strings never panic and only decode when well-formed
fn fuzz_decode_text(text: &str) {
    let well_formed =
        text.len() == PAIR_HEX_LENGTH && text.chars().all(|c| c.is_ascii_hexdigit());
    let signature = text.parse::<Signature>();
    assert_eq!(signature.is_ok(), well_formed);
    if let Ok(signature) = signature {
        assert_eq!(signature.to_string(), text.to_ascii_lowercase());
    }
    if let Ok(public_key) = text.parse::<PublicKey>() {
        assert!(well_formed);
        assert_eq!(public_key.to_string(), text.to_ascii_lowercase());
    }
    let _ = PrivateKey::from_hex(text);
}

// Every 64-byte string is a signature encoding
fn fuzz_signature_bytes(bytes: &[u8; 64]) {
    let signature = Signature::try_from(&bytes[..]).unwrap();
    assert_eq!(signature.as_ref(), &bytes[..]);
    let decoded: Signature = signature.to_string().parse().unwrap();
    assert_eq!(decoded, signature);
}

// Public keys decode only when on the curve
fn fuzz_public_key_bytes(bytes: &[u8; 64]) {
    if let Ok(public_key) = PublicKey::try_from(&bytes[..]) {
        assert!(public_key.point().is_on_curve());
        let decoded: PublicKey = public_key.to_string().parse().unwrap();
        assert_eq!(decoded, public_key);
    }
}

fn fuzz(input: FuzzInput) {
    match input.case_selector % 3 {
        0 => fuzz_decode_text(&input.text),
        1 => fuzz_signature_bytes(&input.bytes),
        2 => fuzz_public_key_bytes(&input.bytes),
        _ => unreachable!(),
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
