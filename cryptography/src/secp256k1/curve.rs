//! Domain parameters of secp256k1 (SEC 2, Version 2.0, Section 2.4.1).

use super::point::Point;
use num_bigint::BigUint;
use std::sync::OnceLock;

/// Field prime `p = 2^256 - 2^32 - 977`.
const P: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];

/// Order of the base point.
const N: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

const GX: [u8; 32] = [
    0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b, 0x07,
    0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17, 0x98,
];

const GY: [u8; 32] = [
    0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65, 0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11, 0x08, 0xa8,
    0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19, 0x9c, 0x47, 0xd0, 0x8f, 0xfb, 0x10, 0xd4, 0xb8,
];

/// Coefficient `a` of `y^2 = x^3 + ax + b`.
const A: u32 = 0;

/// Coefficient `b` of `y^2 = x^3 + ax + b`.
const B: u32 = 7;

static CURVE: OnceLock<Curve> = OnceLock::new();

/// The secp256k1 curve `y^2 = x^3 + 7` over `GF(p)` with base point `G` of prime order `n`.
#[derive(Debug)]
pub struct Curve {
    /// Field prime.
    pub p: BigUint,
    pub a: BigUint,
    pub b: BigUint,
    /// Base point.
    pub g: Point,
    /// Group order.
    pub n: BigUint,
}

impl Curve {
    fn new() -> Self {
        Self {
            p: BigUint::from_bytes_be(&P),
            a: BigUint::from(A),
            b: BigUint::from(B),
            g: Point::Affine {
                x: BigUint::from_bytes_be(&GX),
                y: BigUint::from_bytes_be(&GY),
            },
            n: BigUint::from_bytes_be(&N),
        }
    }
}

/// Returns the process-wide secp256k1 parameters, initializing them on first use.
pub fn curve() -> &'static Curve {
    CURVE.get_or_init(Curve::new)
}
