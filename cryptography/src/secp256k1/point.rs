//! Points on secp256k1 and the curve group law.
//!
//! [Point] is the public, affine representation. Scalar multiplication runs internally in
//! Jacobian coordinates (`x = X/Z^2`, `y = Y/Z^3`) so that only a single field inversion is
//! needed per multiplication.

use super::{arithmetic as fp, curve::curve};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// A point on secp256k1.
///
/// The identity is an explicit variant rather than a sentinel coordinate pair: `(0, 0)` is not
/// on the curve and must never be mistaken for [Point::Infinity].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Point {
    /// The point at infinity (group identity).
    Infinity,
    /// A finite point with coordinates in `[0, p - 1]`.
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    /// Returns the base point `G`.
    pub fn generator() -> Self {
        curve().g.clone()
    }

    /// Returns `true` if this is the point at infinity.
    pub fn is_infinity(&self) -> bool {
        matches!(self, Self::Infinity)
    }

    /// The affine x-coordinate, if the point is finite.
    pub fn x(&self) -> Option<&BigUint> {
        match self {
            Self::Infinity => None,
            Self::Affine { x, .. } => Some(x),
        }
    }

    /// The affine y-coordinate, if the point is finite.
    pub fn y(&self) -> Option<&BigUint> {
        match self {
            Self::Infinity => None,
            Self::Affine { y, .. } => Some(y),
        }
    }

    /// Returns `true` if the point satisfies `y^2 = x^3 + ax + b (mod p)` with both coordinates
    /// in `[0, p - 1]`.
    ///
    /// The point at infinity is considered on the curve.
    pub fn is_on_curve(&self) -> bool {
        let Self::Affine { x, y } = self else {
            return true;
        };
        let curve = curve();
        let p = &curve.p;
        if x >= p || y >= p {
            return false;
        }
        let lhs = fp::mul(y, y, p);
        let x3 = fp::mul(&fp::mul(x, x, p), x, p);
        let rhs = fp::add(&fp::add(&x3, &fp::mul(&curve.a, x, p), p), &curve.b, p);
        lhs == rhs
    }

    /// Returns `-P`.
    pub fn negate(&self) -> Self {
        match self {
            Self::Infinity => Self::Infinity,
            Self::Affine { x, y } => {
                let p = &curve().p;
                Self::Affine {
                    x: x % p,
                    y: fp::neg(y, p),
                }
            }
        }
    }

    /// Computes `A + B`.
    ///
    /// Handles the identity (either operand at infinity), doubling (`A == B`) and inverse
    /// (`B == -A`) cases. Inputs are assumed to be on the curve; validating them is the
    /// caller's responsibility.
    pub fn add(&self, other: &Self) -> Self {
        let (x1, y1, x2, y2) = match (self, other) {
            (Self::Infinity, _) => return other.clone(),
            (_, Self::Infinity) => return self.clone(),
            (Self::Affine { x: x1, y: y1 }, Self::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };
        let curve = curve();
        let p = &curve.p;
        let (x1, y1, x2, y2) = (x1 % p, y1 % p, x2 % p, y2 % p);

        let lambda = if x1 == x2 {
            if fp::add(&y1, &y2, p).is_zero() {
                return Self::Infinity;
            }
            // Tangent: (3x^2 + a) / 2y
            let numerator = fp::add(
                &fp::mul(&BigUint::from(3u32), &fp::mul(&x1, &x1, p), p),
                &curve.a,
                p,
            );
            let denominator = fp::add(&y1, &y1, p);
            fp::mul(&numerator, &fp::invert(&denominator, p), p)
        } else {
            // Chord: (y2 - y1) / (x2 - x1)
            let numerator = fp::sub(&y2, &y1, p);
            let denominator = fp::sub(&x2, &x1, p);
            fp::mul(&numerator, &fp::invert(&denominator, p), p)
        };

        let x3 = fp::sub(&fp::sub(&fp::mul(&lambda, &lambda, p), &x1, p), &x2, p);
        let y3 = fp::sub(&fp::mul(&lambda, &fp::sub(&x1, &x3, p), p), &y1, p);
        Self::Affine { x: x3, y: y3 }
    }

    /// Computes `2P`.
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Computes `k * P` with left-to-right double-and-add.
    ///
    /// Returns [Point::Infinity] when `k` is zero or `P` is the point at infinity. The running
    /// time depends on `k`.
    pub fn mul(&self, k: &BigUint) -> Self {
        let Self::Affine { x, y } = self else {
            return Self::Infinity;
        };
        if k.is_zero() {
            return Self::Infinity;
        }
        let p = &curve().p;
        let (x, y) = (x % p, y % p);

        let mut acc = Jacobian::infinity();
        for i in (0..k.bits()).rev() {
            acc = acc.double();
            if k.bit(i) {
                acc = acc.add_affine(&x, &y);
            }
        }
        acc.to_affine()
    }
}

/// A point in Jacobian coordinates. `Z = 0` encodes the point at infinity.
struct Jacobian {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl Jacobian {
    fn infinity() -> Self {
        Self {
            x: BigUint::one(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    // dbl-1998-cmo-2
    fn double(&self) -> Self {
        if self.is_infinity() || self.y.is_zero() {
            return Self::infinity();
        }
        let curve = curve();
        let p = &curve.p;

        let xx = fp::mul(&self.x, &self.x, p);
        let yy = fp::mul(&self.y, &self.y, p);
        let zz = fp::mul(&self.z, &self.z, p);
        let s = fp::mul(&BigUint::from(4u32), &fp::mul(&self.x, &yy, p), p);
        let m = fp::add(
            &fp::mul(&BigUint::from(3u32), &xx, p),
            &fp::mul(&curve.a, &fp::mul(&zz, &zz, p), p),
            p,
        );
        let x3 = fp::sub(&fp::mul(&m, &m, p), &fp::add(&s, &s, p), p);
        let yyyy8 = fp::mul(&BigUint::from(8u32), &fp::mul(&yy, &yy, p), p);
        let y3 = fp::sub(&fp::mul(&m, &fp::sub(&s, &x3, p), p), &yyyy8, p);
        let z3 = fp::mul(&BigUint::from(2u32), &fp::mul(&self.y, &self.z, p), p);
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    // Mixed addition with an affine point (Z2 = 1).
    fn add_affine(&self, x2: &BigUint, y2: &BigUint) -> Self {
        if self.is_infinity() {
            return Self {
                x: x2.clone(),
                y: y2.clone(),
                z: BigUint::one(),
            };
        }
        let p = &curve().p;

        let z1z1 = fp::mul(&self.z, &self.z, p);
        let u2 = fp::mul(x2, &z1z1, p);
        let s2 = fp::mul(y2, &fp::mul(&self.z, &z1z1, p), p);
        let h = fp::sub(&u2, &self.x, p);
        let r = fp::sub(&s2, &self.y, p);
        if h.is_zero() {
            if r.is_zero() {
                return self.double();
            }
            return Self::infinity();
        }

        let hh = fp::mul(&h, &h, p);
        let hhh = fp::mul(&h, &hh, p);
        let v = fp::mul(&self.x, &hh, p);
        let x3 = fp::sub(
            &fp::sub(&fp::mul(&r, &r, p), &hhh, p),
            &fp::add(&v, &v, p),
            p,
        );
        let y3 = fp::sub(
            &fp::mul(&r, &fp::sub(&v, &x3, p), p),
            &fp::mul(&self.y, &hhh, p),
            p,
        );
        let z3 = fp::mul(&self.z, &h, p);
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    fn to_affine(&self) -> Point {
        if self.is_infinity() {
            return Point::Infinity;
        }
        let p = &curve().p;
        let z_inv = fp::invert(&self.z, p);
        let z_inv2 = fp::mul(&z_inv, &z_inv, p);
        let z_inv3 = fp::mul(&z_inv2, &z_inv, p);
        Point::Affine {
            x: fp::mul(&self.x, &z_inv2, p),
            y: fp::mul(&self.y, &z_inv3, p),
        }
    }
}
