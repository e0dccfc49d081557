//! Arbitrary-precision integer helpers
//!
//! Thin layer over `num_bigint::BigInt` pinning down the semantics the
//! rational type relies on: truncating division, sign-of-dividend remainder
//! and a non-negative gcd.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Pow, Zero};

/// Greatest common divisor, always non-negative.
///
/// `gcd(0, 0)` is 0; callers must not use that result as a divisor.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    a.gcd(b)
}

/// Quotient rounded toward zero. Panics if `b` is zero.
pub fn div_trunc(a: &BigInt, b: &BigInt) -> BigInt {
    a / b
}

/// Remainder carrying the sign of the dividend. Panics if `b` is zero.
pub fn rem_trunc(a: &BigInt, b: &BigInt) -> BigInt {
    a % b
}

/// `base^exp`, with `0^0 = 1`.
pub fn pow_usize(base: &BigInt, exp: usize) -> BigInt {
    if exp == 0 {
        return BigInt::from(1);
    }
    if base.is_zero() {
        return BigInt::zero();
    }
    Pow::pow(base, exp)
}
