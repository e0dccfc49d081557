//! Exact rational number type
//!
//! Numerator/denominator pair of `BigInt`s, always kept in lowest terms with a
//! positive denominator. Zero is stored as `0/1`.

use crate::error::{Error, Result};
use crate::integer;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Exact rational number (numerator / denominator)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numerator: BigInt,
    denominator: BigInt,
}

impl Rational {
    /// Create a new rational number from numerator and denominator
    ///
    /// Fails with [`Error::DivisionByZero`] if `den` is zero.
    pub fn new(num: BigInt, den: BigInt) -> Result<Self> {
        if den.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Self::reduced(num, den))
    }

    /// Create a rational from an integer
    pub fn from_int<T: Into<BigInt>>(n: T) -> Self {
        Self {
            numerator: n.into(),
            denominator: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_int(BigInt::zero())
    }

    pub fn one() -> Self {
        Self::from_int(BigInt::one())
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// Integer part, rounded toward zero
    pub fn trunc(&self) -> BigInt {
        integer::div_trunc(&self.numerator, &self.denominator)
    }

    /// Exact division; fails with [`Error::DivisionByZero`] if `other` is zero
    pub fn checked_div(&self, other: &Rational) -> Result<Rational> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let num = &self.numerator * &other.denominator;
        let den = &self.denominator * &other.numerator;
        Ok(Self::reduced(num, den))
    }

    /// Multiplicative inverse
    pub fn recip(&self) -> Result<Rational> {
        Rational::one().checked_div(self)
    }

    /// Reduce to lowest terms. `den` must be nonzero.
    fn reduced(num: BigInt, den: BigInt) -> Self {
        if num.is_zero() {
            return Self::zero();
        }

        let g = integer::gcd(&num, &den);
        let mut numerator = integer::div_trunc(&num, &g);
        let mut denominator = integer::div_trunc(&den, &g);

        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }

        Self {
            numerator,
            denominator,
        }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_int(n)
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_int(n)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, other: Self) -> Rational {
        if self.is_integer() && other.is_integer() {
            return Rational::from_int(&self.numerator + &other.numerator);
        }
        let num = &self.numerator * &other.denominator + &other.numerator * &self.denominator;
        let den = &self.denominator * &other.denominator;
        Rational::reduced(num, den)
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, other: Self) -> Rational {
        if self.is_integer() && other.is_integer() {
            return Rational::from_int(&self.numerator - &other.numerator);
        }
        let num = &self.numerator * &other.denominator - &other.numerator * &self.denominator;
        let den = &self.denominator * &other.denominator;
        Rational::reduced(num, den)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        &self - &other
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, other: Self) -> Rational {
        let num = &self.numerator * &other.numerator;
        let den = &self.denominator * &other.denominator;
        Rational::reduced(num, den)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        &self * &other
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }
}
