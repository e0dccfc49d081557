//! Polynomial interpolation of threshold shares
//!
//! Given k shares on a degree-(k-1) polynomial, builds the Vandermonde
//! system in descending power order and solves it exactly. The last
//! coefficient (x^0) is the secret.

use crate::error::{Error, Result};
use crate::integer;
use crate::matrix::AugmentedMatrix;
use crate::rational::Rational;
use crate::solve::{verify_solution, GaussianSolver, SolveStats};
use num_bigint::BigInt;
use num_traits::One;
use std::collections::HashSet;
use std::fmt;

/// One share: index `x` and decoded value `y`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SharePoint {
    pub x: BigInt,
    pub y: BigInt,
}

impl SharePoint {
    pub fn new<X: Into<BigInt>, Y: Into<BigInt>>(x: X, y: Y) -> Self {
        Self { x: x.into(), y: y.into() }
    }
}

impl fmt::Display for SharePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What to do when the recovered constant term is not an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegralityPolicy {
    /// Truncate toward zero and flag the result as inexact
    #[default]
    Truncate,
    /// Fail with [`Error::NonIntegralSecret`]
    Strict,
}

/// Reconstruction settings
#[derive(Debug, Clone)]
pub struct RecoverConfig {
    pub integrality: IntegralityPolicy,
    /// Substitute the solution back into the system and require zero residual
    pub verify: bool,
}

impl Default for RecoverConfig {
    fn default() -> Self {
        Self {
            integrality: IntegralityPolicy::Truncate,
            verify: true,
        }
    }
}

/// Outcome of a reconstruction
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// Integer secret (constant term truncated toward zero)
    pub secret: BigInt,
    /// Exact constant term as solved
    pub constant_term: Rational,
    /// Polynomial coefficients, highest power first
    pub coefficients: Vec<Rational>,
    /// Shares actually used, sorted by x
    pub points: Vec<SharePoint>,
    pub verified: bool,
    pub stats: SolveStats,
}

impl Reconstruction {
    /// False when the constant term had to be truncated
    pub fn is_exact(&self) -> bool {
        self.constant_term.is_integer()
    }

    pub fn threshold(&self) -> usize {
        self.points.len()
    }
}

/// Pick the k shares with the smallest x, rejecting duplicate x among them
pub fn select_points(points: &[SharePoint], k: usize) -> Result<Vec<SharePoint>> {
    if k == 0 {
        return Err(Error::InvalidThreshold { k });
    }
    if points.len() < k {
        return Err(Error::InsufficientShares { required: k, provided: points.len() });
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.cmp(&b.x));
    sorted.truncate(k);

    if let Some(pair) = sorted.windows(2).find(|w| w[0].x == w[1].x) {
        return Err(Error::DuplicatePoint { x: pair[0].x.clone() });
    }

    Ok(sorted)
}

/// Build the k x (k+1) system `[x^(k-1) ... x^1 x^0 | y]`, one row per share
pub fn vandermonde_system(points: &[SharePoint]) -> Result<AugmentedMatrix> {
    let k = points.len();
    let rows: Vec<Vec<BigInt>> = points
        .iter()
        .map(|p| {
            let mut row: Vec<BigInt> = Vec::with_capacity(k + 1);
            let mut power = BigInt::one();
            for _ in 0..k {
                row.push(power.clone());
                power *= &p.x;
            }
            row.reverse();
            row.push(p.y.clone());
            row
        })
        .collect();

    AugmentedMatrix::from_integer_rows(rows)
}

/// Coefficients of the unique degree-(k-1) polynomial through `points`,
/// highest power first
pub fn interpolate(points: &[SharePoint]) -> Result<Vec<Rational>> {
    if points.is_empty() {
        return Err(Error::InvalidThreshold { k: 0 });
    }
    ensure_distinct(points)?;
    GaussianSolver::new().solve(vandermonde_system(points)?)
}

/// Evaluate integer coefficients (highest power first) at `x`
pub fn evaluate(coefficients: &[BigInt], x: &BigInt) -> BigInt {
    let degree = coefficients.len().saturating_sub(1);
    coefficients
        .iter()
        .enumerate()
        .map(|(i, c)| c * integer::pow_usize(x, degree - i))
        .sum()
}

/// Recover the secret from `points` using threshold `k`
pub fn reconstruct_secret(points: &[SharePoint], k: usize, config: &RecoverConfig) -> Result<Reconstruction> {
    let selected = select_points(points, k)?;
    let system = vandermonde_system(&selected)?;
    let original = config.verify.then(|| system.clone());

    let (coefficients, stats) = GaussianSolver::new().solve_with_stats(system)?;

    let verified = match &original {
        Some(m) if !verify_solution(m, &coefficients) => return Err(Error::VerificationFailed),
        Some(_) => true,
        None => false,
    };

    let constant_term = coefficients
        .last()
        .cloned()
        .ok_or(Error::InvalidThreshold { k })?;

    if !constant_term.is_integer() && config.integrality == IntegralityPolicy::Strict {
        return Err(Error::NonIntegralSecret { value: constant_term.to_string() });
    }

    Ok(Reconstruction {
        secret: constant_term.trunc(),
        constant_term,
        coefficients,
        points: selected,
        verified,
        stats,
    })
}

/// Recover the secret with default settings
pub fn recover_secret(points: &[SharePoint], k: usize) -> Result<BigInt> {
    reconstruct_secret(points, k, &RecoverConfig::default()).map(|r| r.secret)
}

fn ensure_distinct(points: &[SharePoint]) -> Result<()> {
    let mut seen = HashSet::with_capacity(points.len());
    for p in points {
        if !seen.insert(&p.x) {
            return Err(Error::DuplicatePoint { x: p.x.clone() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn pts(raw: &[(i64, i64)]) -> Vec<SharePoint> {
        raw.iter().map(|&(x, y)| SharePoint::new(x, y)).collect()
    }

    fn random_big(rng: &mut StdRng, limbs: usize) -> BigInt {
        let digits: Vec<u32> = (0..limbs).map(|_| rng.gen()).collect();
        let v = BigInt::from_slice(num_bigint::Sign::Plus, &digits);
        if rng.gen_bool(0.5) { -v } else { v }
    }

    #[test]
    fn test_line_through_origin() {
        // y = 3x fitted as a degree-2 polynomial: leading coefficient 0, secret 0
        let points = pts(&[(1, 3), (2, 6), (3, 9)]);
        let r = reconstruct_secret(&points, 3, &RecoverConfig::default()).unwrap();
        assert_eq!(r.secret, BigInt::from(0));
        assert_eq!(r.coefficients, vec![Rational::zero(), Rational::from(3), Rational::zero()]);
        assert!(r.is_exact());
        assert!(r.verified);
    }

    #[test]
    fn test_quadratic() {
        // f(x) = x^2 + 2x + 7
        let points = pts(&[(1, 10), (2, 15), (3, 22)]);
        assert_eq!(recover_secret(&points, 3).unwrap(), BigInt::from(7));
    }

    #[test]
    fn test_share_at_zero_needs_pivot_swap() {
        // f(x) = 2x^2 - x + 5; x = 0 gives a leading-zero first row
        let points = pts(&[(0, 5), (1, 6), (-1, 8)]);
        let r = reconstruct_secret(&points, 3, &RecoverConfig::default()).unwrap();
        assert_eq!(r.secret, BigInt::from(5));
        assert!(r.stats.row_swaps >= 1);
    }

    #[test]
    fn test_selects_lowest_x() {
        // First three by x lie on f(x) = x + 1; the outlier at x = 10 is ignored
        let points = pts(&[(10, 999), (3, 4), (1, 2), (2, 3)]);
        let r = reconstruct_secret(&points, 3, &RecoverConfig::default()).unwrap();
        assert_eq!(r.secret, BigInt::from(1));
        let xs: Vec<BigInt> = r.points.iter().map(|p| p.x.clone()).collect();
        assert_eq!(xs, vec![BigInt::from(1), BigInt::from(2), BigInt::from(3)]);
    }

    #[test]
    fn test_duplicate_x_rejected() {
        let points = pts(&[(1, 3), (1, 4), (2, 6)]);
        let err = recover_secret(&points, 3).unwrap_err();
        assert_eq!(err, Error::DuplicatePoint { x: BigInt::from(1) });

        assert!(matches!(interpolate(&points), Err(Error::DuplicatePoint { .. })));
    }

    #[test]
    fn test_duplicate_outside_selection_ignored() {
        let points = pts(&[(1, 2), (2, 3), (9, 1), (9, 2)]);
        assert_eq!(recover_secret(&points, 2).unwrap(), BigInt::from(1));
    }

    #[test]
    fn test_threshold_validation() {
        let points = pts(&[(1, 2), (2, 3)]);
        assert_eq!(recover_secret(&points, 0), Err(Error::InvalidThreshold { k: 0 }));
        assert_eq!(
            recover_secret(&points, 3),
            Err(Error::InsufficientShares { required: 3, provided: 2 })
        );
    }

    #[test]
    fn test_interpolate_without_points() {
        assert_eq!(interpolate(&[]), Err(Error::InvalidThreshold { k: 0 }));
    }

    #[test]
    fn test_interpolate_coefficients() {
        // f(x) = x^2 - 4x + 9
        let coeffs = interpolate(&pts(&[(5, 14), (-1, 14), (2, 5)])).unwrap();
        assert_eq!(coeffs, vec![Rational::from(1), Rational::from(-4), Rational::from(9)]);
    }

    #[test]
    fn test_skip_verification() {
        let points = pts(&[(1, 10), (2, 15), (3, 22)]);
        let config = RecoverConfig {
            verify: false,
            ..RecoverConfig::default()
        };
        let unchecked = reconstruct_secret(&points, 3, &config).unwrap();
        let checked = reconstruct_secret(&points, 3, &RecoverConfig::default()).unwrap();

        assert!(!unchecked.verified);
        assert!(checked.verified);
        assert_eq!(unchecked.secret, BigInt::from(7));
        assert_eq!(unchecked.secret, checked.secret);
        assert_eq!(unchecked.coefficients, checked.coefficients);
    }

    #[test]
    fn test_threshold_one() {
        let points = pts(&[(4, 17), (2, 11)]);
        assert_eq!(recover_secret(&points, 1).unwrap(), BigInt::from(11));
    }

    #[test]
    fn test_non_integral_truncates() {
        // Line through (1, -1) and (3, 0): slope 1/2, intercept -3/2
        let points = pts(&[(1, -1), (3, 0)]);
        let r = reconstruct_secret(&points, 2, &RecoverConfig::default()).unwrap();
        assert!(!r.is_exact());
        assert_eq!(r.constant_term.to_string(), "-3/2");
        assert_eq!(r.secret, BigInt::from(-1));
    }

    #[test]
    fn test_non_integral_strict() {
        let points = pts(&[(1, -1), (3, 0)]);
        let config = RecoverConfig {
            integrality: IntegralityPolicy::Strict,
            ..RecoverConfig::default()
        };
        let err = reconstruct_secret(&points, 2, &config).unwrap_err();
        assert_eq!(err, Error::NonIntegralSecret { value: "-3/2".into() });
    }

    #[test]
    fn test_vandermonde_rows() {
        let m = vandermonde_system(&pts(&[(2, 9), (-3, 1)])).unwrap();
        assert_eq!(m.dims(), (2, 3));
        assert_eq!(m.row(0), &[Rational::from(2), Rational::from(1), Rational::from(9)]);
        assert_eq!(m.row(1), &[Rational::from(-3), Rational::from(1), Rational::from(1)]);
    }

    #[test]
    fn test_evaluate() {
        let coeffs: Vec<BigInt> = vec![2, -1, 5].into_iter().map(BigInt::from).collect();
        assert_eq!(evaluate(&coeffs, &BigInt::from(3)), BigInt::from(20));
        assert_eq!(evaluate(&[], &BigInt::from(3)), BigInt::from(0));
    }

    #[test]
    fn test_round_trip_random_polynomials() {
        let mut rng = StdRng::seed_from_u64(7);

        for degree in 0..10 {
            // 256-bit coefficients
            let coeffs: Vec<BigInt> = (0..=degree).map(|_| random_big(&mut rng, 8)).collect();

            let mut xs: Vec<i64> = Vec::new();
            while xs.len() < degree + 1 {
                let x = rng.gen_range(-40..40);
                if !xs.contains(&x) {
                    xs.push(x);
                }
            }
            let points: Vec<SharePoint> = xs
                .iter()
                .map(|&x| {
                    let x = BigInt::from(x);
                    let y = evaluate(&coeffs, &x);
                    SharePoint { x, y }
                })
                .collect();

            let r = reconstruct_secret(&points, degree + 1, &RecoverConfig::default()).unwrap();
            assert_eq!(&r.secret, coeffs.last().unwrap());
            assert!(r.is_exact());
            let expected: Vec<Rational> = coeffs.iter().cloned().map(Rational::from).collect();
            assert_eq!(r.coefficients, expected);
        }
    }
}
