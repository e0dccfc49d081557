//! Exact linear system solver
//!
//! Gaussian elimination over [`Rational`] entries. Pivoting only looks for a
//! nonzero entry: with exact arithmetic there is no rounding error to
//! minimize, the pivot just has to be a valid divisor.

use crate::error::{Error, Result};
use crate::matrix::AugmentedMatrix;
use crate::rational::Rational;
use std::time::Instant;

/// Counters and timing for one solve
#[derive(Debug, Clone, Default)]
pub struct SolveStats {
    /// Unknowns in the system
    pub n: usize,
    /// Row swaps performed while searching for pivots
    pub row_swaps: usize,
    /// Row reductions applied during forward elimination
    pub eliminated_rows: usize,
    pub elimination_time: f64,
    pub substitution_time: f64,
    pub total_time: f64,
}

/// Exact Gaussian elimination solver
///
/// Stateless; every call owns the matrix it is given, so a single solver can
/// be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianSolver;

impl GaussianSolver {
    pub fn new() -> Self {
        Self
    }

    /// Solve the n x (n+1) system, consuming the matrix
    pub fn solve(&self, matrix: AugmentedMatrix) -> Result<Vec<Rational>> {
        self.solve_with_stats(matrix).map(|(x, _)| x)
    }

    /// Solve and report elimination statistics
    ///
    /// # Returns
    /// * The unique solution, index `i` matching column `i`
    /// * [`Error::SingularMatrix`] if no pivot exists for some column
    pub fn solve_with_stats(&self, mut matrix: AugmentedMatrix) -> Result<(Vec<Rational>, SolveStats)> {
        let start = Instant::now();
        let n = matrix.unknowns()?;
        let mut stats = SolveStats { n, ..SolveStats::default() };

        // 1. Forward elimination
        let elim_start = Instant::now();
        for i in 0..n {
            let pivot_row = (i..n)
                .find(|&r| !matrix.get(r, i).is_zero())
                .ok_or(Error::SingularMatrix { column: i })?;

            if pivot_row != i {
                matrix.swap_rows(i, pivot_row);
                stats.row_swaps += 1;
            }

            let pivot: Vec<Rational> = matrix.row(i)[i..].to_vec();
            for k in (i + 1)..n {
                if matrix.get(k, i).is_zero() {
                    continue;
                }
                let multiplier = matrix.get(k, i).checked_div(&pivot[0])?;
                for (offset, p) in pivot.iter().enumerate() {
                    let entry = matrix.get_mut(k, i + offset);
                    *entry = &*entry - &(&multiplier * p);
                }
                stats.eliminated_rows += 1;
            }
        }
        stats.elimination_time = elim_start.elapsed().as_secs_f64();

        // 2. Back substitution
        let subst_start = Instant::now();
        let mut solution = vec![Rational::zero(); n];
        for i in (0..n).rev() {
            let diag = matrix.get(i, i);
            if diag.is_zero() {
                return Err(Error::SingularMatrix { column: i });
            }

            let mut sum = matrix.get(i, n).clone();
            for j in (i + 1)..n {
                let a_ij = matrix.get(i, j);
                if !a_ij.is_zero() {
                    sum = &sum - &(a_ij * &solution[j]);
                }
            }
            solution[i] = sum.checked_div(diag)?;
        }
        stats.substitution_time = subst_start.elapsed().as_secs_f64();
        stats.total_time = start.elapsed().as_secs_f64();

        Ok((solution, stats))
    }
}

/// Solve with a default [`GaussianSolver`]
pub fn solve(matrix: AugmentedMatrix) -> Result<Vec<Rational>> {
    GaussianSolver::new().solve(matrix)
}

/// Check that `x` satisfies every equation of `matrix` with zero residual
pub fn verify_solution(matrix: &AugmentedMatrix, x: &[Rational]) -> bool {
    let Ok(n) = matrix.unknowns() else {
        return false;
    };
    if x.len() != n {
        return false;
    }

    (0..n).all(|i| {
        let row = matrix.row(i);
        let lhs = row[..n]
            .iter()
            .zip(x)
            .fold(Rational::zero(), |acc, (a, xi)| &acc + &(a * xi));
        lhs == row[n]
    })
}
