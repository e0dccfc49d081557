//! Dense matrix operations
//!
//! Row-major dense matrix representation. The augmented system handed to the
//! solver is a `Matrix<Rational>` with one more column than rows.

use crate::error::{Error, Result};
use crate::rational::Rational;
use num_bigint::BigInt;

/// Dense matrix in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

/// n x (n+1) system: n coefficient columns plus the constant column
pub type AugmentedMatrix = Matrix<Rational>;

impl<T: Clone> Matrix<T> {
    /// Create a matrix from a flat vector (row-major order)
    pub fn from_flat(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::MalformedMatrix { rows, cols });
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix from nested rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(Error::MalformedMatrix { rows: n_rows, cols: bad.len() });
        }
        let data = rows.into_iter().flatten().collect();
        Ok(Self { data, rows: n_rows, cols: n_cols })
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Access element at (i, j)
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[i * self.cols + j]
    }

    /// Mutable access to element at (i, j)
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut T {
        &mut self.data[i * self.cols + j]
    }

    /// Get a row as a slice
    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.data.split_at_mut(hi * self.cols);
        head[lo * self.cols..(lo + 1) * self.cols].swap_with_slice(&mut tail[..self.cols]);
    }
}

impl Matrix<Rational> {
    /// Create a zero rational matrix
    pub fn zeros_rational(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![Rational::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Lift integer rows into exact rationals
    pub fn from_integer_rows(rows: Vec<Vec<BigInt>>) -> Result<Self> {
        Self::from_rows(
            rows.into_iter()
                .map(|r| r.into_iter().map(Rational::from_int).collect())
                .collect(),
        )
    }

    /// Number of unknowns, checking the n x (n+1) shape
    pub fn unknowns(&self) -> Result<usize> {
        if self.cols != self.rows + 1 {
            return Err(Error::MalformedMatrix { rows: self.rows, cols: self.cols });
        }
        Ok(self.rows)
    }
}
