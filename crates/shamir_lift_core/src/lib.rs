//! Shamir Lift Core Library
//!
//! Exact secret reconstruction for threshold (Shamir-style) secret sharing.
//!
//! # Overview
//!
//! Given k shares `(x, y)` on an unknown polynomial of degree k-1, the secret
//! is the polynomial's constant term. This crate recovers it by solving the
//! Vandermonde system with Gaussian elimination over exact rationals, so no
//! intermediate value is ever rounded or overflowed.
//!
//! # Key Components
//!
//! - [`integer`] - Big-integer helpers (gcd, truncating division)
//! - [`rational`] - Exact rational number type
//! - [`radix`] - Base-N decoding of share values
//! - [`matrix`] - Dense matrix and augmented system
//! - [`solve`] - Exact Gaussian elimination
//! - [`interpolate`] - Share selection and secret reconstruction
//! - [`descriptor`] - JSON share descriptor loading

pub mod error;
pub mod integer;
pub mod rational;
pub mod radix;
pub mod matrix;
pub mod solve;
pub mod interpolate;
pub mod descriptor;

pub use error::{Error, Result};
pub use rational::Rational;
pub use matrix::{AugmentedMatrix, Matrix};
pub use solve::{GaussianSolver, SolveStats, verify_solution};
pub use interpolate::{
    IntegralityPolicy, Reconstruction, RecoverConfig, SharePoint,
    interpolate, reconstruct_secret, recover_secret, select_points, vandermonde_system,
};
pub use descriptor::{DescriptorError, ShareSet};
