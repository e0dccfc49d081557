//! Error types for secret reconstruction

use num_bigint::BigInt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid radix {radix}: must be between 2 and 36")]
    InvalidRadix { radix: u32 },

    #[error("invalid character '{ch}' at position {position}")]
    InvalidDigit { ch: char, position: usize },

    #[error("digit '{ch}' (value {digit}) is out of range for radix {radix}")]
    DigitOutOfRange { ch: char, digit: u32, radix: u32 },

    #[error("encoded value is empty")]
    EmptyValue,

    #[error("duplicate x-coordinate {x} among selected shares")]
    DuplicatePoint { x: BigInt },

    #[error("matrix is singular: no unique solution (column {column})")]
    SingularMatrix { column: usize },

    #[error("division by zero in exact rational arithmetic")]
    DivisionByZero,

    #[error("invalid threshold k = {k}")]
    InvalidThreshold { k: usize },

    #[error("need {required} shares, got {provided}")]
    InsufficientShares { required: usize, provided: usize },

    #[error("augmented matrix must be n x (n+1), got {rows} x {cols}")]
    MalformedMatrix { rows: usize, cols: usize },

    #[error("solution does not satisfy the system it was solved from")]
    VerificationFailed,

    #[error("constant term {value} is not an integer")]
    NonIntegralSecret { value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
