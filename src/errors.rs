//! Error types for the symfn crate.
//!
//! Errors are layered the same way the engine is:
//!
//! - `NumericError`: domain failures raised by a numeric type (division by zero,
//!   logarithm of zero, ...). The expression engine never produces these itself,
//!   it only forwards them.
//! - `FunctionError`: everything a caller of the public API can observe, including
//!   invalid construction arguments and wrapped numeric failures.

use thiserror::Error;

/// Domain errors signaled by an implementation of [`Numeric`](crate::numeric::Numeric).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    /// The divisor is exactly zero
    #[error("division by zero")]
    DivisionByZero,
    /// The logarithm of zero is undefined for every base
    #[error("logarithm of 0 is undefined")]
    LogarithmOfZero,
    /// Zero raised to an exponent that is not a positive real number
    #[error("0 raised to the power {exponent} is undefined")]
    ZeroToNonPositivePower { exponent: String },
    /// A real-valued implementation was asked for a result that only exists in C
    #[error("{operation} has no real result")]
    OutOfRealDomain { operation: &'static str },
}

/// High-level errors returned by function construction, evaluation and differentiation.
///
/// Construction errors are raised eagerly by the builder; evaluation errors wrap the
/// underlying [`NumericError`] unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    /// Logarithm bases of 0 and 1 do not define a function
    #[error("invalid logarithm base: log_({0})(x)")]
    InvalidLogarithmBase(String),
    /// An exponential base of 0 does not define a function
    #[error("invalid exponent base: ({0})^x")]
    InvalidExponentBase(String),
    /// Error raised by the numeric type while evaluating
    #[error("numeric error: {0}")]
    Numeric(#[from] NumericError),
    /// Error when the output container does not match the number of results
    #[error("Invalid output length: expected {expected}, got {got}")]
    InvalidOutputLength { expected: usize, got: usize },
}
