//! The numeric contract the expression engine is generic over.
//!
//! A [`Function`](crate::Function) never does arithmetic itself. Every value it produces
//! comes from the operations below, and every domain failure is reported by them as a
//! [`NumericError`]. The crate ships two implementations: [`Complex`](crate::Complex)
//! (the default) and `f64`.

use std::fmt::{Debug, Display};
use std::ops::{Add, Mul, Neg, Sub};

use crate::errors::NumericError;

/// Values a [`Function`](crate::Function) can be built from and evaluated on.
///
/// Equality must be exact value equality: the builder relies on `== zero()` and
/// `== one()` to decide which simplifications apply.
pub trait Numeric:
    Clone
    + PartialEq
    + Debug
    + Display
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Euler's number, the base of the natural exponential and logarithm
    fn e() -> Self;

    /// Converts a real scalar into this type
    fn from_real(value: f64) -> Self;

    /// Returns the value as a real scalar if it has no imaginary component
    fn to_real(&self) -> Option<f64>;

    /// Divides `self` by `rhs`, failing when `rhs` has zero magnitude
    fn checked_div(&self, rhs: &Self) -> Result<Self, NumericError>;

    /// Raises e to the power `self`
    fn exp(&self) -> Self;

    /// Principal natural logarithm
    fn ln(&self) -> Result<Self, NumericError>;

    /// Raises `self` to the power `exponent`
    fn pow(&self, exponent: &Self) -> Result<Self, NumericError>;

    /// Multiplicative inverse
    fn recip(&self) -> Result<Self, NumericError> {
        Self::one().checked_div(self)
    }

    /// Logarithm of `self` in the given base
    fn log(&self, base: &Self) -> Result<Self, NumericError> {
        if *base == Self::e() {
            return self.ln();
        }
        self.ln()?.checked_div(&base.ln()?)
    }

    /// Returns true if the value is exactly zero
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Returns true if the value is exactly one
    fn is_one(&self) -> bool {
        *self == Self::one()
    }
}

/// Returns the exponent as an `i32` when it is a real integer.
pub(crate) fn integer_exponent<T: Numeric>(exponent: &T) -> Option<i32> {
    let real = exponent.to_real()?;
    if real.fract() == 0.0 && real.abs() <= i32::MAX as f64 {
        Some(real as i32)
    } else {
        None
    }
}

/// Binary exponentiation for integer exponents.
///
/// Small integer powers come out exact instead of going through `exp(ln(z) * n)`.
/// A negative exponent inverts the base first and raises the inverse to `|exp|`,
/// so only an exactly zero base fails.
pub(crate) fn powi<T: Numeric>(base: &T, exp: i32) -> Result<T, NumericError> {
    let mut result = T::one();
    let mut current = if exp < 0 { base.recip()? } else { base.clone() };
    let mut remaining = exp.unsigned_abs();

    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result * current.clone();
        }
        if remaining > 1 {
            current = current.clone() * current;
        }
        remaining >>= 1;
    }

    Ok(result)
}

impl Numeric for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn e() -> Self {
        std::f64::consts::E
    }

    fn from_real(value: f64) -> Self {
        value
    }

    fn to_real(&self) -> Option<f64> {
        Some(*self)
    }

    fn checked_div(&self, rhs: &Self) -> Result<Self, NumericError> {
        if *rhs == 0.0 {
            return Err(NumericError::DivisionByZero);
        }
        Ok(self / rhs)
    }

    fn exp(&self) -> Self {
        f64::exp(*self)
    }

    fn ln(&self) -> Result<Self, NumericError> {
        if *self == 0.0 {
            return Err(NumericError::LogarithmOfZero);
        }
        if *self < 0.0 {
            return Err(NumericError::OutOfRealDomain {
                operation: "logarithm of a negative number",
            });
        }
        Ok(f64::ln(*self))
    }

    fn pow(&self, exponent: &Self) -> Result<Self, NumericError> {
        if *self == 0.0 {
            if *exponent > 0.0 {
                return Ok(0.0);
            }
            return Err(NumericError::ZeroToNonPositivePower {
                exponent: exponent.to_string(),
            });
        }
        if let Some(n) = integer_exponent(exponent) {
            return Ok(self.powi(n));
        }
        if *self < 0.0 {
            return Err(NumericError::OutOfRealDomain {
                operation: "fractional power of a negative number",
            });
        }
        Ok(self.powf(*exponent))
    }
}
