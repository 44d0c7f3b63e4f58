//! Complex numbers, the default numeric type of the engine.
//!
//! `Complex` is a plain two-component value type. Partial operations (division,
//! logarithm, powers of zero) return `Result` instead of producing NaN or infinity,
//! so a [`Function`](crate::Function) evaluated on complex inputs reports domain errors
//! instead of silently carrying them along.

use std::fmt::Display;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::errors::NumericError;
use crate::numeric::{integer_exponent, powi, Numeric};

/// A complex number `re + im·i` over `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    /// The real part
    pub re: f64,
    /// The imaginary part
    pub im: f64,
}

impl Complex {
    /// `0`
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    /// `1`
    pub const ONE: Complex = Complex::new(1.0, 0.0);
    /// The imaginary unit
    pub const I: Complex = Complex::new(0.0, 1.0);
    /// Euler's number
    pub const E: Complex = Complex::new(std::f64::consts::E, 0.0);

    /// Constructs a complex number from its real and imaginary parts.
    ///
    /// # Example
    /// ```
    /// use symfn::Complex;
    /// let z = Complex::new(3.0, -4.0);
    /// assert_eq!(z.re, 3.0);
    /// assert_eq!(z.im, -4.0);
    /// ```
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Constructs a complex number from magnitude and argument.
    #[must_use]
    pub fn from_polar(magnitude: f64, argument: f64) -> Self {
        Self::new(magnitude * argument.cos(), magnitude * argument.sin())
    }

    /// Magnitude `|z|`.
    ///
    /// # Example
    /// ```
    /// use symfn::Complex;
    /// assert_eq!(Complex::new(3.0, 4.0).abs(), 5.0);
    /// ```
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Squared magnitude, `re² + im²`
    #[must_use]
    pub fn norm_sqr(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Principal argument in `(-π, π]`
    #[must_use]
    pub fn arg(&self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Complex conjugate `re - im·i`
    #[must_use]
    pub const fn conj(&self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Reciprocal `1 / z`.
    ///
    /// Fails with [`NumericError::DivisionByZero`] only when `z` is exactly zero.
    pub fn recip(&self) -> Result<Self, NumericError> {
        Self::ONE.checked_div(self)
    }

    /// Division `self / rhs`.
    ///
    /// Uses Smith's algorithm: both parts are scaled by the larger component of `rhs`,
    /// so operands far below `sqrt(f64::MIN_POSITIVE)` do not underflow to a zero
    /// divisor.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, NumericError> {
        let (a, b) = (self.re, self.im);
        let (c, d) = (rhs.re, rhs.im);
        if c == 0.0 && d == 0.0 {
            return Err(NumericError::DivisionByZero);
        }
        if c.abs() >= d.abs() {
            let r = d / c;
            let den = c + d * r;
            Ok(Self::new((a + b * r) / den, (b - a * r) / den))
        } else {
            let r = c / d;
            let den = c * r + d;
            Ok(Self::new((a * r + b) / den, (b * r - a) / den))
        }
    }

    /// `e^z`
    #[must_use]
    pub fn exp(&self) -> Self {
        if self.im == 0.0 {
            return Self::new(self.re.exp(), 0.0);
        }
        Self::from_polar(self.re.exp(), self.im)
    }

    /// Principal natural logarithm `ln|z| + arg(z)·i`
    pub fn ln(&self) -> Result<Self, NumericError> {
        if *self == Self::ZERO {
            return Err(NumericError::LogarithmOfZero);
        }
        Ok(Self::new(self.abs().ln(), self.arg()))
    }

    /// Raises `self` to a complex power.
    ///
    /// Real integer exponents use repeated squaring, everything else goes through
    /// `exp(ln(z)·p)`. Zero raised to a positive real power is zero; any other power
    /// of zero is undefined.
    ///
    /// # Example
    /// ```
    /// use symfn::Complex;
    /// let z = Complex::new(1.0, 1.0);
    /// assert_eq!(z.pow(&Complex::from(2.0)).unwrap(), Complex::new(0.0, 2.0));
    /// ```
    pub fn pow(&self, exponent: &Self) -> Result<Self, NumericError> {
        if *self == Self::ZERO {
            if exponent.im == 0.0 && exponent.re > 0.0 {
                return Ok(Self::ZERO);
            }
            return Err(NumericError::ZeroToNonPositivePower {
                exponent: exponent.to_string(),
            });
        }
        if let Some(n) = integer_exponent(exponent) {
            return powi(self, n);
        }
        Ok((self.ln()? * *exponent).exp())
    }

    /// Sine
    #[must_use]
    pub fn sin(&self) -> Self {
        Self::new(
            self.re.sin() * self.im.cosh(),
            self.re.cos() * self.im.sinh(),
        )
    }

    /// Cosine
    #[must_use]
    pub fn cos(&self) -> Self {
        Self::new(
            self.re.cos() * self.im.cosh(),
            -self.re.sin() * self.im.sinh(),
        )
    }

    /// Tangent, undefined where the cosine vanishes
    pub fn tan(&self) -> Result<Self, NumericError> {
        self.sin().checked_div(&self.cos())
    }

    /// Cotangent, undefined where the sine vanishes
    pub fn cot(&self) -> Result<Self, NumericError> {
        self.cos().checked_div(&self.sin())
    }
}

impl Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im == 0.0 {
            write!(f, "{}", self.re)
        } else if self.re == 0.0 {
            write!(f, "{}i", self.im)
        } else if self.im > 0.0 {
            write!(f, "{} + {}i", self.re, self.im)
        } else {
            write!(f, "{} - {}i", self.re, -self.im)
        }
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::new(re, 0.0)
    }
}

impl From<(f64, f64)> for Complex {
    fn from((re, im): (f64, f64)) -> Self {
        Self::new(re, im)
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Complex {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Complex {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Numeric for Complex {
    fn zero() -> Self {
        Self::ZERO
    }

    fn one() -> Self {
        Self::ONE
    }

    fn e() -> Self {
        Self::E
    }

    fn from_real(value: f64) -> Self {
        Self::from(value)
    }

    fn to_real(&self) -> Option<f64> {
        (self.im == 0.0).then_some(self.re)
    }

    fn checked_div(&self, rhs: &Self) -> Result<Self, NumericError> {
        Complex::checked_div(self, rhs)
    }

    fn exp(&self) -> Self {
        Complex::exp(self)
    }

    fn ln(&self) -> Result<Self, NumericError> {
        Complex::ln(self)
    }

    fn pow(&self, exponent: &Self) -> Result<Self, NumericError> {
        Complex::pow(self, exponent)
    }

    fn recip(&self) -> Result<Self, NumericError> {
        Complex::recip(self)
    }
}
