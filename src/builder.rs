//! Smart constructors for building simplified expression trees.
//!
//! Every node in the crate is created here. Each constructor applies its algebraic
//! identities before allocating, so a tree never contains a node that could be written
//! more simply:
//!
//! - `x^0` becomes `1`, `1^x` becomes `1`
//! - `0 + f` and `f + 0` become `f`
//! - `0 * f` becomes `0`, `1 * f` becomes `f`
//! - `f(c)` becomes the constant `f(c)`, `c ∘ g` becomes `c`, and `x ∘ g` becomes `g`
//!
//! Constructors that can fail return `Result<Function<T>, FunctionError>`. Failures are
//! either invalid parameters (logarithm base 0 or 1, exponent base 0) or numeric errors
//! raised while folding a composition with a constant inner function.
//!
//! The arithmetic operators are implemented on `Function` and `&Function` and forward
//! to these constructors.

use std::ops::{Add, Mul, Neg, Sub};

use log::trace;

use crate::errors::FunctionError;
use crate::expr::{Expr, Function};
use crate::numeric::Numeric;

impl<T: Numeric> Function<T> {
    /// Creates the constant function `f(x) = c`.
    pub fn constant(c: T) -> Self {
        Self::from_expr(Expr::Constant(c))
    }

    /// Creates the power function `f(x) = x^p`.
    ///
    /// `x^0` is folded to the constant 1.
    ///
    /// # Example
    /// ```
    /// use symfn::{Complex, Function};
    ///
    /// let cube = Function::power(Complex::from(3.0));
    /// assert_eq!(cube.evaluate(&Complex::from(2.0)).unwrap(), Complex::from(8.0));
    ///
    /// let one = Function::power(Complex::ZERO);
    /// assert_eq!(one.as_constant(), Some(&Complex::ONE));
    /// ```
    pub fn power(p: T) -> Self {
        if p.is_zero() {
            trace!("power: x^0 folded to 1");
            return Self::constant(T::one());
        }
        Self::from_expr(Expr::Power(p))
    }

    /// Creates the identity function `f(x) = x`, i.e. `x^1`.
    pub fn identity() -> Self {
        Self::power(T::one())
    }

    /// Creates the exponential function `f(x) = base^x`.
    ///
    /// Base 1 folds to the constant 1. Base 0 is rejected.
    pub fn exponent(base: T) -> Result<Self, FunctionError> {
        if base.is_zero() {
            return Err(FunctionError::InvalidExponentBase(base.to_string()));
        }
        if base.is_one() {
            trace!("exponent: 1^x folded to 1");
            return Ok(Self::constant(T::one()));
        }
        Ok(Self::from_expr(Expr::Exponential(base)))
    }

    /// Creates the natural exponential `f(x) = e^x`.
    pub fn natural_exponent() -> Self {
        Self::from_expr(Expr::Exponential(T::e()))
    }

    /// Creates the logarithm `f(x) = log_base(x)`.
    ///
    /// # Errors
    /// Returns `FunctionError::InvalidLogarithmBase` for base 0 or 1.
    ///
    /// # Example
    /// ```
    /// use symfn::{Complex, Function, FunctionError};
    ///
    /// let log2 = Function::logarithm(Complex::from(2.0)).unwrap();
    /// assert_eq!(log2.to_string(), "log_2(x)");
    ///
    /// assert!(matches!(
    ///     Function::logarithm(Complex::ONE),
    ///     Err(FunctionError::InvalidLogarithmBase(_))
    /// ));
    /// ```
    pub fn logarithm(base: T) -> Result<Self, FunctionError> {
        if base.is_zero() || base.is_one() {
            return Err(FunctionError::InvalidLogarithmBase(base.to_string()));
        }
        Ok(Self::from_expr(Expr::Logarithm(base)))
    }

    /// Creates the natural logarithm `f(x) = ln(x)`.
    pub fn natural_logarithm() -> Self {
        Self::from_expr(Expr::Logarithm(T::e()))
    }

    /// Creates `f(x) + g(x)`. A zero constant on either side returns the other operand.
    pub fn sum(f: &Function<T>, g: &Function<T>) -> Self {
        if f.is_constant_value(&T::zero()) {
            trace!("sum: 0 + g folded to g");
            return g.clone();
        }
        if g.is_constant_value(&T::zero()) {
            trace!("sum: f + 0 folded to f");
            return f.clone();
        }
        Self::from_expr(Expr::Sum(f.clone(), g.clone()))
    }

    /// Creates `f(x) * g(x)`.
    ///
    /// A zero constant on either side gives the constant 0; a unit constant on either
    /// side returns the other operand.
    pub fn product(f: &Function<T>, g: &Function<T>) -> Self {
        let zero = T::zero();
        if f.is_constant_value(&zero) || g.is_constant_value(&zero) {
            trace!("product: factor 0 folded to 0");
            return Self::constant(zero);
        }
        let one = T::one();
        if f.is_constant_value(&one) {
            trace!("product: 1 * g folded to g");
            return g.clone();
        }
        if g.is_constant_value(&one) {
            trace!("product: f * 1 folded to f");
            return f.clone();
        }
        Self::from_expr(Expr::Product(f.clone(), g.clone()))
    }

    /// Creates the composition `f(g(x))`, with `f` as the outer function.
    ///
    /// - A constant `g` is evaluated immediately: the result is the constant `f(g)`
    /// - A constant `f` is returned as is
    /// - The identity on either side returns the other function
    ///
    /// # Errors
    /// Folding a constant inner function evaluates `f`, so any numeric error of that
    /// evaluation is returned.
    ///
    /// # Example
    /// ```
    /// use symfn::{Complex, Function};
    ///
    /// let ln_of_square = Function::composition(
    ///     &Function::natural_logarithm(),
    ///     &Function::power(Complex::from(2.0)),
    /// )
    /// .unwrap();
    /// assert_eq!(ln_of_square.to_string(), "ln(x^2)");
    ///
    /// // a constant inner function folds the whole composition
    /// let folded = Function::composition(
    ///     &Function::power(Complex::from(2.0)),
    ///     &Function::constant(Complex::from(3.0)),
    /// )
    /// .unwrap();
    /// assert_eq!(folded.as_constant(), Some(&Complex::from(9.0)));
    /// ```
    pub fn composition(f: &Function<T>, g: &Function<T>) -> Result<Self, FunctionError> {
        if let Some(c) = g.as_constant() {
            trace!("composition: constant inner function folded");
            return Ok(Self::constant(f.evaluate(c)?));
        }
        if f.is_constant() {
            trace!("composition: constant outer function kept");
            return Ok(f.clone());
        }
        if f.is_identity() {
            trace!("composition: x(g) folded to g");
            return Ok(g.clone());
        }
        if g.is_identity() {
            trace!("composition: f(x) folded to f");
            return Ok(f.clone());
        }
        Ok(Self::from_expr(Expr::Composition(f.clone(), g.clone())))
    }

    /// Creates `f(x) - g(x)` as `f + (-1) * g`.
    pub fn difference(f: &Function<T>, g: &Function<T>) -> Self {
        Self::sum(f, &Self::negative(g))
    }

    /// Creates `f(x) / g(x)` as `f * g^(-1)`.
    pub fn division(f: &Function<T>, g: &Function<T>) -> Result<Self, FunctionError> {
        let reciprocal = Self::composition(&Self::power(-T::one()), g)?;
        Ok(Self::product(f, &reciprocal))
    }

    /// Creates `-f(x)` as `(-1) * f`.
    pub fn negative(f: &Function<T>) -> Self {
        Self::product(&Self::constant(-T::one()), f)
    }

    /// Creates `g(x)^p`.
    pub fn power_of(g: &Function<T>, p: T) -> Result<Self, FunctionError> {
        Self::composition(&Self::power(p), g)
    }

    /// Creates `g(x)^2`.
    pub fn square(g: &Function<T>) -> Result<Self, FunctionError> {
        Self::power_of(g, T::from_real(2.0))
    }

    /// Creates `e^g(x)`.
    pub fn exponent_of(g: &Function<T>) -> Result<Self, FunctionError> {
        Self::composition(&Self::natural_exponent(), g)
    }

    /// Creates `base^g(x)`, expressed as `e^(ln(base) * g(x))`.
    ///
    /// # Example
    /// ```
    /// use symfn::{Complex, Function};
    ///
    /// let g = Function::power(Complex::from(2.0));
    /// let f = Function::exponent_with_base(Complex::from(2.0), &g).unwrap();
    /// let value = f.evaluate(&Complex::from(3.0)).unwrap();
    /// assert!((value - Complex::from(512.0)).abs() < 1e-9);
    /// ```
    pub fn exponent_with_base(base: T, g: &Function<T>) -> Result<Self, FunctionError> {
        if base.is_zero() {
            return Err(FunctionError::InvalidExponentBase(base.to_string()));
        }
        let ln_base = base.ln()?;
        Self::exponent_of(&Self::product(&Self::constant(ln_base), g))
    }

    /// Creates `log_base(g(x))`.
    pub fn logarithm_of(g: &Function<T>, base: T) -> Result<Self, FunctionError> {
        Self::composition(&Self::logarithm(base)?, g)
    }

    /// Creates `self(inner(x))`. Same as [`Function::composition`].
    pub fn compose(&self, inner: &Function<T>) -> Result<Self, FunctionError> {
        Self::composition(self, inner)
    }
}

impl<T: Numeric> Add for &Function<T> {
    type Output = Function<T>;

    fn add(self, rhs: Self) -> Function<T> {
        Function::sum(self, rhs)
    }
}

impl<T: Numeric> Add for Function<T> {
    type Output = Function<T>;

    fn add(self, rhs: Self) -> Function<T> {
        Function::sum(&self, &rhs)
    }
}

impl<T: Numeric> Sub for &Function<T> {
    type Output = Function<T>;

    fn sub(self, rhs: Self) -> Function<T> {
        Function::difference(self, rhs)
    }
}

impl<T: Numeric> Sub for Function<T> {
    type Output = Function<T>;

    fn sub(self, rhs: Self) -> Function<T> {
        Function::difference(&self, &rhs)
    }
}

impl<T: Numeric> Mul for &Function<T> {
    type Output = Function<T>;

    fn mul(self, rhs: Self) -> Function<T> {
        Function::product(self, rhs)
    }
}

impl<T: Numeric> Mul for Function<T> {
    type Output = Function<T>;

    fn mul(self, rhs: Self) -> Function<T> {
        Function::product(&self, &rhs)
    }
}

/// Scaling by a value puts the constant factor on the left: `f * c` is `c * f`.
impl<T: Numeric> Mul<T> for &Function<T> {
    type Output = Function<T>;

    fn mul(self, rhs: T) -> Function<T> {
        Function::product(&Function::constant(rhs), self)
    }
}

impl<T: Numeric> Mul<T> for Function<T> {
    type Output = Function<T>;

    fn mul(self, rhs: T) -> Function<T> {
        Function::product(&Function::constant(rhs), &self)
    }
}

impl<T: Numeric> Neg for &Function<T> {
    type Output = Function<T>;

    fn neg(self) -> Function<T> {
        Function::negative(self)
    }
}

impl<T: Numeric> Neg for Function<T> {
    type Output = Function<T>;

    fn neg(self) -> Function<T> {
        Function::negative(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::Complex;
    use crate::expr::FunctionKind;
    use approx::assert_abs_diff_eq;

    fn c(value: f64) -> Complex {
        Complex::from(value)
    }

    #[test]
    fn test_power_zero_folds() {
        let f = Function::power(Complex::ZERO);
        assert_eq!(f.as_constant(), Some(&Complex::ONE));
    }

    #[test]
    fn test_logarithm_invalid_bases() {
        assert_eq!(
            Function::logarithm(Complex::ZERO),
            Err(FunctionError::InvalidLogarithmBase("0".to_string()))
        );
        assert_eq!(
            Function::logarithm(Complex::ONE),
            Err(FunctionError::InvalidLogarithmBase("1".to_string()))
        );
        assert!(Function::logarithm(c(10.0)).is_ok());
    }

    #[test]
    fn test_exponent_bases() {
        assert_eq!(
            Function::exponent(Complex::ZERO),
            Err(FunctionError::InvalidExponentBase("0".to_string()))
        );
        let one = Function::exponent(Complex::ONE).unwrap();
        assert_eq!(one.as_constant(), Some(&Complex::ONE));
        assert_eq!(
            Function::exponent(c(2.0)).unwrap().kind(),
            FunctionKind::Exponential
        );
        assert_eq!(
            Function::<Complex>::natural_exponent().parameter(),
            Some(&Complex::E)
        );
    }

    #[test]
    fn test_sum_zero_returns_operand() {
        let f = Function::power(c(3.0));
        let zero = Function::constant(Complex::ZERO);
        assert!(Function::sum(&zero, &f).ptr_eq(&f));
        assert!(Function::sum(&f, &zero).ptr_eq(&f));
    }

    #[test]
    fn test_sum_of_constants_not_folded() {
        let s = Function::sum(&Function::constant(c(2.0)), &Function::constant(c(3.0)));
        assert_eq!(s.kind(), FunctionKind::Sum);
        assert_eq!(s.evaluate(&Complex::ZERO).unwrap(), c(5.0));
    }

    #[test]
    fn test_product_rules() {
        let f = Function::natural_logarithm();
        let zero = Function::constant(Complex::ZERO);
        let one = Function::constant(Complex::ONE);

        assert_eq!(Function::product(&zero, &f).as_constant(), Some(&Complex::ZERO));
        assert_eq!(Function::product(&f, &zero).as_constant(), Some(&Complex::ZERO));
        assert!(Function::product(&one, &f).ptr_eq(&f));
        assert!(Function::product(&f, &one).ptr_eq(&f));
        assert_eq!(Function::product(&f, &f).kind(), FunctionKind::Product);
    }

    #[test]
    fn test_composition_constant_inner_folds() {
        let f =
            Function::composition(&Function::power(c(3.0)), &Function::constant(c(2.0))).unwrap();
        assert_eq!(f.as_constant(), Some(&c(8.0)));
    }

    #[test]
    fn test_composition_constant_inner_propagates_errors() {
        let err = Function::composition(
            &Function::natural_logarithm(),
            &Function::constant(Complex::ZERO),
        );
        assert!(matches!(err, Err(FunctionError::Numeric(_))));
    }

    #[test]
    fn test_composition_identity_rules() {
        let g = Function::power(c(2.0));
        let k = Function::constant(c(7.0));
        let id = Function::identity();

        assert!(Function::composition(&k, &g).unwrap().ptr_eq(&k));
        assert!(Function::composition(&id, &g).unwrap().ptr_eq(&g));
        assert!(Function::composition(&g, &id).unwrap().ptr_eq(&g));
    }

    #[test]
    fn test_difference_and_negative() {
        let f = Function::power(c(2.0));
        let g = Function::identity();
        let d = Function::difference(&f, &g);
        // 9 - 3
        assert_eq!(d.evaluate(&c(3.0)).unwrap(), c(6.0));

        let n = Function::negative(&f);
        assert_eq!(n.evaluate(&c(3.0)).unwrap(), c(-9.0));
        assert_eq!(n.to_string(), "((-1) * x^2)");
    }

    #[test]
    fn test_division() {
        let f = Function::power(c(3.0));
        let g = Function::sum(&Function::identity(), &Function::constant(Complex::ONE));
        let q = Function::division(&f, &g).unwrap();
        // 8 / 3
        assert_abs_diff_eq!(q.evaluate(&c(2.0)).unwrap().re, 8.0 / 3.0, epsilon = 1e-12);

        // dividing by a constant folds the reciprocal
        let half = Function::division(&f, &Function::constant(c(2.0))).unwrap();
        assert_eq!(half.evaluate(&c(2.0)).unwrap(), c(4.0));

        assert!(Function::division(&f, &Function::constant(Complex::ZERO)).is_err());
    }

    #[test]
    fn test_composite_constructors() {
        let x = Function::identity();
        let squared =
            Function::square(&Function::sum(&x, &Function::constant(Complex::ONE))).unwrap();
        assert_eq!(squared.evaluate(&c(2.0)).unwrap(), c(9.0));

        let e_x2 = Function::exponent_of(&Function::power(c(2.0))).unwrap();
        assert_abs_diff_eq!(
            e_x2.evaluate(&c(1.0)).unwrap().re,
            std::f64::consts::E,
            epsilon = 1e-12
        );

        let log_base = Function::logarithm_of(&Function::power(c(3.0)), c(2.0)).unwrap();
        assert_abs_diff_eq!(log_base.evaluate(&c(2.0)).unwrap().re, 3.0, epsilon = 1e-12);

        assert!(Function::logarithm_of(&x, Complex::ONE).is_err());
        assert!(Function::exponent_with_base(Complex::ZERO, &x).is_err());
    }

    #[test]
    fn test_exponent_with_base() {
        let f = Function::exponent_with_base(c(3.0), &Function::identity()).unwrap();
        assert_abs_diff_eq!(f.evaluate(&c(2.0)).unwrap().re, 9.0, epsilon = 1e-9);
        assert_eq!(f.kind(), FunctionKind::Composition);
    }

    #[test]
    fn test_operators() {
        let x = Function::<Complex>::identity();
        let sq = Function::power(c(2.0));

        let sum = &sq + &x;
        assert_eq!(sum.evaluate(&c(3.0)).unwrap(), c(12.0));

        let diff = &sq - &x;
        assert_eq!(diff.evaluate(&c(3.0)).unwrap(), c(6.0));

        let prod = &sq * &x;
        assert_eq!(prod.evaluate(&c(3.0)).unwrap(), c(27.0));

        let scaled = &sq * c(2.0);
        assert_eq!(scaled.to_string(), "(2 * x^2)");

        let neg = -sq.clone();
        assert_eq!(neg.evaluate(&c(2.0)).unwrap(), c(-4.0));

        let owned = sq.clone() + x.clone() * c(3.0);
        assert_eq!(owned.evaluate(&c(1.0)).unwrap(), c(4.0));

        let composed = Function::natural_logarithm().compose(&sq).unwrap();
        assert_eq!(composed.to_string(), "ln(x^2)");
    }
}
