//! Symbolic differentiation.
//!
//! The derivative of a node is built from the derivatives of its children with the
//! usual rules:
//!
//! | node          | derivative                               |
//! |---------------|------------------------------------------|
//! | `c`           | `0`                                      |
//! | `x^p`         | `p * x^(p-1)` (`1` when `p = 1`)         |
//! | `b^x`         | `ln(b) * b^x` (`e^x` itself for `b = e`) |
//! | `log_b(x)`    | `1/ln(b) * x^(-1)`                       |
//! | `f + g`       | `f' + g'`                                |
//! | `f * g`       | `f' * g + f * g'`                        |
//! | `f(g(x))`     | `f'(g(x)) * g'(x)`                       |
//!
//! Every result is assembled through the builder, so it comes out simplified.

use log::trace;

use crate::errors::FunctionError;
use crate::expr::{Expr, Function};
use crate::numeric::Numeric;

impl<T: Numeric> Function<T> {
    /// Returns the derivative of the function with respect to `x`.
    ///
    /// # Errors
    /// Building the chain rule may fold a composition with a constant inner function,
    /// which evaluates the outer one; its numeric errors are returned. Differentiating a
    /// logarithm also fails if `ln(base)` cannot be computed or inverted.
    ///
    /// # Example
    /// ```
    /// use symfn::{Complex, Function};
    ///
    /// // d/dx (x^2)^3 = 6x^5
    /// let f = Function::composition(
    ///     &Function::power(Complex::from(3.0)),
    ///     &Function::power(Complex::from(2.0)),
    /// )
    /// .unwrap();
    /// let df = f.derivative().unwrap();
    /// assert_eq!(df.evaluate(&Complex::from(2.0)).unwrap(), Complex::from(192.0));
    /// ```
    pub fn derivative(&self) -> Result<Function<T>, FunctionError> {
        let derived = match self.expr() {
            Expr::Constant(_) => Function::constant(T::zero()),

            Expr::Power(p) if p.is_one() => Function::constant(T::one()),
            Expr::Power(p) => Function::product(
                &Function::constant(p.clone()),
                &Function::power(p.clone() - T::one()),
            ),

            Expr::Exponential(b) if *b == T::e() => self.clone(),
            Expr::Exponential(b) => Function::product(&Function::constant(b.ln()?), self),

            Expr::Logarithm(b) if *b == T::e() => Function::power(-T::one()),
            Expr::Logarithm(b) => Function::product(
                &Function::constant(b.ln()?.recip()?),
                &Function::power(-T::one()),
            ),

            Expr::Sum(left, right) => Function::sum(&left.derivative()?, &right.derivative()?),

            Expr::Product(left, right) => Function::sum(
                &Function::product(&left.derivative()?, right),
                &Function::product(left, &right.derivative()?),
            ),

            Expr::Composition(outer, inner) => Function::product(
                &Function::composition(&outer.derivative()?, inner)?,
                &inner.derivative()?,
            ),
        };

        trace!("d/dx of {:?} node -> {:?} node", self.kind(), derived.kind());
        Ok(derived)
    }

    /// Returns the `n`-th derivative. `n = 0` returns the function itself.
    ///
    /// # Example
    /// ```
    /// use symfn::{Complex, Function};
    ///
    /// let f = Function::power(Complex::from(4.0));
    /// // d³/dx³ x^4 = 24x
    /// let d3 = f.nth_derivative(3).unwrap();
    /// assert_eq!(d3.evaluate(&Complex::from(2.0)).unwrap(), Complex::from(48.0));
    /// ```
    pub fn nth_derivative(&self, n: usize) -> Result<Function<T>, FunctionError> {
        let mut current = self.clone();
        for _ in 0..n {
            if current.is_constant_value(&T::zero()) {
                break;
            }
            current = current.derivative()?;
        }
        Ok(current)
    }
}
