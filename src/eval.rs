//! Evaluation of functions at numeric points.
//!
//! Two evaluators are provided and they always agree:
//!
//! - [`Function::evaluate`] walks the tree recursively.
//! - [`FlattenedExpr::evaluate`] runs the linear program produced by
//!   [`Function::flatten`] with an explicit value stack and input stack.
//!
//! Batch evaluation and [`Function::compile`] use the second one, after running the
//! program through the [`opt`](crate::opt) pipeline.

use std::sync::Arc;

use rayon::prelude::*;

use crate::backends::vector::Vector;
use crate::errors::{FunctionError, NumericError};
use crate::expr::{Expr, FlattenedExpr, Function, LinearOp};
use crate::numeric::Numeric;
use crate::opt;
use crate::types::CompiledFunction;

/// `base^x`, through `exp` when the base is e.
pub(crate) fn exponential<T: Numeric>(base: &T, x: &T) -> Result<T, NumericError> {
    if *base == T::e() {
        Ok(x.exp())
    } else {
        base.pow(x)
    }
}

impl<T: Numeric> Function<T> {
    /// Evaluates the function at `x`.
    ///
    /// # Errors
    /// Numeric domain errors (logarithm of zero, zero to a non-positive power, ...) are
    /// returned unchanged, wrapped in `FunctionError::Numeric`.
    ///
    /// # Example
    /// ```
    /// use symfn::{Complex, Function};
    ///
    /// let f = Function::natural_logarithm();
    /// assert_eq!(f.evaluate(&Complex::ONE).unwrap(), Complex::ZERO);
    /// assert!(f.evaluate(&Complex::ZERO).is_err());
    /// ```
    pub fn evaluate(&self, x: &T) -> Result<T, FunctionError> {
        let value = match self.expr() {
            Expr::Constant(c) => c.clone(),
            Expr::Power(p) => x.pow(p)?,
            Expr::Exponential(b) => exponential(b, x)?,
            Expr::Logarithm(b) => x.log(b)?,
            Expr::Sum(left, right) => left.evaluate(x)? + right.evaluate(x)?,
            Expr::Product(left, right) => left.evaluate(x)? * right.evaluate(x)?,
            Expr::Composition(outer, inner) => outer.evaluate(&inner.evaluate(x)?)?,
        };
        Ok(value)
    }

    /// Compiles the function into a thread-safe closure.
    ///
    /// The tree is flattened once and optimized; the closure only runs the resulting
    /// linear program.
    ///
    /// # Example
    /// ```
    /// use symfn::{Complex, Function};
    ///
    /// let f = Function::sum(&Function::power(Complex::from(2.0)), &Function::identity());
    /// let compiled = f.compile();
    /// assert_eq!(compiled(&Complex::from(3.0)).unwrap(), Complex::from(12.0));
    /// ```
    pub fn compile(&self) -> CompiledFunction<T> {
        let program = opt::optimize(self.flatten());
        Arc::new(move |x: &T| program.evaluate(x))
    }

    /// Evaluates the function at every point, in parallel.
    ///
    /// The result has the same container type as the input.
    ///
    /// # Errors
    /// Returns an error if any point fails to evaluate.
    ///
    /// # Example
    /// ```
    /// use symfn::{Complex, Function};
    ///
    /// let f = Function::power(Complex::from(2.0));
    /// let points = vec![Complex::from(1.0), Complex::from(2.0), Complex::I];
    /// let values = f.evaluate_many(&points).unwrap();
    /// assert_eq!(values, vec![Complex::from(1.0), Complex::from(4.0), Complex::from(-1.0)]);
    /// ```
    pub fn evaluate_many<V: Vector<T>>(&self, points: &V) -> Result<V, FunctionError> {
        let mut results = V::zeros(points.len());
        self.evaluate_into(points, &mut results)?;
        Ok(results)
    }

    /// Evaluates the function at every point and writes the results into `results`.
    ///
    /// # Errors
    /// Returns `FunctionError::InvalidOutputLength` if `results` and `points` differ in
    /// length, or the error of any point that fails to evaluate.
    pub fn evaluate_into<V: Vector<T>, R: Vector<T>>(
        &self,
        points: &V,
        results: &mut R,
    ) -> Result<(), FunctionError> {
        if results.len() != points.len() {
            return Err(FunctionError::InvalidOutputLength {
                expected: points.len(),
                got: results.len(),
            });
        }

        let program = opt::optimize(self.flatten());
        results
            .as_mut_slice()
            .par_iter_mut()
            .zip(points.as_slice().par_iter())
            .try_for_each(|(result, x)| -> Result<(), FunctionError> {
                *result = program.evaluate(x)?;
                Ok(())
            })
    }
}

impl<T: Numeric> FlattenedExpr<T> {
    /// Runs the program on `x` without recursion.
    ///
    /// Values are kept on one stack; the input of the innermost composition being
    /// evaluated is kept on a second one.
    pub fn evaluate(&self, x: &T) -> Result<T, FunctionError> {
        if let Some(constant) = &self.constant_result {
            return Ok(constant.clone());
        }

        let mut values: Vec<T> = Vec::with_capacity(self.ops.len());
        let mut inputs: Vec<T> = Vec::with_capacity(self.max_depth + 1);
        inputs.push(x.clone());

        for op in &self.ops {
            match op {
                LinearOp::LoadConst(c) => values.push(c.clone()),
                LinearOp::Power(p) => values.push(current(&inputs).pow(p)?),
                LinearOp::Exponential(b) => values.push(exponential(b, current(&inputs))?),
                LinearOp::Logarithm(b) => values.push(current(&inputs).log(b)?),
                LinearOp::Add => {
                    let (left, right) = pop_pair(&mut values);
                    values.push(left + right);
                }
                LinearOp::Mul => {
                    let (left, right) = pop_pair(&mut values);
                    values.push(left * right);
                }
                LinearOp::BeginComposition => inputs.push(pop(&mut values)),
                LinearOp::EndComposition => {
                    inputs.pop();
                }
                LinearOp::Discard => {
                    pop(&mut values);
                }
            }
        }

        Ok(pop(&mut values))
    }
}

// Programs are only produced by `flatten` and `opt::optimize`, which keep the stacks
// balanced.

fn current<T>(inputs: &[T]) -> &T {
    inputs.last().expect("input stack underflow")
}

fn pop<T>(values: &mut Vec<T>) -> T {
    values.pop().expect("value stack underflow")
}

fn pop_pair<T>(values: &mut Vec<T>) -> (T, T) {
    let right = pop(values);
    let left = pop(values);
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::Complex;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::E;

    fn c(value: f64) -> Complex {
        Complex::from(value)
    }

    #[test]
    fn test_evaluate_leaves() {
        assert_eq!(Function::constant(c(4.0)).evaluate(&c(100.0)).unwrap(), c(4.0));
        assert_eq!(Function::power(c(3.0)).evaluate(&c(2.0)).unwrap(), c(8.0));
        assert_eq!(Function::exponent(c(2.0)).unwrap().evaluate(&c(10.0)).unwrap(), c(1024.0));
        assert_eq!(
            Function::<Complex>::natural_exponent()
                .evaluate(&Complex::ZERO)
                .unwrap(),
            Complex::ONE
        );
        assert_abs_diff_eq!(
            Function::<Complex>::natural_logarithm().evaluate(&Complex::E).unwrap().re,
            1.0,
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            Function::logarithm(c(10.0)).unwrap().evaluate(&c(1000.0)).unwrap().re,
            3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_evaluate_complex_points() {
        // x^2 at i
        assert_eq!(Function::power(c(2.0)).evaluate(&Complex::I).unwrap(), c(-1.0));
        // ln(-1) = i pi on the principal branch
        let ln_neg = Function::<Complex>::natural_logarithm().evaluate(&c(-1.0)).unwrap();
        assert_abs_diff_eq!(ln_neg.re, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(ln_neg.im, std::f64::consts::PI, epsilon = 1e-15);
    }

    #[test]
    fn test_evaluate_composites() {
        let chain =
            Function::composition(&Function::power(c(2.0)), &Function::power(c(3.0))).unwrap();
        assert_eq!(chain.evaluate(&c(2.0)).unwrap(), c(64.0));

        let zero_product = Function::product(
            &Function::constant(Complex::ZERO),
            &Function::natural_logarithm(),
        );
        assert_eq!(zero_product.evaluate(&c(5.0)).unwrap(), Complex::ZERO);
    }

    #[test]
    fn test_constant_outer_composition() {
        let k = Function::constant(c(3.0));
        let h = Function::composition(&k, &Function::natural_exponent()).unwrap();
        for x in [-2.0, 0.0, 1.5] {
            assert_eq!(h.evaluate(&c(x)).unwrap(), c(3.0));
        }
    }

    #[test]
    fn test_evaluate_errors() {
        let ln = Function::<Complex>::natural_logarithm();
        assert_eq!(
            ln.evaluate(&Complex::ZERO),
            Err(FunctionError::Numeric(NumericError::LogarithmOfZero))
        );

        let recip = Function::power(c(-1.0));
        assert_eq!(
            recip.evaluate(&Complex::ZERO),
            Err(FunctionError::Numeric(NumericError::ZeroToNonPositivePower {
                exponent: "-1".to_string()
            }))
        );
    }

    #[test]
    fn test_evaluate_tiny_divisor() {
        let x = Function::<Complex>::identity();
        let tiny = c(1e-170);
        let inverse = Function::power(c(-1.0)).evaluate(&tiny).unwrap();
        assert_abs_diff_eq!(inverse.re / 1e170, 1.0, epsilon = 1e-12);

        let ratio = Function::division(&x, &x).unwrap();
        assert_abs_diff_eq!(ratio.evaluate(&tiny).unwrap().re, 1.0, epsilon = 1e-12);
        assert_eq!(ratio.compile()(&tiny), ratio.evaluate(&tiny));
    }

    #[test]
    fn test_evaluate_overflowing_exponential() {
        let value = Function::<Complex>::natural_exponent()
            .evaluate(&c(1000.0))
            .unwrap();
        assert_eq!(value, Complex::new(f64::INFINITY, 0.0));
    }

    #[test]
    fn test_real_numeric() {
        let f = Function::sum(&Function::power(2.0_f64), &Function::natural_exponent());
        assert_abs_diff_eq!(f.evaluate(&1.0).unwrap(), 1.0 + E, epsilon = 1e-12);

        let ln = Function::<f64>::natural_logarithm();
        assert!(matches!(
            ln.evaluate(&-1.0),
            Err(FunctionError::Numeric(NumericError::OutOfRealDomain { .. }))
        ));
    }

    #[test]
    fn test_program_matches_recursive() {
        let x = Function::identity();
        let f = Function::sum(
            &Function::product(&Function::constant(c(3.0)), &Function::power(c(2.0))),
            &Function::logarithm_of(&Function::sum(&x, &Function::constant(c(2.0))), c(2.0))
                .unwrap(),
        );
        let g = Function::exponent_of(&f).unwrap();
        let program = g.flatten();

        for x in [0.5, 1.0, 2.0, 3.5] {
            assert_eq!(program.evaluate(&c(x)), g.evaluate(&c(x)));
        }
    }

    #[test]
    fn test_program_propagates_errors() {
        let h = Function::composition(
            &Function::natural_logarithm(),
            &Function::difference(&Function::identity(), &Function::constant(c(1.0))),
        )
        .unwrap();
        let program = h.flatten();
        assert_eq!(
            program.evaluate(&c(1.0)),
            Err(FunctionError::Numeric(NumericError::LogarithmOfZero))
        );
    }

    #[test]
    fn test_compile() {
        let f = Function::product(&Function::identity(), &Function::natural_exponent());
        let compiled = f.compile();
        assert_eq!(compiled(&Complex::ZERO).unwrap(), Complex::ZERO);
        assert_eq!(compiled(&c(1.0)).unwrap(), f.evaluate(&c(1.0)).unwrap());
    }

    #[test]
    fn test_compile_is_shareable() {
        let compiled = Function::power(c(2.0)).compile();
        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let compiled = Arc::clone(&compiled);
                std::thread::spawn(move || compiled(&c(i as f64)).unwrap())
            })
            .collect();
        let results: Vec<Complex> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![c(1.0), c(4.0), c(9.0), c(16.0)]);
    }

    #[test]
    fn test_evaluate_many() {
        let f = Function::power(c(3.0));
        let points: Vec<Complex> = (0..100).map(|i| c(i as f64)).collect();
        let values = f.evaluate_many(&points).unwrap();
        for (i, value) in values.iter().enumerate() {
            assert_eq!(*value, c((i * i * i) as f64));
        }

        let arr = [c(1.0), c(2.0)];
        assert_eq!(f.evaluate_many(&arr).unwrap(), [c(1.0), c(8.0)]);
    }

    #[test]
    fn test_evaluate_many_error() {
        let ln = Function::natural_logarithm();
        let points = vec![c(1.0), Complex::ZERO, c(2.0)];
        assert_eq!(
            ln.evaluate_many(&points),
            Err(FunctionError::Numeric(NumericError::LogarithmOfZero))
        );
    }

    #[test]
    fn test_evaluate_into_length_mismatch() {
        let f = Function::power(c(2.0));
        let points = vec![c(1.0), c(2.0)];
        let mut out = vec![Complex::ZERO; 3];
        assert_eq!(
            f.evaluate_into(&points, &mut out),
            Err(FunctionError::InvalidOutputLength {
                expected: 2,
                got: 3
            })
        );

        let mut out = vec![Complex::ZERO; 2];
        f.evaluate_into(&points, &mut out).unwrap();
        assert_eq!(out, vec![c(1.0), c(4.0)]);
    }
}
