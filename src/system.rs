//! Groups of functions of the same variable, evaluated together.
//!
//! A [`FunctionSystem`] takes a list of functions, differentiates each of them once and
//! compiles both the functions and their derivatives into combined closures. Evaluating
//! the system at a point yields one value per function.
//!
//! # Features
//!
//! - Single combined closure for all functions
//! - Precomputed derivatives
//! - Evaluation into pre-allocated buffers
//! - Parallel evaluation over many points
//!
//! # Example
//!
//! ```
//! use symfn::{Complex, Function, FunctionSystem};
//!
//! let x = Function::identity();
//! let system = FunctionSystem::new(vec![
//!     Function::power(Complex::from(2.0)),                       // x^2
//!     Function::sum(&x, &Function::constant(Complex::from(1.0))), // x + 1
//! ])
//! .unwrap();
//!
//! let results = system.evaluate(&Complex::from(3.0)).unwrap();
//! assert_eq!(results, vec![Complex::from(9.0), Complex::from(4.0)]);
//!
//! let slopes = system.derivatives(&Complex::from(3.0)).unwrap();
//! assert_eq!(slopes, vec![Complex::from(6.0), Complex::from(1.0)]);
//! ```

use std::fmt;
use std::sync::Arc;

use colored::Colorize;
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

use crate::backends::vector::Vector;
use crate::complex::Complex;
use crate::errors::FunctionError;
use crate::expr::{FlattenedExpr, Function};
use crate::numeric::Numeric;
use crate::opt;
use crate::types::CombinedFunction;

/// A set of functions of one variable that are evaluated together.
#[derive(Clone)]
pub struct FunctionSystem<T: Numeric = Complex> {
    /// The functions of the system, in input order
    functions: Vec<Function<T>>,
    /// The first derivative of each function
    derivative_functions: Vec<Function<T>>,
    /// Compiled closure evaluating every function
    combined_fun: CombinedFunction<T>,
    /// Compiled closure evaluating every derivative
    derivative_fun: CombinedFunction<T>,
}

impl<T: Numeric> FunctionSystem<T> {
    /// Creates a new system from a list of functions.
    ///
    /// Each function is differentiated once and both sets are compiled.
    ///
    /// # Errors
    /// Returns the error of any function whose derivative cannot be built.
    pub fn new(functions: Vec<Function<T>>) -> Result<Self, FunctionError> {
        let derivative_functions = functions
            .iter()
            .map(Function::derivative)
            .collect::<Result<Vec<_>, _>>()?;

        let combined_fun = build_combined_function(&functions);
        let derivative_fun = build_combined_function(&derivative_functions);

        debug!(
            "built function system: [{}]",
            functions.iter().map(|f| f.to_string()).join(", ")
        );

        Ok(Self {
            functions,
            derivative_functions,
            combined_fun,
            derivative_fun,
        })
    }

    /// Evaluates all functions at `x` into a pre-allocated buffer.
    ///
    /// # Errors
    /// Returns `FunctionError::InvalidOutputLength` if the buffer size doesn't match the
    /// number of functions, or the first evaluation error.
    ///
    /// # Example
    /// ```
    /// # use symfn::{Function, FunctionSystem};
    /// let system = FunctionSystem::new(vec![
    ///     Function::power(2.0_f64),
    ///     Function::natural_exponent(),
    /// ])
    /// .unwrap();
    ///
    /// let mut results = vec![0.0; 2];
    /// system.evaluate_into(&0.0, &mut results).unwrap();
    /// assert_eq!(results, vec![0.0, 1.0]);
    /// ```
    pub fn evaluate_into(&self, x: &T, results: &mut [T]) -> Result<(), FunctionError> {
        self.validate_output_length(results)?;
        (self.combined_fun)(x, results)
    }

    /// Evaluates all functions at `x`.
    pub fn evaluate(&self, x: &T) -> Result<Vec<T>, FunctionError> {
        let mut results = vec![T::zero(); self.functions.len()];
        (self.combined_fun)(x, &mut results)?;
        Ok(results)
    }

    /// Evaluates the derivative of each function at `x` into a pre-allocated buffer.
    pub fn derivatives_into(&self, x: &T, results: &mut [T]) -> Result<(), FunctionError> {
        self.validate_output_length(results)?;
        (self.derivative_fun)(x, results)
    }

    /// Evaluates the derivative of each function at `x`.
    pub fn derivatives(&self, x: &T) -> Result<Vec<T>, FunctionError> {
        let mut results = vec![T::zero(); self.functions.len()];
        (self.derivative_fun)(x, &mut results)?;
        Ok(results)
    }

    /// Evaluates the system in parallel at many points.
    ///
    /// Points are split into chunks based on the available parallelism; the result holds
    /// one row per point, in input order.
    ///
    /// # Example
    /// ```
    /// # use symfn::{Function, FunctionSystem};
    /// let system = FunctionSystem::new(vec![
    ///     Function::power(2.0_f64),
    ///     Function::power(3.0_f64),
    /// ])
    /// .unwrap();
    ///
    /// let rows = system.evaluate_many(&vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(rows, vec![vec![1.0, 1.0], vec![4.0, 8.0], vec![9.0, 27.0]]);
    /// ```
    pub fn evaluate_many<V: Vector<T>>(&self, points: &V) -> Result<Vec<Vec<T>>, FunctionError> {
        let num_threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(8);

        let chunk_size = (points.len() / (num_threads * 4)).max(1);

        let chunks = points
            .as_slice()
            .par_chunks(chunk_size)
            .map(|chunk| chunk.iter().map(|x| self.evaluate(x)).collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(chunks.into_iter().flatten().collect())
    }

    /// Returns the functions of the system.
    pub fn functions(&self) -> &[Function<T>] {
        &self.functions
    }

    /// Returns the first derivative of each function.
    pub fn derivative_functions(&self) -> &[Function<T>] {
        &self.derivative_functions
    }

    /// Returns the combined compiled closure.
    pub fn fun(&self) -> &CombinedFunction<T> {
        &self.combined_fun
    }

    /// Returns the number of functions in the system.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if the system holds no functions.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn validate_output_length(&self, results: &[T]) -> Result<(), FunctionError> {
        if results.len() != self.functions.len() {
            return Err(FunctionError::InvalidOutputLength {
                expected: self.functions.len(),
                got: results.len(),
            });
        }
        Ok(())
    }
}

/// Compiles every function and wraps the programs into one closure writing one result
/// per function.
fn build_combined_function<T: Numeric>(functions: &[Function<T>]) -> CombinedFunction<T> {
    let programs: Vec<FlattenedExpr<T>> = functions
        .iter()
        .map(|f| opt::optimize(f.flatten()))
        .collect();

    Arc::new(move |x: &T, results: &mut [T]| {
        for (program, result) in programs.iter().zip(results.iter_mut()) {
            *result = program.evaluate(x)?;
        }
        Ok(())
    })
}

fn write_listing<T: Numeric>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    functions: &[Function<T>],
    prefix: &str,
) -> fmt::Result {
    writeln!(f, "    {}:", label.cyan())?;
    writeln!(
        f,
        "        {}",
        functions
            .iter()
            .enumerate()
            .map(|(i, func)| format!("{prefix}{i}(x) = {func}"))
            .join("\n        ")
    )
}

impl<T: Numeric> fmt::Display for FunctionSystem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        write_listing(f, "Functions", &self.functions, "f")?;
        write_listing(f, "Derivatives", &self.derivative_functions, "df")?;
        writeln!(f, "}}")
    }
}

impl<T: Numeric> fmt::Debug for FunctionSystem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
