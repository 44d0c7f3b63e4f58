//! Symbolic functions of one complex variable with exact differentiation rules.
//!
//! This crate represents functions such as `ln(x^2 + 1)` or `e^(3x)` as immutable
//! expression trees, evaluates them at complex (or real) points and differentiates them
//! symbolically. Trees are built through smart constructors that simplify as they go,
//! so results of differentiation stay small.
//!
//! # Features
//!
//! - Constants, powers, exponentials, logarithms, sums, products and composition
//! - Construction-time simplification (`0 + f = f`, `1 * f = f`, `f(c)` folded, ...)
//! - Symbolic derivatives of any order
//! - Generic over the numeric type: [`Complex`] by default, `f64` also supported
//! - Compilation into linear stack programs and parallel batch evaluation
//!
//! # Example
//!
//! ```rust
//! use symfn::{Complex, Function};
//!
//! // f(x) = ln(x^2 + 1)
//! let x2 = Function::power(Complex::from(2.0));
//! let inner = Function::sum(&x2, &Function::constant(Complex::ONE));
//! let f = Function::natural_logarithm().compose(&inner).unwrap();
//!
//! // f'(x) = 2x / (x^2 + 1)
//! let df = f.derivative().unwrap();
//! let slope = df.evaluate(&Complex::from(1.0)).unwrap();
//! assert!((slope - Complex::ONE).abs() < 1e-12);
//!
//! // i^2 + 1 = 0, outside the domain of ln
//! let err = f.evaluate(&Complex::I).unwrap_err();
//! assert_eq!(err.to_string(), "numeric error: logarithm of 0 is undefined");
//! ```

pub use complex::Complex;
pub use errors::{FunctionError, NumericError};
pub use expr::{Expr, Function, FunctionKind};
pub use numeric::Numeric;
pub use system::FunctionSystem;

pub mod prelude {
    pub use crate::backends::vector::Vector;
    pub use crate::complex::Complex;
    pub use crate::errors::{FunctionError, NumericError};
    pub use crate::expr::{Expr, FlattenedExpr, Function, FunctionKind, LinearOp};
    pub use crate::numeric::Numeric;
    pub use crate::system::FunctionSystem;
    pub use crate::types::{CombinedFunction, CompiledFunction};
}

/// Container backends for batch evaluation
pub mod backends {
    pub mod vector;
}
/// Smart constructors and operator overloads
pub mod builder;
/// The default complex number type
pub mod complex;
/// Symbolic differentiation
pub mod derivative;
/// Error types for the various failure modes
pub mod errors;
/// Recursive and program-based evaluation
pub mod eval;
/// Expression tree representation, display and flattening
pub mod expr;
/// The numeric contract functions are generic over
pub mod numeric;
/// Peephole optimizer for flattened programs
pub mod opt;
/// Groups of functions evaluated together
pub mod system;
/// Closure type aliases
pub mod types;
