use std::sync::Arc;

use crate::complex::Complex;
use crate::errors::FunctionError;

/// Type alias for a compiled function of one variable.
///
/// This represents a closure that:
/// - Takes the input value
/// - Runs the optimized linear program of the function on it
/// - Is both Send and Sync for thread safety
pub type CompiledFunction<T = Complex> = Arc<dyn Fn(&T) -> Result<T, FunctionError> + Send + Sync>;

/// Type alias for a compiled group of functions evaluated at once.
///
/// This represents a closure that:
/// - Takes the input value
/// - Takes a mutable slice to store the results, one per function
/// - Is both Send and Sync for thread safety
pub type CombinedFunction<T = Complex> =
    Arc<dyn Fn(&T, &mut [T]) -> Result<(), FunctionError> + Send + Sync>;
