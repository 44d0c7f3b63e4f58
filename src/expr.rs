//! Expression module for representing functions of one complex variable.
//!
//! This module defines the node types of the expression tree:
//!
//! - `Expr`: an enum with one variant per algebraic operation
//! - `Function`: a cheap, shareable handle to an immutable `Expr`
//! - `FunctionKind`: the tag of a node, without its payload
//!
//! The tree is built recursively, each composite node holding two `Function` handles.
//! Handles are reference counted, so two parents may share the same child; nothing
//! can observe the sharing because nodes are never mutated after construction.
//!
//! Nodes are only created through the smart constructors in [`builder`](crate::builder),
//! which keeps every tree simplified and acyclic.
//!
//! # Expression Tree Structure
//! - Leaf nodes: Constant, Power (`x^p`), Exponential (`b^x`), Logarithm (`log_b(x)`)
//! - Binary nodes: Sum, Product
//! - Composition: `f(g(x))`, the outer function on the left and the inner one on the right
//!
//! # Flattening
//! [`Function::flatten`] lowers a tree into a linear stack program (`FlattenedExpr`),
//! which [`opt::optimize`](crate::opt::optimize) can clean up and the evaluator can run
//! without recursion.

use std::fmt;
use std::sync::Arc;

use crate::complex::Complex;
use crate::numeric::Numeric;

/// An expression tree node representing one algebraic operation.
///
/// Every variant carries exactly the data its operation needs: leaves carry a single
/// parameter, composite nodes carry two children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<T: Numeric = Complex> {
    /// `f(x) = c`
    Constant(T),
    /// `f(x) = x^p`
    Power(T),
    /// `f(x) = b^x`
    Exponential(T),
    /// `f(x) = log_b(x)`
    Logarithm(T),
    /// `f(x) = g(x) + h(x)`
    Sum(Function<T>, Function<T>),
    /// `f(x) = g(x) * h(x)`
    Product(Function<T>, Function<T>),
    /// `f(x) = outer(inner(x))`
    Composition(Function<T>, Function<T>),
}

/// The kind of a node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Constant,
    Power,
    Exponential,
    Logarithm,
    Sum,
    Product,
    Composition,
}

/// A symbolic function of one variable over the numeric type `T`.
///
/// `Function` is a reference-counted handle to an immutable [`Expr`]; cloning it is
/// cheap and never copies the tree. It is `Send + Sync`, so a function can be shared
/// across threads and evaluated concurrently.
///
/// # Example
/// ```
/// use symfn::{Complex, Function};
///
/// // f(x) = x^2 + 3x
/// let f = Function::sum(
///     &Function::power(Complex::from(2.0)),
///     &Function::product(&Function::constant(Complex::from(3.0)), &Function::identity()),
/// );
/// assert_eq!(f.to_string(), "(x^2 + (3 * x))");
/// assert_eq!(f.evaluate(&Complex::from(2.0)).unwrap(), Complex::from(10.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Function<T: Numeric = Complex> {
    node: Arc<Expr<T>>,
}

impl<T: Numeric> Function<T> {
    /// Wraps a node. Only the builder calls this, after applying its simplification rules.
    pub(crate) fn from_expr(expr: Expr<T>) -> Self {
        Self {
            node: Arc::new(expr),
        }
    }

    /// Returns the node this handle points to
    pub fn expr(&self) -> &Expr<T> {
        &self.node
    }

    /// Returns the kind of the root node
    pub fn kind(&self) -> FunctionKind {
        match self.expr() {
            Expr::Constant(_) => FunctionKind::Constant,
            Expr::Power(_) => FunctionKind::Power,
            Expr::Exponential(_) => FunctionKind::Exponential,
            Expr::Logarithm(_) => FunctionKind::Logarithm,
            Expr::Sum(..) => FunctionKind::Sum,
            Expr::Product(..) => FunctionKind::Product,
            Expr::Composition(..) => FunctionKind::Composition,
        }
    }

    /// Returns the parameter of a leaf node: the value of a constant, the exponent of a
    /// power, or the base of an exponential or logarithm.
    pub fn parameter(&self) -> Option<&T> {
        match self.expr() {
            Expr::Constant(p) | Expr::Power(p) | Expr::Exponential(p) | Expr::Logarithm(p) => {
                Some(p)
            }
            _ => None,
        }
    }

    /// Returns the left child of a composite node (the outer function of a composition)
    pub fn left(&self) -> Option<&Function<T>> {
        match self.expr() {
            Expr::Sum(left, _) | Expr::Product(left, _) | Expr::Composition(left, _) => Some(left),
            _ => None,
        }
    }

    /// Returns the right child of a composite node (the inner function of a composition)
    pub fn right(&self) -> Option<&Function<T>> {
        match self.expr() {
            Expr::Sum(_, right) | Expr::Product(_, right) | Expr::Composition(_, right) => {
                Some(right)
            }
            _ => None,
        }
    }

    /// Returns the value if this function is a constant
    pub fn as_constant(&self) -> Option<&T> {
        match self.expr() {
            Expr::Constant(c) => Some(c),
            _ => None,
        }
    }

    /// Returns true if this function is a constant
    pub fn is_constant(&self) -> bool {
        self.as_constant().is_some()
    }

    /// True if this is exactly the constant `c`
    pub(crate) fn is_constant_value(&self, c: &T) -> bool {
        self.as_constant().is_some_and(|value| value == c)
    }

    /// True if this is `x^1`
    pub(crate) fn is_identity(&self) -> bool {
        matches!(self.expr(), Expr::Power(p) if p.is_one())
    }

    /// Returns true if both handles point to the same node
    pub fn ptr_eq(&self, other: &Function<T>) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Converts the expression tree to flattened linear operations.
    ///
    /// The program is a post-order walk of the tree: children are emitted before their
    /// parent. A composition emits the inner program, then `BeginComposition` (which moves
    /// the inner result into the input register), then the outer program, then
    /// `EndComposition` (which restores the previous input).
    pub fn flatten(&self) -> FlattenedExpr<T> {
        if let Some(constant) = self.as_constant() {
            return FlattenedExpr {
                ops: vec![LinearOp::LoadConst(constant.clone())],
                max_depth: 0,
                constant_result: Some(constant.clone()),
            };
        }

        let mut ops = Vec::new();
        let mut max_depth = 0;
        self.flatten_recursive(&mut ops, 0, &mut max_depth);

        FlattenedExpr {
            ops,
            max_depth,
            constant_result: None,
        }
    }

    fn flatten_recursive(&self, ops: &mut Vec<LinearOp<T>>, depth: usize, max_depth: &mut usize) {
        match self.expr() {
            Expr::Constant(c) => ops.push(LinearOp::LoadConst(c.clone())),
            Expr::Power(p) => ops.push(LinearOp::Power(p.clone())),
            Expr::Exponential(b) => ops.push(LinearOp::Exponential(b.clone())),
            Expr::Logarithm(b) => ops.push(LinearOp::Logarithm(b.clone())),

            Expr::Sum(left, right) => {
                left.flatten_recursive(ops, depth, max_depth);
                right.flatten_recursive(ops, depth, max_depth);
                ops.push(LinearOp::Add);
            }

            Expr::Product(left, right) => {
                left.flatten_recursive(ops, depth, max_depth);
                right.flatten_recursive(ops, depth, max_depth);
                ops.push(LinearOp::Mul);
            }

            Expr::Composition(outer, inner) => {
                inner.flatten_recursive(ops, depth, max_depth);
                ops.push(LinearOp::BeginComposition);
                *max_depth = (*max_depth).max(depth + 1);
                outer.flatten_recursive(ops, depth + 1, max_depth);
                ops.push(LinearOp::EndComposition);
            }
        }
    }

    /// Whether the rendering of this function must be parenthesized before it can stand
    /// in for `x` inside a power or an exponential.
    fn needs_parens(&self) -> bool {
        match self.expr() {
            Expr::Power(p) => !p.is_one(),
            Expr::Exponential(_) => true,
            Expr::Constant(c) => !is_plain(c),
            Expr::Composition(outer, _) => outer.needs_parens(),
            Expr::Logarithm(_) | Expr::Sum(..) | Expr::Product(..) => false,
        }
    }

    /// Writes the function with `var` standing for its argument
    fn render(&self, f: &mut fmt::Formatter<'_>, var: &str) -> fmt::Result {
        match self.expr() {
            Expr::Constant(c) => write!(f, "{}", Param(c)),
            Expr::Power(p) if p.is_one() => write!(f, "{var}"),
            Expr::Power(p) => write!(f, "{var}^{}", Param(p)),
            Expr::Exponential(b) if *b == T::e() => write!(f, "e^{var}"),
            Expr::Exponential(b) => write!(f, "{}^{var}", Param(b)),
            Expr::Logarithm(b) if *b == T::e() => write!(f, "ln({var})"),
            Expr::Logarithm(b) => write!(f, "log_{}({var})", Param(b)),
            Expr::Sum(left, right) => {
                write!(f, "(")?;
                left.render(f, var)?;
                write!(f, " + ")?;
                right.render(f, var)?;
                write!(f, ")")
            }
            Expr::Product(left, right) => {
                write!(f, "(")?;
                left.render(f, var)?;
                write!(f, " * ")?;
                right.render(f, var)?;
                write!(f, ")")
            }
            Expr::Composition(outer, inner) => {
                let inner_var = Rendered { function: inner, var }.to_string();
                if inner.needs_parens() {
                    outer.render(f, &format!("({inner_var})"))
                } else {
                    outer.render(f, &inner_var)
                }
            }
        }
    }
}

/// A non-negative real parameter prints bare; anything else gets parentheses.
fn is_plain<T: Numeric>(value: &T) -> bool {
    value.to_real().is_some_and(|r| r >= 0.0)
}

struct Param<'a, T>(&'a T);

impl<T: Numeric> fmt::Display for Param<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_plain(self.0) {
            write!(f, "{}", self.0)
        } else {
            write!(f, "({})", self.0)
        }
    }
}

struct Rendered<'a, T: Numeric> {
    function: &'a Function<T>,
    var: &'a str,
}

impl<T: Numeric> fmt::Display for Rendered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.function.render(f, self.var)
    }
}

/// Formats a function in conventional notation with `x` as the free variable.
///
/// - Constants print their value, parenthesized unless a non-negative real
/// - `x^p`, `b^x`, `e^x`, `ln(x)` and `log_b(x)` for the leaves
/// - Sums and products are wrapped in parentheses
/// - A composition prints the outer function with the inner one substituted for `x`
impl<T: Numeric> fmt::Display for Function<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, "x")
    }
}

/// Linear operation of a flattened function
#[derive(Debug, Clone, PartialEq)]
pub enum LinearOp<T: Numeric = Complex> {
    /// Push a constant
    LoadConst(T),
    /// Push `input^p`
    Power(T),
    /// Push `b^input`
    Exponential(T),
    /// Push `log_b(input)`
    Logarithm(T),
    /// Pop two values, push their sum
    Add,
    /// Pop two values, push their product
    Mul,
    /// Pop a value and make it the current input
    BeginComposition,
    /// Restore the previous input
    EndComposition,
    /// Pop a value and drop it
    Discard,
}

/// Flattened function representation for non-recursive evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedExpr<T: Numeric = Complex> {
    /// Linear sequence of operations
    pub(crate) ops: Vec<LinearOp<T>>,
    /// Deepest composition nesting, used to size the input stack
    pub(crate) max_depth: usize,
    /// Pre-computed result if the whole function is constant
    pub(crate) constant_result: Option<T>,
}

impl<T: Numeric> FlattenedExpr<T> {
    /// The operations of the program, in execution order
    pub fn ops(&self) -> &[LinearOp<T>] {
        &self.ops
    }

    /// The result of the program if it does not depend on its input
    pub fn constant_result(&self) -> Option<&T> {
        self.constant_result.as_ref()
    }
}
