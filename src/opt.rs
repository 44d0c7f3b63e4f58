//! Peephole optimiser for flattened function programs.
//!
//! Pass pipeline
//! -------------
//!  1. **fold_consts**          – `LoadConst a, LoadConst b, Add|Mul` becomes a single
//!                                load, and a constant load followed by `Discard` is
//!                                dropped.
//!  2. **collapse_compositions** – a composition whose outer program is a single
//!                                constant load becomes `Discard, LoadConst c`. The
//!                                inner program still runs, so its domain errors are
//!                                still raised.
//!
//! The optimiser iterates the full pipeline until a fix-point is reached. Each pass
//! only rewrites whole windows of adjacent ops, so stack effects are preserved and
//! the optimised program gives the same result as the unoptimised one.

use crate::expr::{FlattenedExpr, LinearOp};
use crate::numeric::Numeric;

/// Run all optimisation passes until nothing changes.
pub fn optimize<T: Numeric>(flattened: FlattenedExpr<T>) -> FlattenedExpr<T> {
    let mut ops = flattened.ops;
    loop {
        let len_before = ops.len();
        ops = fold_consts(ops);
        ops = collapse_compositions(ops);
        if ops.len() == len_before {
            break;
        }
    }

    let constant_result = match ops.as_slice() {
        [LinearOp::LoadConst(c)] => Some(c.clone()),
        _ => None,
    };

    FlattenedExpr {
        ops,
        constant_result,
        ..flattened
    }
}

// ────────────────────────────────────────────────────────────────────────────
//  Pass 1 – constant folding
// ────────────────────────────────────────────────────────────────────────────
fn fold_consts<T: Numeric>(ops: Vec<LinearOp<T>>) -> Vec<LinearOp<T>> {
    use LinearOp::*;
    let mut out: Vec<LinearOp<T>> = Vec::with_capacity(ops.len());

    for op in ops {
        let folded = match (&op, out.as_slice()) {
            (Add, [.., LoadConst(a), LoadConst(b)]) => Some(a.clone() + b.clone()),
            (Mul, [.., LoadConst(a), LoadConst(b)]) => Some(a.clone() * b.clone()),
            _ => None,
        };
        if let Some(res) = folded {
            // drop the two producing loads
            out.truncate(out.len() - 2);
            out.push(LoadConst(res));
            continue;
        }

        if matches!(op, Discard) && matches!(out.last(), Some(LoadConst(_))) {
            out.pop();
            continue;
        }

        out.push(op);
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
//  Pass 2 – constant outer functions of compositions (pattern length = 3 ops)
// ────────────────────────────────────────────────────────────────────────────
fn collapse_compositions<T: Numeric>(ops: Vec<LinearOp<T>>) -> Vec<LinearOp<T>> {
    use LinearOp::*;
    let mut out = Vec::with_capacity(ops.len());
    let mut i = 0;

    while i < ops.len() {
        if let [BeginComposition, LoadConst(c), EndComposition, ..] = &ops[i..] {
            out.push(Discard);
            out.push(LoadConst(c.clone()));
            i += 3;
            continue;
        }
        // default path
        out.push(ops[i].clone());
        i += 1;
    }
    out
}
