//! Function Evaluation Benchmarks
//!
//! This benchmark suite compares three ways of computing the same function values:
//!
//! - **Direct**: hand-written Rust on `Complex`
//! - **Tree**: recursive evaluation of the expression tree
//! - **Compiled**: the optimized linear program returned by `Function::compile`
//!
//! A second group measures the cost of building derivatives, and a third one the
//! throughput of parallel batch evaluation.
//!
//! ## Usage
//!
//! Run with: `cargo bench --bench functions`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use symfn::{Complex, Function};

fn c(value: f64) -> Complex {
    Complex::from(value)
}

/// Direct evaluation of the benchmarked functions
struct DirectEvaluator;

impl DirectEvaluator {
    /// 3x^2 + 2x + 1
    fn evaluate_polynomial(x: Complex) -> Complex {
        c(3.0) * x * x + c(2.0) * x + Complex::ONE
    }

    /// e^(x^2)
    fn evaluate_gaussian_like(x: Complex) -> Complex {
        (x * x).exp()
    }

    /// ln(x^2 + 1)
    fn evaluate_log_of_sum(x: Complex) -> Complex {
        (x * x + Complex::ONE).ln().unwrap_or(Complex::ZERO)
    }

    /// x^3 / (x + 2)
    fn evaluate_rational(x: Complex) -> Complex {
        (x * x * x)
            .checked_div(&(x + c(2.0)))
            .unwrap_or(Complex::ZERO)
    }
}

/// The benchmarked functions, built once
fn build_functions() -> Vec<(&'static str, Function)> {
    let x = Function::identity();
    let x2 = Function::power(c(2.0));

    let polynomial = &(&x2 * c(3.0)) + &(&(&x * c(2.0)) + &Function::constant(Complex::ONE));
    let gaussian_like = Function::exponent_of(&x2).expect("Failed to create e^(x^2)");
    let log_of_sum = Function::logarithm_of(
        &(&x2 + &Function::constant(Complex::ONE)),
        Complex::E,
    )
    .expect("Failed to create ln(x^2 + 1)");
    let rational = Function::division(&Function::power(c(3.0)), &(&x + &Function::constant(c(2.0))))
        .expect("Failed to create x^3 / (x + 2)");

    vec![
        ("polynomial", polynomial),
        ("gaussian_like", gaussian_like),
        ("log_of_sum", log_of_sum),
        ("rational", rational),
    ]
}

/// Benchmarks direct, tree and compiled evaluation of the same functions
fn benchmark_evaluation(crit: &mut Criterion) {
    let functions = build_functions();
    let x = Complex::new(0.7, -0.3);

    let mut group = crit.benchmark_group("Function Evaluation");

    for (i, (name, function)) in functions.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("Direct", name), &i, |b, &idx| {
            b.iter(|| match idx {
                0 => DirectEvaluator::evaluate_polynomial(black_box(x)),
                1 => DirectEvaluator::evaluate_gaussian_like(black_box(x)),
                2 => DirectEvaluator::evaluate_log_of_sum(black_box(x)),
                _ => DirectEvaluator::evaluate_rational(black_box(x)),
            })
        });

        group.bench_with_input(BenchmarkId::new("Tree", name), function, |b, function| {
            b.iter(|| function.evaluate(black_box(&x)))
        });

        let compiled = function.compile();
        group.bench_with_input(BenchmarkId::new("Compiled", name), &compiled, |b, compiled| {
            b.iter(|| compiled(black_box(&x)))
        });
    }

    group.finish();
}

/// Measures the time needed to build first and third derivatives
fn benchmark_differentiation(crit: &mut Criterion) {
    let functions = build_functions();
    let mut group = crit.benchmark_group("Differentiation");

    for (name, function) in &functions {
        group.bench_with_input(BenchmarkId::new("First", name), function, |b, function| {
            b.iter(|| black_box(function.derivative()))
        });
        group.bench_with_input(BenchmarkId::new("Third", name), function, |b, function| {
            b.iter(|| black_box(function.nth_derivative(3)))
        });
    }

    group.finish();
}

/// Measures parallel batch evaluation over a growing number of points
fn benchmark_batch(crit: &mut Criterion) {
    let functions = build_functions();
    let (_, function) = &functions[2];

    let mut group = crit.benchmark_group("Batch Evaluation");

    for size in [1_000usize, 10_000, 100_000] {
        let points: Vec<Complex> = (0..size)
            .map(|i| Complex::new(i as f64 / size as f64, 0.5))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("evaluate_many", size), &points, |b, points| {
            b.iter(|| function.evaluate_many(black_box(points)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_evaluation,
    benchmark_differentiation,
    benchmark_batch
);
criterion_main!(benches);
