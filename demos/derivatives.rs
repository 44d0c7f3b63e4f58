//! Builds a few functions, prints their first derivatives and evaluates both on a small
//! grid of complex points.
//!
//! Run with: `cargo run --example derivatives`

use symfn::{Complex, Function, FunctionError, FunctionSystem};

fn main() -> Result<(), FunctionError> {
    let x = Function::identity();
    let x2 = Function::power(Complex::from(2.0));

    // x^2 * e^x
    let f = &x2 * &Function::natural_exponent();
    // ln(x^2 + 1)
    let g = Function::logarithm_of(&(&x2 + &Function::constant(Complex::ONE)), Complex::E)?;
    // 2^x / x
    let h = Function::division(&Function::exponent(Complex::from(2.0))?, &x)?;

    let system = FunctionSystem::new(vec![f, g, h])?;
    println!("{system}");

    let points = [
        Complex::from(1.0),
        Complex::new(0.5, 0.5),
        Complex::new(-1.0, 2.0),
    ];
    for (point, values) in points.iter().zip(system.evaluate_many(&points)?) {
        let slopes = system.derivatives(point)?;
        println!("x = {point}");
        for (i, (value, slope)) in values.iter().zip(&slopes).enumerate() {
            println!("    f{i}(x) = {value}    df{i}(x) = {slope}");
        }
    }

    Ok(())
}
