//! Arithmetic tools.
//!
//! Plain IEEE-754 double arithmetic: no overflow guarding, no integer
//! coercion. Results use the default `f64` formatting.

use crate::types::Operand;

/// Add two operands and describe the result.
pub fn add_numbers(a: &Operand, b: &Operand) -> String {
    let result = a.value() + b.value();
    format!("The sum of {a} and {b} is {result}")
}

/// Multiply two operands and describe the result.
pub fn multiply_numbers(a: &Operand, b: &Operand) -> String {
    let result = a.value() * b.value();
    format!("The product of {a} and {b} is {result}")
}
