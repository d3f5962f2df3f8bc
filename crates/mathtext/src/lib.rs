//! mathtext: core tool bodies for arithmetic and text processing.

pub mod arithmetic;
pub mod text;
pub mod types;

pub use arithmetic::{add_numbers, multiply_numbers};
pub use text::{process_text, TextOperation};
pub use types::*;
