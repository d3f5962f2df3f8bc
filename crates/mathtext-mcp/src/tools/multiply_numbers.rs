//! Tool: multiply_numbers - Multiply two numbers together.

use crate::types::{McpResult, ToolCallResult};

use super::descriptor::{ParamSpec, ToolArguments, ToolDescriptor};

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new("multiply_numbers", "Multiply two numbers together", execute)
        .param(ParamSpec::number("a").describe("First number to multiply"))
        .param(ParamSpec::number("b").describe("Second number to multiply"))
}

fn execute(args: &ToolArguments) -> McpResult<ToolCallResult> {
    let a = args.number("a")?;
    let b = args.number("b")?;
    Ok(ToolCallResult::text(mathtext::multiply_numbers(a, b)))
}
