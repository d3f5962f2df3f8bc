//! Tool: add_numbers - Add two numbers together.

use crate::types::{McpResult, ToolCallResult};

use super::descriptor::{ParamSpec, ToolArguments, ToolDescriptor};

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new("add_numbers", "Add two numbers together", execute)
        .param(ParamSpec::number("a").describe("First number to add"))
        .param(ParamSpec::number("b").describe("Second number to add"))
}

fn execute(args: &ToolArguments) -> McpResult<ToolCallResult> {
    let a = args.number("a")?;
    let b = args.number("b")?;
    Ok(ToolCallResult::text(mathtext::add_numbers(a, b)))
}
