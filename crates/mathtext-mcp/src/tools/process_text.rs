//! Tool: process_text - Upper-case, lower-case or reverse a string.

use mathtext::TextOperation;

use crate::types::{McpResult, ToolCallResult};

use super::descriptor::{ParamSpec, ToolArguments, ToolDescriptor};

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "process_text",
        "Process text with various operations",
        execute,
    )
    .param(ParamSpec::string("text").describe("Text to process"))
    .param(
        ParamSpec::string("operation")
            .one_of(TextOperation::ALL.iter().map(|op| op.as_str()))
            .describe("Operation to perform on the text"),
    )
}

// Unknown operations are reported as plain output, not as an error result.
fn execute(args: &ToolArguments) -> McpResult<ToolCallResult> {
    let text = args.text("text")?;
    let operation = args.text("operation")?;
    Ok(ToolCallResult::text(mathtext::process_text(text, operation)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ArgValue;

    fn call(text: &str, operation: &str) -> ToolCallResult {
        let mut args = ToolArguments::new();
        args.insert("text", ArgValue::Text(text.into()));
        args.insert("operation", ArgValue::Text(operation.into()));
        descriptor().invoke(&args).unwrap()
    }

    #[test]
    fn test_unknown_operation_is_not_an_error_result() {
        let result = call("abc", "title");
        assert!(!result.is_error);
        assert_eq!(
            result,
            ToolCallResult::text(
                "Unknown operation: title. Available: upper, lower, reverse".to_string()
            )
        );
    }

    #[test]
    fn test_schema_enumerates_operations() {
        let schema = descriptor().input_schema();
        assert_eq!(
            schema["properties"]["operation"]["enum"],
            serde_json::json!(["upper", "lower", "reverse"])
        );
        assert_eq!(schema["required"], serde_json::json!(["text", "operation"]));
    }
}
