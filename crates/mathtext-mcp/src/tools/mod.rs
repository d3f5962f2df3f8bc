//! Tool descriptors, the registry, and the shipped tools.

pub mod add_numbers;
pub mod descriptor;
pub mod multiply_numbers;
pub mod process_text;
pub mod registry;

pub use descriptor::{ArgValue, ParamSpec, ParamType, ToolArguments, ToolDescriptor, ToolFn};
pub use registry::{ToolRegistry, ToolRegistryBuilder};

use crate::types::McpResult;

/// Build the registry with every shipped tool, in listing order.
pub fn default_registry() -> McpResult<ToolRegistry> {
    ToolRegistry::builder()
        .register(add_numbers::descriptor())
        .register(multiply_numbers::descriptor())
        .register(process_text::descriptor())
        .build()
}
