//! Tool registration and lookup.

use std::collections::HashMap;

use crate::types::{McpError, McpResult, ToolDefinition};

use super::descriptor::ToolDescriptor;

/// Immutable catalog of tools. Built once at startup, then shared read-only.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

/// Collects descriptors before freezing them into a [`ToolRegistry`].
#[derive(Debug, Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistryBuilder {
    pub fn register(mut self, tool: ToolDescriptor) -> Self {
        self.tools.push(tool);
        self
    }

    /// Freeze the registry. Fails on duplicate tool names.
    pub fn build(self) -> McpResult<ToolRegistry> {
        let mut index = HashMap::with_capacity(self.tools.len());
        for (i, tool) in self.tools.iter().enumerate() {
            if index.insert(tool.name().to_string(), i).is_some() {
                return Err(McpError::DuplicateTool(tool.name().to_string()));
            }
        }

        tracing::debug!("Registered {} tools", self.tools.len());
        Ok(ToolRegistry {
            tools: self.tools,
            index,
        })
    }
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// All tools in registration order.
    pub fn list_tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Exact, case-sensitive lookup.
    pub fn get_tool(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(ToolDescriptor::definition).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{default_registry, ToolArguments};
    use crate::types::ToolCallResult;

    fn noop(_: &ToolArguments) -> McpResult<ToolCallResult> {
        Ok(ToolCallResult::text(String::new()))
    }

    #[test]
    fn test_default_registry_order() {
        let registry = default_registry().unwrap();
        let names: Vec<&str> = registry.list_tools().iter().map(|t| t.name()).collect();
        assert_eq!(names, ["add_numbers", "multiply_numbers", "process_text"]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = default_registry().unwrap();
        assert!(registry.get_tool("add_numbers").is_some());
        assert!(registry.get_tool("Add_Numbers").is_none());
        assert!(registry.get_tool("divide_numbers").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = ToolRegistry::builder()
            .register(ToolDescriptor::new("same", "one", noop))
            .register(ToolDescriptor::new("same", "two", noop))
            .build();
        assert!(matches!(result, Err(McpError::DuplicateTool(name)) if name == "same"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::builder().build().unwrap();
        assert!(registry.is_empty());
        assert!(registry.definitions().is_empty());
    }
}
