//! Tool descriptors: name, description, parameter schema and callable.

use std::fmt;

use mathtext::Operand;
use serde_json::{json, Map, Value};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

/// A tool body. Receives arguments that already passed schema validation.
pub type ToolFn = fn(&ToolArguments) -> McpResult<ToolCallResult>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Number,
    String,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Number => "number",
            ParamType::String => "string",
        }
    }
}

/// Schema entry for one tool parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub param_type: ParamType,
    pub required: bool,
    pub allowed_values: Option<Vec<String>>,
    pub description: Option<String>,
}

impl ParamSpec {
    /// A required numeric parameter.
    pub fn number(name: &str) -> Self {
        Self::new(name, ParamType::Number)
    }

    /// A required string parameter.
    pub fn string(name: &str) -> Self {
        Self::new(name, ParamType::String)
    }

    fn new(name: &str, param_type: ParamType) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            required: true,
            allowed_values: None,
            description: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Restrict a string parameter to a closed set, matched case-insensitively.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// JSON Schema fragment for this parameter.
    pub fn schema(&self) -> Value {
        let mut schema = json!({ "type": self.param_type.as_str() });
        if let Some(values) = &self.allowed_values {
            schema["enum"] = json!(values);
        }
        if let Some(description) = &self.description {
            schema["description"] = json!(description);
        }
        schema
    }
}

/// A validated argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Number(Operand),
    Text(String),
}

/// Validated arguments for one call, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: Vec<(String, ArgValue)>,
}

impl ToolArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        let name = name.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn number(&self, name: &str) -> McpResult<&Operand> {
        match self.get(name) {
            Some(ArgValue::Number(op)) => Ok(op),
            Some(ArgValue::Text(_)) => Err(McpError::InvalidParams(format!(
                "'{name}' must be a number"
            ))),
            None => Err(McpError::InvalidParams(format!("'{name}' is required"))),
        }
    }

    pub fn text(&self, name: &str) -> McpResult<&str> {
        match self.get(name) {
            Some(ArgValue::Text(s)) => Ok(s),
            Some(ArgValue::Number(_)) => Err(McpError::InvalidParams(format!(
                "'{name}' must be a string"
            ))),
            None => Err(McpError::InvalidParams(format!("'{name}' is required"))),
        }
    }
}

/// A registered tool.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: String,
    description: String,
    params: Vec<ParamSpec>,
    handler: ToolFn,
}

impl ToolDescriptor {
    pub fn new(name: &str, description: &str, handler: ToolFn) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            params: Vec::new(),
            handler,
        }
    }

    /// Append a parameter. Declaration order is validation order.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// JSON Schema of the tool's input, as reported by `tools/list`.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.clone(), p.schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.input_schema(),
        }
    }

    pub fn invoke(&self, args: &ToolArguments) -> McpResult<ToolCallResult> {
        (self.handler)(args)
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &ToolArguments) -> McpResult<ToolCallResult> {
        Ok(ToolCallResult::text(String::new()))
    }

    #[test]
    fn test_input_schema() {
        let tool = ToolDescriptor::new("t", "test", noop)
            .param(ParamSpec::number("a").describe("First"))
            .param(ParamSpec::string("mode").one_of(["x", "y"]).optional());

        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["a"]["type"], "number");
        assert_eq!(schema["properties"]["a"]["description"], "First");
        assert_eq!(schema["properties"]["mode"]["enum"], json!(["x", "y"]));
        assert_eq!(schema["required"], json!(["a"]));
    }

    #[test]
    fn test_arguments_accessors() {
        let mut args = ToolArguments::new();
        args.insert("a", ArgValue::Number(Operand::new("1", 1.0)));
        args.insert("s", ArgValue::Text("hi".into()));

        assert_eq!(args.number("a").unwrap().value(), 1.0);
        assert_eq!(args.text("s").unwrap(), "hi");
        assert!(args.number("s").is_err());
        assert!(args.text("missing").is_err());

        args.insert("s", ArgValue::Text("again".into()));
        assert_eq!(args.len(), 2);
        assert_eq!(args.text("s").unwrap(), "again");
    }
}
