//! OpenAPI 3.0 document describing the JSON-RPC endpoint.
//!
//! Generated from the registry so the documentation always matches the tools
//! actually served. Nothing at runtime depends on it.

use serde_json::{json, Map, Value};

use crate::tools::{ParamSpec, ParamType, ToolDescriptor, ToolRegistry};
use crate::types::{Method, JSONRPC_VERSION, SERVER_VERSION};

const DOC_TITLE: &str = "MCP Math and Text Server Tools";
const DOC_DESCRIPTION: &str =
    "Model Context Protocol server providing mathematical and text processing tools";

/// Build the document. `server_url` is where the JSON-RPC endpoint is reached.
pub fn document(registry: &ToolRegistry, server_url: &str) -> Value {
    let mut variants: Vec<Value> = registry.list_tools().iter().map(call_variant).collect();
    variants.push(list_variant());

    let mut examples = Map::new();
    for (i, tool) in registry.list_tools().iter().enumerate() {
        examples.insert(
            format!("{}_example", tool.name()),
            json!({
                "summary": tool.description(),
                "value": envelope(i as i64 + 1, Method::ToolsCall, json!({
                    "name": tool.name(),
                    "arguments": example_arguments(tool),
                })),
            }),
        );
    }
    examples.insert(
        "list_tools_example".to_string(),
        json!({
            "summary": "List available tools",
            "value": envelope(registry.len() as i64 + 1, Method::ToolsList, json!({})),
        }),
    );

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": DOC_TITLE,
            "description": DOC_DESCRIPTION,
            "version": SERVER_VERSION,
        },
        "servers": [
            { "url": server_url, "description": "MCP JSON-RPC Server" }
        ],
        "paths": {
            "/message": {
                "post": {
                    "tags": ["MCP Tools"],
                    "summary": "Call MCP Tools",
                    "description": "JSON-RPC endpoint for calling MCP tools",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "oneOf": variants },
                                "examples": examples,
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "JSON-RPC response (success or protocol error)",
                            "content": {
                                "application/json": { "schema": response_schema() }
                            }
                        },
                        "400": {
                            "description": "Bad request - body is not valid JSON",
                            "content": {
                                "application/json": { "schema": error_schema() }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "MCPTool": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "Tool name" },
                        "description": { "type": "string", "description": "Tool description" },
                        "inputSchema": {
                            "type": "object",
                            "description": "JSON Schema for tool input parameters"
                        }
                    }
                }
            }
        }
    })
}

fn envelope(id: i64, method: Method, params: Value) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "method": method.as_str(),
        "params": params,
    })
}

fn envelope_schema(title: String, method: Method, params: Value) -> Value {
    json!({
        "type": "object",
        "title": title,
        "properties": {
            "jsonrpc": { "type": "string", "enum": [JSONRPC_VERSION] },
            "id": { "type": "integer" },
            "method": { "type": "string", "enum": [method.as_str()] },
            "params": params,
        },
        "required": ["jsonrpc", "id", "method", "params"],
    })
}

fn call_variant(tool: &ToolDescriptor) -> Value {
    envelope_schema(
        format!("{} Tool", title_case(tool.name())),
        Method::ToolsCall,
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "enum": [tool.name()] },
                "arguments": tool.input_schema(),
            },
            "required": ["name", "arguments"],
        }),
    )
}

fn list_variant() -> Value {
    envelope_schema(
        "List Tools".to_string(),
        Method::ToolsList,
        json!({ "type": "object" }),
    )
}

fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "jsonrpc": { "type": "string", "enum": [JSONRPC_VERSION] },
            "id": { "type": "integer", "nullable": true },
            "result": {
                "oneOf": [
                    {
                        "type": "object",
                        "title": "Tool Call Result",
                        "properties": {
                            "content": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "type": { "type": "string", "enum": ["text"] },
                                        "text": { "type": "string" }
                                    }
                                }
                            },
                            "isError": { "type": "boolean" }
                        }
                    },
                    {
                        "type": "object",
                        "title": "Tools List Result",
                        "properties": {
                            "tools": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/MCPTool" }
                            }
                        }
                    }
                ]
            },
            "error": error_object_schema(),
        }
    })
}

fn error_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "jsonrpc": { "type": "string", "enum": [JSONRPC_VERSION] },
            "id": { "type": "integer", "nullable": true },
            "error": error_object_schema(),
        }
    })
}

fn error_object_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "code": { "type": "integer" },
            "message": { "type": "string" }
        }
    })
}

fn example_arguments(tool: &ToolDescriptor) -> Value {
    let mut numbers = [5, 10].into_iter().cycle();
    let arguments: Map<String, Value> = tool
        .params()
        .iter()
        .map(|p| (p.name.clone(), example_value(p, &mut numbers)))
        .collect();
    Value::Object(arguments)
}

fn example_value(param: &ParamSpec, numbers: &mut impl Iterator<Item = i64>) -> Value {
    match (param.param_type, &param.allowed_values) {
        (ParamType::Number, _) => json!(numbers.next().unwrap_or(1)),
        (ParamType::String, Some(values)) if !values.is_empty() => json!(values[0]),
        (ParamType::String, _) => json!("hello world"),
    }
}

/// `add_numbers` -> `Add Numbers`.
fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
