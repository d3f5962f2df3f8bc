//! Envelope and parameter validation.
//!
//! Both checks stop at the first violation; errors are never aggregated.

use mathtext::Operand;
use serde::Deserialize;
use serde_json::Value;

use crate::tools::{ArgValue, ParamSpec, ParamType, ToolArguments, ToolDescriptor, ToolRegistry};
use crate::types::{JsonRpcRequest, McpError, McpResult, Method, ToolCallParams, JSONRPC_VERSION};

/// A `tools/call` request resolved against the registry.
#[derive(Debug)]
pub struct ValidatedCall<'r> {
    pub tool: &'r ToolDescriptor,
    pub arguments: ToolArguments,
}

/// Validate the JSON-RPC envelope: object, `jsonrpc`, `id`, `method`, in
/// that order.
pub fn validate_envelope(mut envelope: Value) -> McpResult<JsonRpcRequest> {
    let object = envelope
        .as_object_mut()
        .ok_or_else(|| McpError::InvalidRequest("Payload must be a JSON object".to_string()))?;

    match object.get("jsonrpc").and_then(Value::as_str) {
        Some(JSONRPC_VERSION) => {}
        Some(other) => {
            return Err(McpError::InvalidRequest(format!(
                "Expected jsonrpc version \"{JSONRPC_VERSION}\", got \"{other}\""
            )))
        }
        None => {
            return Err(McpError::InvalidRequest(
                "Missing or non-string jsonrpc field".to_string(),
            ))
        }
    }

    let id = match object.get("id") {
        Some(value) => value.as_i64().ok_or_else(|| {
            McpError::InvalidRequest(format!("Request id must be an integer, got {value}"))
        })?,
        None => return Err(McpError::InvalidRequest("Missing request id".to_string())),
    };

    let method = match object.get("method") {
        Some(Value::String(name)) => Method::parse(name)
            .ok_or_else(|| McpError::InvalidRequest(format!("Unsupported method '{name}'")))?,
        Some(other) => {
            return Err(McpError::InvalidRequest(format!(
                "Method must be a string, got {other}"
            )))
        }
        None => return Err(McpError::InvalidRequest("Missing method".to_string())),
    };

    Ok(JsonRpcRequest {
        id,
        method,
        params: object.remove("params"),
    })
}

/// Resolve a `tools/call` request's tool and check its arguments against the
/// tool's parameter schema.
pub fn validate_tool_call<'r>(
    request: &JsonRpcRequest,
    registry: &'r ToolRegistry,
) -> McpResult<ValidatedCall<'r>> {
    let params = request
        .params
        .as_ref()
        .ok_or_else(|| McpError::InvalidParams("Tool call params required".to_string()))?;
    let params =
        ToolCallParams::deserialize(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let tool = registry
        .get_tool(&params.name)
        .ok_or_else(|| McpError::ToolNotFound(params.name.clone()))?;

    let supplied = params.arguments.unwrap_or_default();
    let mut arguments = ToolArguments::new();

    for spec in tool.params() {
        match supplied.get(&spec.name) {
            None | Some(Value::Null) if spec.required => {
                return Err(McpError::InvalidParams(format!(
                    "Missing required argument '{}' for tool '{}'",
                    spec.name,
                    tool.name()
                )))
            }
            None | Some(Value::Null) => {}
            Some(value) => arguments.insert(spec.name.clone(), check_argument(spec, value)?),
        }
    }

    Ok(ValidatedCall { tool, arguments })
}

fn check_argument(spec: &ParamSpec, value: &Value) -> McpResult<ArgValue> {
    match spec.param_type {
        ParamType::Number => coerce_number(&spec.name, value).map(ArgValue::Number),
        ParamType::String => {
            let text = value.as_str().ok_or_else(|| {
                McpError::InvalidParams(format!("'{}' must be a string, got {value}", spec.name))
            })?;

            if let Some(allowed) = &spec.allowed_values {
                let lowered = text.to_lowercase();
                if !allowed.iter().any(|a| a.to_lowercase() == lowered) {
                    return Err(McpError::InvalidParams(format!(
                        "'{}' must be one of [{}], got \"{text}\"",
                        spec.name,
                        allowed.join(", ")
                    )));
                }
            }

            Ok(ArgValue::Text(text.to_string()))
        }
    }
}

/// Numbers are accepted as JSON numbers or as numeric strings. Either way the
/// operand keeps the text it was sent with.
fn coerce_number(name: &str, value: &Value) -> McpResult<Operand> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(|v| Operand::new(n.to_string(), v))
            .ok_or_else(|| McpError::InvalidParams(format!("'{name}' is not representable as f64"))),
        Value::String(s) => {
            Operand::parse(s).map_err(|e| McpError::InvalidParams(format!("'{name}': {e}")))
        }
        other => Err(McpError::InvalidParams(format!(
            "'{name}' must be a number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::default_registry;
    use crate::types::error_codes::*;
    use serde_json::json;

    fn envelope_code(value: Value) -> i32 {
        validate_envelope(value).unwrap_err().code()
    }

    fn call_request(name: &str, arguments: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            id: 7,
            method: Method::ToolsCall,
            params: Some(json!({ "name": name, "arguments": arguments })),
        }
    }

    #[test]
    fn test_envelope_ok() {
        let req = validate_envelope(json!({
            "jsonrpc": "2.0", "id": 4, "method": "tools/list", "params": {}
        }))
        .unwrap();
        assert_eq!(req.id, 4);
        assert_eq!(req.method, Method::ToolsList);
        assert_eq!(req.params, Some(json!({})));
    }

    #[test]
    fn test_envelope_failures() {
        assert_eq!(envelope_code(json!([1, 2])), INVALID_REQUEST);
        assert_eq!(envelope_code(json!("tools/list")), INVALID_REQUEST);
        assert_eq!(
            envelope_code(json!({"jsonrpc": "1.0", "id": 1, "method": "tools/list"})),
            INVALID_REQUEST
        );
        assert_eq!(
            envelope_code(json!({"jsonrpc": 2.0, "id": 1, "method": "tools/list"})),
            INVALID_REQUEST
        );
        assert_eq!(
            envelope_code(json!({"jsonrpc": "2.0", "method": "tools/list"})),
            INVALID_REQUEST
        );
        assert_eq!(
            envelope_code(json!({"jsonrpc": "2.0", "id": "abc", "method": "tools/list"})),
            INVALID_REQUEST
        );
        assert_eq!(
            envelope_code(json!({"jsonrpc": "2.0", "id": 1.5, "method": "tools/list"})),
            INVALID_REQUEST
        );
        assert_eq!(
            envelope_code(json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"})),
            INVALID_REQUEST
        );
        assert_eq!(envelope_code(json!({"jsonrpc": "2.0", "id": 1})), INVALID_REQUEST);
    }

    #[test]
    fn test_envelope_reports_first_violation() {
        let err = validate_envelope(json!({"jsonrpc": "1.0", "id": "x"})).unwrap_err();
        assert!(err.to_string().contains("jsonrpc version"), "{err}");
    }

    #[test]
    fn test_tool_call_ok() {
        let registry = default_registry().unwrap();
        let req = call_request("add_numbers", json!({"a": 5, "b": 2.5}));
        let call = validate_tool_call(&req, &registry).unwrap();
        assert_eq!(call.tool.name(), "add_numbers");
        assert_eq!(call.arguments.number("a").unwrap().raw(), "5");
        assert_eq!(call.arguments.number("b").unwrap().value(), 2.5);
    }

    #[test]
    fn test_json_number_keeps_source_text() {
        let registry = default_registry().unwrap();
        let arguments: Value = serde_json::from_str(r#"{"a": 2.50, "b": 1e1}"#).unwrap();
        let req = call_request("add_numbers", arguments);
        let call = validate_tool_call(&req, &registry).unwrap();

        let a = call.arguments.number("a").unwrap();
        let b = call.arguments.number("b").unwrap();
        assert_eq!((a.raw(), a.value()), ("2.50", 2.5));
        assert_eq!((b.raw(), b.value()), ("1e1", 10.0));
    }

    #[test]
    fn test_unknown_tool() {
        let registry = default_registry().unwrap();
        let req = call_request("divide_numbers", json!({"a": 1, "b": 2}));
        let err = validate_tool_call(&req, &registry).unwrap_err();
        assert_eq!(err.code(), METHOD_NOT_FOUND);
    }

    #[test]
    fn test_missing_required_argument() {
        let registry = default_registry().unwrap();
        let req = call_request("add_numbers", json!({"a": 5}));
        let err = validate_tool_call(&req, &registry).unwrap_err();
        assert_eq!(err.code(), INVALID_PARAMS);

        let req = call_request("add_numbers", json!({"a": 5, "b": null}));
        assert!(validate_tool_call(&req, &registry).is_err());
    }

    #[test]
    fn test_number_coercion() {
        let registry = default_registry().unwrap();

        let req = call_request("multiply_numbers", json!({"a": "6", "b": " 7 "}));
        let call = validate_tool_call(&req, &registry).unwrap();
        assert_eq!(call.arguments.number("b").unwrap().raw(), "7");

        for bad in [json!("six"), json!(true), json!([1]), json!({"v": 1})] {
            let req = call_request("multiply_numbers", json!({"a": bad, "b": 1}));
            let err = validate_tool_call(&req, &registry).unwrap_err();
            assert_eq!(err.code(), INVALID_PARAMS);
        }
    }

    #[test]
    fn test_enumerated_operation() {
        let registry = default_registry().unwrap();

        let req = call_request("process_text", json!({"text": "x", "operation": "UPPER"}));
        assert!(validate_tool_call(&req, &registry).is_ok());

        let req = call_request("process_text", json!({"text": "x", "operation": "title"}));
        let err = validate_tool_call(&req, &registry).unwrap_err();
        assert_eq!(err.code(), INVALID_PARAMS);

        let req = call_request("process_text", json!({"text": 42, "operation": "upper"}));
        assert_eq!(validate_tool_call(&req, &registry).unwrap_err().code(), INVALID_PARAMS);
    }

    #[test]
    fn test_malformed_params() {
        let registry = default_registry().unwrap();
        let cases = [
            None,
            Some(json!({})),
            Some(json!({"name": 3})),
            Some(json!({"name": "add_numbers", "arguments": [1, 2]})),
        ];
        for params in cases {
            let req = JsonRpcRequest {
                id: 1,
                method: Method::ToolsCall,
                params,
            };
            assert_eq!(validate_tool_call(&req, &registry).unwrap_err().code(), INVALID_PARAMS);
        }
    }

    #[test]
    fn test_extra_arguments_ignored() {
        let registry = default_registry().unwrap();
        let req = call_request("add_numbers", json!({"a": 1, "b": 2, "c": 3}));
        let call = validate_tool_call(&req, &registry).unwrap();
        assert_eq!(call.arguments.len(), 2);
    }
}
