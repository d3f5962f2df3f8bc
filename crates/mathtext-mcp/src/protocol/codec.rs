//! Encoding and decoding of JSON-RPC envelopes.

use serde::Serialize;
use serde_json::Value;

use crate::types::{JsonRpcResponse, McpError, McpResult, RequestId};

/// Decode a request body into a JSON value.
pub fn decode(bytes: &[u8]) -> McpResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(McpError::ParseError("Empty message".to_string()));
    }

    serde_json::from_slice(bytes).map_err(|e| McpError::ParseError(e.to_string()))
}

/// Encode a success envelope carrying `result`.
pub fn encode_success<T: Serialize>(id: RequestId, result: &T) -> Vec<u8> {
    match serde_json::to_vec(&JsonRpcResponse::new(id, result)) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to encode result for request {id}: {e}");
            encode_error(id, &McpError::InternalError(e.to_string()))
        }
    }
}

/// Encode an error envelope. `id` is `RequestId::Null` when the request's id
/// could not be recovered.
pub fn encode_error(id: RequestId, error: &McpError) -> Vec<u8> {
    serde_json::to_vec(&error.to_json_rpc_error(id)).unwrap_or_default()
}
