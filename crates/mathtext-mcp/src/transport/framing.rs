//! Message framing for newline-delimited JSON.

use serde_json::Value;

use crate::protocol::codec;
use crate::types::McpResult;

/// Parse a single line of text as a JSON value.
pub fn parse_message(line: &str) -> McpResult<Value> {
    codec::decode(line.trim().as_bytes())
}

/// Terminate an encoded message with a newline.
pub fn frame_message(mut body: Vec<u8>) -> Vec<u8> {
    body.push(b'\n');
    body
}
