//! Main request handler: threads a message through decode, validate,
//! dispatch and encode.

use std::sync::Arc;

use serde_json::Value;

use crate::tools::ToolRegistry;
use crate::types::{DispatchResult, JsonRpcRequest, McpResult, Method, RequestId};

use super::codec;
use super::dispatcher::{dispatch, Dispatch};
use super::validator::{validate_envelope, validate_tool_call};

/// Encoded reply to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A well-formed envelope, success or protocol error.
    Response(Vec<u8>),
    /// The body could not be decoded as JSON.
    ParseFailure(Vec<u8>),
}

impl Reply {
    pub fn body(&self) -> &[u8] {
        match self {
            Reply::Response(body) | Reply::ParseFailure(body) => body,
        }
    }

    pub fn into_body(self) -> Vec<u8> {
        match self {
            Reply::Response(body) | Reply::ParseFailure(body) => body,
        }
    }

    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Reply::ParseFailure(_))
    }
}

/// Stateless protocol handler over a shared, read-only registry.
#[derive(Debug, Clone)]
pub struct ProtocolHandler {
    registry: Arc<ToolRegistry>,
}

impl ProtocolHandler {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Handle a raw request body.
    pub fn handle_bytes(&self, body: &[u8]) -> Reply {
        match codec::decode(body) {
            Ok(envelope) => Reply::Response(self.handle_value(envelope)),
            Err(e) => {
                tracing::warn!("{e}");
                Reply::ParseFailure(codec::encode_error(RequestId::Null, &e))
            }
        }
    }

    /// Handle an already-decoded envelope. Always yields an encoded response.
    pub fn handle_value(&self, envelope: Value) -> Vec<u8> {
        let recovered_id = RequestId::recover(&envelope);

        let request = match validate_envelope(envelope) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Rejected request {recovered_id}: {e}");
                return codec::encode_error(recovered_id, &e);
            }
        };

        let id = RequestId::Number(request.id);
        tracing::debug!("Request {id}: {}", request.method);

        match self.process(&request) {
            Ok(result) => codec::encode_success(id, &result),
            Err(e) => {
                tracing::warn!("Request {id} ({}) failed: {e}", request.method);
                codec::encode_error(id, &e)
            }
        }
    }

    fn process(&self, request: &JsonRpcRequest) -> McpResult<DispatchResult> {
        let target = match request.method {
            Method::ToolsList => Dispatch::List,
            Method::ToolsCall => Dispatch::Call(validate_tool_call(request, &self.registry)?),
        };
        dispatch(&self.registry, target)
    }
}
