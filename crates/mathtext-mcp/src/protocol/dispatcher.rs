//! Routes validated requests to the registry.

use crate::tools::ToolRegistry;
use crate::types::{DispatchResult, McpResult, ToolListResult};

use super::validator::ValidatedCall;

/// A request ready to be dispatched.
#[derive(Debug)]
pub enum Dispatch<'r> {
    List,
    Call(ValidatedCall<'r>),
}

pub fn dispatch(registry: &ToolRegistry, request: Dispatch<'_>) -> McpResult<DispatchResult> {
    match request {
        Dispatch::List => Ok(DispatchResult::List(ToolListResult {
            tools: registry.definitions(),
        })),
        Dispatch::Call(call) => {
            tracing::debug!("Invoking tool '{}'", call.tool.name());
            call.tool.invoke(&call.arguments).map(DispatchResult::Call)
        }
    }
}
