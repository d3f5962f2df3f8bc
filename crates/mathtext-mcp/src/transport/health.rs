//! Health and documentation service, served on its own listener.

use std::sync::Arc;

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use serde_json::Value;

use crate::openapi;
use crate::tools::ToolRegistry;
use crate::types::McpResult;

use super::http::{apply_layers, serve};

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
}

impl Default for HealthCheck {
    fn default() -> Self {
        Self { status: "OK" }
    }
}

/// `GET /health` for orchestration probes and `GET /mcp/openapi.json` for
/// documentation. Holds no mutable state.
pub struct HealthService {
    document: Arc<Value>,
    tool_count: usize,
    cors: bool,
}

impl HealthService {
    /// `rpc_url` is advertised as the server URL in the OpenAPI document.
    pub fn new(registry: &ToolRegistry, rpc_url: &str) -> Self {
        Self {
            document: Arc::new(openapi::document(registry, rpc_url)),
            tool_count: registry.len(),
            cors: false,
        }
    }

    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    pub fn router(&self) -> Router {
        let router = Router::new()
            .route("/health", get(handle_health))
            .route("/mcp/openapi.json", get(handle_openapi))
            .with_state(self.document.clone());
        apply_layers(router, self.cors)
    }

    pub async fn run(&self, addr: &str) -> McpResult<()> {
        tracing::info!("Health service reporting {} tools", self.tool_count);
        serve(self.router(), addr, "Health endpoint").await
    }
}

async fn handle_health() -> Json<HealthCheck> {
    Json(HealthCheck::default())
}

async fn handle_openapi(State(document): State<Arc<Value>>) -> Json<Value> {
    Json(document.as_ref().clone())
}
