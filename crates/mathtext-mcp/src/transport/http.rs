//! HTTP transport: the `POST /message` JSON-RPC endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::protocol::ProtocolHandler;
use crate::types::{McpError, McpResult};

/// HTTP transport for JSON-RPC clients.
pub struct HttpTransport {
    handler: Arc<ProtocolHandler>,
    cors: bool,
}

impl HttpTransport {
    pub fn new(handler: ProtocolHandler) -> Self {
        Self {
            handler: Arc::new(handler),
            cors: false,
        }
    }

    /// Allow cross-origin requests from any origin.
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    pub fn router(&self) -> Router {
        let router = Router::new()
            .route("/message", post(handle_message))
            .with_state(self.handler.clone());
        apply_layers(router, self.cors)
    }

    /// Run the HTTP server on the given address.
    pub async fn run(&self, addr: &str) -> McpResult<()> {
        serve(self.router(), addr, "JSON-RPC endpoint").await
    }
}

/// Protocol errors travel in the body with HTTP 200; only an undecodable
/// body gets a 400.
async fn handle_message(State(handler): State<Arc<ProtocolHandler>>, body: Bytes) -> Response {
    let reply = handler.handle_bytes(&body);
    let status = if reply.is_parse_failure() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.into_body(),
    )
        .into_response()
}

pub(crate) fn apply_layers(router: Router, cors: bool) -> Router {
    let router = router.layer(TraceLayer::new_for_http());
    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

pub(crate) async fn serve(app: Router, addr: &str, label: &str) -> McpResult<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(McpError::Io)?;

    tracing::info!("{label} listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| McpError::Transport(e.to_string()))?;

    Ok(())
}
