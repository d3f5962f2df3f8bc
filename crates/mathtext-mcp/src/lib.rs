//! mathtext MCP server: arithmetic and text tools over JSON-RPC.

pub mod config;
pub mod openapi;
pub mod protocol;
pub mod repl;
pub mod tools;
pub mod transport;
pub mod types;

pub use protocol::ProtocolHandler;
pub use tools::{default_registry, ToolRegistry};
pub use transport::StdioTransport;
#[cfg(feature = "http")]
pub use transport::{HealthService, HttpTransport};
