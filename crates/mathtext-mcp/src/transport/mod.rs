//! Transport layer: HTTP (RPC endpoint + health service) and stdio.

pub mod framing;
#[cfg(feature = "http")]
pub mod health;
#[cfg(feature = "http")]
pub mod http;
pub mod stdio;

#[cfg(feature = "http")]
pub use health::HealthService;
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use stdio::StdioTransport;
