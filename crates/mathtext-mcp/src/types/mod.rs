//! All protocol data types used by the server.

pub mod error;
pub mod message;
pub mod request;
pub mod response;
pub mod server;

pub use error::*;
pub use message::*;
pub use request::*;
pub use response::*;
pub use server::*;
