//! JSON-RPC protocol core: decode, validate, dispatch, encode.

pub mod codec;
pub mod dispatcher;
pub mod handler;
pub mod validator;

pub use dispatcher::{dispatch, Dispatch};
pub use handler::{ProtocolHandler, Reply};
pub use validator::{validate_envelope, validate_tool_call, ValidatedCall};
