//! Stdio tool server.
//!
//! - [`rpc`] - JSON-RPC request handling
//! - [`stdio`] - line-delimited async transport

mod rpc;
mod stdio;

pub use rpc::{
    tool_definition, RpcRequest, ToolServer, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
pub use stdio::{serve, serve_stdio};
