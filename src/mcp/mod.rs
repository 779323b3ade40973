//! MCP protocol surface: envelopes, dispatch, and transports
//!
//! JSON-RPC over line-delimited stdio or single-POST HTTP.

pub mod dispatch;
pub mod http;
pub mod protocol;

pub use dispatch::Dispatcher;
pub use http::HttpServer;
pub use protocol::{
    methods, ContentBlock, InitializeResult, McpError, McpHandler, McpRequest, McpResponse,
    McpServer, ToolCallResult,
};
