//! Tiffin - a demo MCP server
//!
//! JSON-RPC tool invocation with schema-validated inputs and outputs.
//! The built-in tools form a chain managed by the caller: location feeds
//! weather, weather feeds food.

pub mod error;
pub mod mcp;
pub mod prompts;
pub mod registry;
pub mod resources;
pub mod schema;
pub mod tools;
pub mod validate;

pub use error::{Result, ServerError, ToolError};
pub use registry::{PromptRegistry, ResourceRegistry, ToolRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
