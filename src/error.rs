//! Error types for Tiffin

use thiserror::Error;

/// Result type alias for Tiffin operations
pub type Result<T> = std::result::Result<T, ServerError>;

/// Protocol-level errors. These surface on the wire as the JSON-RPC
/// `error` field, never inside a tool result.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Duplicate tool registered: {0}")]
    DuplicateTool(String),

    #[error("Duplicate prompt registered: {0}")]
    DuplicatePrompt(String),

    #[error("Duplicate resource registered: {0}")]
    DuplicateResource(String),

    #[error("Invalid schema for {name}: {message}")]
    InvalidSchema { name: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i64 {
        match self {
            ServerError::Parse(_) => -32700,
            ServerError::MethodNotFound(_)
            | ServerError::UnknownTool(_)
            | ServerError::UnknownPrompt(_)
            | ServerError::UnknownResource(_) => -32601,
            _ => -32603,
        }
    }
}

/// Tool-call pipeline failures. The dispatcher maps these to a result with
/// `isError: true` rather than a wire error, so a caller can tell "the tool
/// reported failure" apart from "the protocol could not route the call".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    #[error("type mismatch for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("invalid value for field '{field}': expected one of {allowed:?}, got {actual}")]
    EnumViolation {
        field: String,
        allowed: Vec<String>,
        actual: String,
    },

    #[error("value for field '{field}' does not match pattern {pattern}")]
    PatternMismatch { field: String, pattern: String },

    #[error("{0}")]
    Execution(String),

    #[error("tool exceeded its time budget of {0}ms")]
    Timeout(u64),

    #[error("tool returned malformed output: {0}")]
    Output(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_codes() {
        assert_eq!(ServerError::Parse("bad".into()).code(), -32700);
        assert_eq!(ServerError::MethodNotFound("foo/bar".into()).code(), -32601);
        assert_eq!(ServerError::UnknownTool("nope".into()).code(), -32601);
        assert_eq!(ServerError::Internal("boom".into()).code(), -32603);
    }

    #[test]
    fn test_tool_error_messages_name_the_field() {
        let err = ToolError::MissingRequiredField {
            field: "location".into(),
        };
        assert!(err.to_string().contains("location"));

        let err = ToolError::TypeMismatch {
            field: "temperature".into(),
            expected: "integer".into(),
            actual: "string".into(),
        };
        assert!(err.to_string().contains("temperature"));
        assert!(err.to_string().contains("integer"));
    }
}
