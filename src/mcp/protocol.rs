//! MCP JSON-RPC protocol types and stdio framing

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::{BufRead, Write};

use crate::error::Result;

/// Protocol revision reported by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP JSON-RPC request envelope.
///
/// An absent or null `id` marks a notification: no reply is sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McpRequest {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl McpRequest {
    pub fn is_notification(&self) -> bool {
        matches!(self.id, None | Some(Value::Null))
    }
}

/// MCP JSON-RPC response envelope. Exactly one of `result` and `error` is
/// present, never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP error object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McpError {
    pub code: i64,
    pub message: String,
}

impl McpResponse {
    /// Create a success response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: i64, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(McpError { code, message }),
        }
    }

    /// Create an error response from a protocol error
    pub fn from_error(id: Option<Value>, err: &crate::error::ServerError) -> Self {
        Self::error(id, err.code(), err.to_string())
    }
}

/// Standard MCP methods
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const INITIALIZED: &str = "notifications/initialized";
    pub const LIST_TOOLS: &str = "tools/list";
    pub const CALL_TOOL: &str = "tools/call";
    pub const LIST_PROMPTS: &str = "prompts/list";
    pub const GET_PROMPT: &str = "prompts/get";
    pub const LIST_RESOURCES: &str = "resources/list";
    pub const READ_RESOURCE: &str = "resources/read";
}

/// MCP initialize result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

/// Server capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
    pub prompts: PromptsCapability,
    pub resources: ResourcesCapability,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PromptsCapability {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesCapability {
    pub subscribe: bool,
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Server info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl Default for InitializeResult {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
                prompts: PromptsCapability::default(),
                resources: ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "tiffin".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Result payload for `tools/call`.
///
/// Structured tool output is serialized into a text content block rather
/// than nested natively; clients parse the text back into structure. This
/// flattening is part of the wire contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallResult {
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolCallResult {
    /// Create a text result
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Wrap a structured output mapping as a JSON text block
    pub fn json(output: &Map<String, Value>) -> Self {
        Self::text(Value::Object(output.clone()).to_string())
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }
}

/// Trait for handling decoded MCP requests.
///
/// Returning `None` means no reply is sent (notifications).
pub trait McpHandler: Send + Sync {
    fn handle_request(&self, request: McpRequest) -> Option<McpResponse>;
}

/// MCP server speaking line-delimited JSON over a duplex stream.
///
/// Each line is one complete envelope; no chunking across lines. The loop
/// is strictly sequential: one blocking read-dispatch-write cycle at a
/// time.
pub struct McpServer<H>
where
    H: McpHandler,
{
    handler: H,
}

impl<H: McpHandler> McpServer<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    /// Run the server, reading from stdin and writing to stdout.
    ///
    /// Stdout carries only protocol framing; diagnostics must go to
    /// stderr.
    pub fn run(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve requests from an arbitrary reader/writer pair until an empty
    /// line or end of stream.
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) => break, // EOF
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        break;
                    }
                    match serde_json::from_str::<McpRequest>(trimmed) {
                        Ok(request) => {
                            if let Some(response) = self.handler.handle_request(request) {
                                write_response(&mut writer, &response)?;
                            }
                        }
                        Err(e) => {
                            // Decode failures are non-fatal: report and keep reading.
                            let response =
                                McpResponse::error(None, -32700, format!("Parse error: {}", e));
                            write_response(&mut writer, &response)?;
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Error reading request stream: {}", e);
                    break;
                }
            }
        }
        Ok(())
    }
}

fn write_response<W: Write>(writer: &mut W, response: &McpResponse) -> Result<()> {
    let encoded = serde_json::to_string(response)?;
    writeln!(writer, "{}", encoded)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    struct EchoHandler;

    impl McpHandler for EchoHandler {
        fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
            if request.is_notification() {
                return None;
            }
            Some(McpResponse::success(
                request.id,
                json!({"method": request.method}),
            ))
        }
    }

    fn serve_lines(input: &str) -> Vec<McpResponse> {
        let server = McpServer::new(EchoHandler);
        let mut output = Vec::new();
        server
            .serve(Cursor::new(input.to_string()), &mut output)
            .expect("serve");
        String::from_utf8(output)
            .expect("utf8 output")
            .lines()
            .map(|l| serde_json::from_str(l).expect("response json"))
            .collect()
    }

    #[test]
    fn test_notification_detection() {
        let request: McpRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"x"}"#).expect("parse");
        assert!(request.is_notification());
        let request: McpRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":null,"method":"x"}"#).expect("parse");
        assert!(request.is_notification());
        let request: McpRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":7,"method":"x"}"#).expect("parse");
        assert!(!request.is_notification());
    }

    #[test]
    fn test_parse_error_is_non_fatal() {
        let responses = serve_lines(
            "{not json\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/list\"}\n",
        );
        assert_eq!(responses.len(), 2);
        let parse_error = responses[0].error.as_ref().expect("parse error");
        assert_eq!(parse_error.code, -32700);
        assert_eq!(responses[0].id, Value::Null);
        // The loop kept serving after the bad line.
        assert!(responses[1].result.is_some());
        assert_eq!(responses[1].id, json!(1));
    }

    #[test]
    fn test_empty_line_terminates_loop() {
        let responses = serve_lines(
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"a\"}\n\n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"b\"}\n",
        );
        assert_eq!(responses.len(), 1);
    }

    #[test]
    fn test_notifications_get_no_reply() {
        let responses = serve_lines("{\"jsonrpc\":\"2.0\",\"method\":\"notify\"}\n");
        assert!(responses.is_empty());
    }

    #[test]
    fn test_response_result_error_exclusivity() {
        let ok = McpResponse::success(Some(json!(1)), json!({}));
        assert!(ok.result.is_some() && ok.error.is_none());
        let err = McpResponse::error(Some(json!(1)), -32601, "nope".to_string());
        assert!(err.result.is_none() && err.error.is_some());
    }

    #[test]
    fn test_response_round_trip() {
        let original = McpResponse::success(Some(json!("req-9")), json!({"tools": []}));
        let encoded = serde_json::to_string(&original).expect("encode");
        let decoded: McpResponse = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_tool_call_result_flattens_to_text() {
        let mut output = Map::new();
        output.insert("location".to_string(), json!("Bengaluru"));
        let result = ToolCallResult::json(&output);
        assert!(!result.is_error);
        let ContentBlock::Text { text } = &result.content[0];
        let parsed: Value = serde_json::from_str(text).expect("text payload is JSON");
        assert_eq!(parsed["location"], "Bengaluru");
    }
}
