//! Request routing and the tools/call pipeline
//!
//! The dispatcher resolves method names against the frozen registries and
//! produces one response per request. Tool-level failures (validation,
//! execution, timeout) come back as successful envelopes carrying
//! `isError: true`; only unroutable requests become wire errors.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde_json::{json, Map, Value};

use super::protocol::{methods, InitializeResult, McpHandler, McpRequest, McpResponse, ToolCallResult};
use crate::error::{ServerError, ToolError};
use crate::registry::{PromptRegistry, ResourceRegistry, ToolDescriptor, ToolRegistry};
use crate::validate::{validate_input, validate_output};

/// Default wall-clock budget for a single tool invocation.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Routes decoded request envelopes to the registries.
///
/// Stateless per call apart from the one-time `initialize` flag. Methods
/// are served even before `initialize` completes; strict clients still get
/// the handshake they expect, permissive ones can skip it.
pub struct Dispatcher {
    tools: ToolRegistry,
    prompts: PromptRegistry,
    resources: ResourceRegistry,
    tool_timeout: Duration,
    initialized: AtomicBool,
}

impl Dispatcher {
    pub fn new(tools: ToolRegistry, prompts: PromptRegistry, resources: ResourceRegistry) -> Self {
        Self {
            tools,
            prompts,
            resources,
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
            initialized: AtomicBool::new(false),
        }
    }

    /// Set the per-call execution budget for tool handlers.
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    /// Whether a successful `initialize` has been observed.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Relaxed)
    }

    fn dispatch(&self, request: &McpRequest) -> Result<Value, ServerError> {
        match request.method.as_str() {
            methods::INITIALIZE => {
                self.initialized.store(true, Ordering::Relaxed);
                Ok(json!(InitializeResult::default()))
            }
            methods::LIST_TOOLS => Ok(self.tools_list()),
            methods::CALL_TOOL => self.tools_call(&request.params),
            methods::LIST_PROMPTS => Ok(self.prompts_list()),
            methods::GET_PROMPT => self.prompts_get(&request.params),
            methods::LIST_RESOURCES => Ok(self.resources_list()),
            methods::READ_RESOURCE => self.resources_read(&request.params),
            other => Err(ServerError::MethodNotFound(other.to_string())),
        }
    }

    /// List registered tools in registration order. Output schemas are not
    /// exposed on the wire.
    fn tools_list(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .list_all()
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.input_schema.to_json_schema(),
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    fn tools_call(&self, params: &Value) -> Result<Value, ServerError> {
        let name = params.get("name").and_then(Value::as_str).unwrap_or("");
        let tool = self
            .tools
            .lookup(name)
            .ok_or_else(|| ServerError::UnknownTool(name.to_string()))?;
        let arguments = params
            .get("arguments")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let result = match self.invoke(tool, arguments) {
            Ok(output) => ToolCallResult::json(&output),
            Err(err) => {
                tracing::debug!("tool {} failed: {}", name, err);
                ToolCallResult::error(err.to_string())
            }
        };
        Ok(json!(result))
    }

    /// Validate input, execute under the time budget, validate output.
    fn invoke(
        &self,
        tool: &ToolDescriptor,
        arguments: Map<String, Value>,
    ) -> Result<Map<String, Value>, ToolError> {
        validate_input(&tool.input_schema, &arguments)?;
        let output = self.run_handler(tool, arguments)?;
        validate_output(&tool.output_schema, &output)?;
        Ok(output)
    }

    /// Run a handler on its own thread so a slow or panicking tool is
    /// fatal only to its own call, never to the transport.
    fn run_handler(
        &self,
        tool: &ToolDescriptor,
        arguments: Map<String, Value>,
    ) -> Result<Map<String, Value>, ToolError> {
        let handler = tool.handler.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(handler(arguments));
        });
        match rx.recv_timeout(self.tool_timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                Err(ToolError::Timeout(self.tool_timeout.as_millis() as u64))
            }
            // A dropped sender means the handler aborted before reporting.
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(ToolError::Execution("tool handler aborted".to_string()))
            }
        }
    }

    fn prompts_list(&self) -> Value {
        let prompts: Vec<Value> = self
            .prompts
            .list_all()
            .iter()
            .map(|prompt| {
                let arguments: Vec<Value> = prompt
                    .arguments
                    .iter()
                    .map(|arg| {
                        json!({
                            "name": arg.name,
                            "description": arg.description,
                            "required": arg.required,
                        })
                    })
                    .collect();
                json!({
                    "name": prompt.name,
                    "description": prompt.description,
                    "arguments": arguments,
                })
            })
            .collect();
        json!({ "prompts": prompts })
    }

    fn prompts_get(&self, params: &Value) -> Result<Value, ServerError> {
        let name = params.get("name").and_then(Value::as_str).unwrap_or("");
        let prompt = self
            .prompts
            .lookup(name)
            .ok_or_else(|| ServerError::UnknownPrompt(name.to_string()))?;
        let arguments = params
            .get("arguments")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let messages: Vec<Value> = (prompt.renderer)(&arguments)
            .into_iter()
            .map(|message| {
                json!({
                    "role": message.role,
                    "content": { "type": "text", "text": message.text },
                })
            })
            .collect();
        Ok(json!({
            "description": prompt.description,
            "messages": messages,
        }))
    }

    fn resources_list(&self) -> Value {
        let resources: Vec<Value> = self
            .resources
            .list_all()
            .iter()
            .map(|resource| {
                json!({
                    "uri": resource.uri,
                    "name": resource.name,
                    "description": resource.description,
                    "mimeType": resource.mime_type,
                })
            })
            .collect();
        json!({ "resources": resources })
    }

    fn resources_read(&self, params: &Value) -> Result<Value, ServerError> {
        let uri = params.get("uri").and_then(Value::as_str).unwrap_or("");
        let resource = self
            .resources
            .lookup(uri)
            .ok_or_else(|| ServerError::UnknownResource(uri.to_string()))?;
        Ok(json!({
            "contents": [{
                "uri": resource.uri,
                "mimeType": resource.mime_type,
                "text": resource.text,
            }]
        }))
    }
}

impl McpHandler for Dispatcher {
    fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        if request.method == methods::INITIALIZED {
            // Client acknowledgement of the handshake; nothing to do.
            return if request.is_notification() {
                None
            } else {
                Some(McpResponse::success(request.id, json!({})))
            };
        }
        let response = match self.dispatch(&request) {
            Ok(result) => McpResponse::success(request.id.clone(), result),
            Err(err) => {
                tracing::debug!("request {} rejected: {}", request.method, err);
                McpResponse::from_error(request.id.clone(), &err)
            }
        };
        if request.is_notification() {
            None
        } else {
            Some(response)
        }
    }
}
