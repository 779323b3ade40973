//! Tool, prompt, and resource registries
//!
//! Registries are populated once during startup and frozen before the
//! first request is served, so they can be shared across transports
//! without locks. Enumeration preserves registration order.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{Result, ServerError, ToolError};
use crate::schema::Schema;

/// Handler invoked for `tools/call`. Receives the validated argument map
/// and returns a raw output mapping, which is validated against the tool's
/// output schema before it reaches the wire.
pub type ToolHandler =
    Arc<dyn Fn(Map<String, Value>) -> std::result::Result<Map<String, Value>, ToolError> + Send + Sync>;

/// A named, schema-described unit of server-side functionality.
/// Immutable after registration.
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Schema,
    pub output_schema: Schema,
    pub handler: ToolHandler,
}

/// Insertion-ordered mapping from tool name to descriptor.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Fails on a duplicate name or a malformed schema.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<()> {
        if self.index.contains_key(&descriptor.name) {
            return Err(ServerError::DuplicateTool(descriptor.name));
        }
        descriptor
            .input_schema
            .check()
            .map_err(|message| ServerError::InvalidSchema {
                name: descriptor.name.clone(),
                message,
            })?;
        descriptor
            .output_schema
            .check()
            .map_err(|message| ServerError::InvalidSchema {
                name: descriptor.name.clone(),
                message,
            })?;
        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(descriptor);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// All tools in registration order.
    pub fn list_all(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// One message of a rendered prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptMessage {
    pub role: String,
    pub text: String,
}

impl PromptMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            text: text.into(),
        }
    }
}

/// Renders a prompt template into messages. Missing arguments default to
/// the empty string.
pub type PromptRenderer =
    Arc<dyn Fn(&Map<String, Value>) -> Vec<PromptMessage> + Send + Sync>;

/// Declared argument of a prompt template.
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

pub struct PromptDescriptor {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
    pub renderer: PromptRenderer,
}

#[derive(Default)]
pub struct PromptRegistry {
    prompts: Vec<PromptDescriptor>,
    index: HashMap<String, usize>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: PromptDescriptor) -> Result<()> {
        if self.index.contains_key(&descriptor.name) {
            return Err(ServerError::DuplicatePrompt(descriptor.name));
        }
        self.index
            .insert(descriptor.name.clone(), self.prompts.len());
        self.prompts.push(descriptor);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&PromptDescriptor> {
        self.index.get(name).map(|&i| &self.prompts[i])
    }

    pub fn list_all(&self) -> &[PromptDescriptor] {
        &self.prompts
    }
}

/// A static document addressed by exact URI string match.
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
    pub text: String,
}

#[derive(Default)]
pub struct ResourceRegistry {
    resources: Vec<ResourceDescriptor>,
    index: HashMap<String, usize>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: ResourceDescriptor) -> Result<()> {
        if self.index.contains_key(&descriptor.uri) {
            return Err(ServerError::DuplicateResource(descriptor.uri));
        }
        self.index
            .insert(descriptor.uri.clone(), self.resources.len());
        self.resources.push(descriptor);
        Ok(())
    }

    pub fn lookup(&self, uri: &str) -> Option<&ResourceDescriptor> {
        self.index.get(uri).map(|&i| &self.resources[i])
    }

    pub fn list_all(&self) -> &[ResourceDescriptor] {
        &self.resources
    }
}
