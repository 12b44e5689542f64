//! Model Context Protocol server over stdio.
//!
//! One JSON-RPC message per line. Requests are handled in arrival order and
//! each response is written before the next line is read. Logging must go to
//! stderr: stdout carries only protocol frames.

pub mod protocol;
pub mod registry;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use registry::Registry;

use crate::config::Config;
use crate::jobs::{JSearchClient, JobStore};
use crate::prompts::builtin_prompts;
use crate::resources::{ResumeResource, SavedJobsResource};
use crate::tools::{SaveJobTool, SearchJobsTool};
use anyhow::Result;
use protocol::{INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "Job Market Explorer";

/// Wires the job tools, resources and prompts for `config`.
pub fn build_registry(config: &Config) -> Result<Registry> {
    config.storage.ensure_dirs()?;

    let store = JobStore::from_config(&config.storage);
    let source = Arc::new(JSearchClient::from_config(&config.search));

    let mut registry = Registry::new();
    registry.register_tool(Box::new(SearchJobsTool::new(source, store.clone())));
    registry.register_tool(Box::new(SaveJobTool::new(store.clone())));
    registry.register_resource(Box::new(ResumeResource::new(
        config.storage.resume_path.clone(),
    )));
    registry.register_resource(Box::new(SavedJobsResource::new(store)));
    for prompt in builtin_prompts() {
        registry.register_prompt(prompt);
    }

    Ok(registry)
}

pub struct McpServer {
    registry: Registry,
    name: String,
    version: String,
}

impl McpServer {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(name = %self.name, version = %self.version, "MCP server listening on stdio");

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut frame = serde_json::to_string(&response)?;
                frame.push('\n');
                writer.write_all(frame.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handles one frame. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Unparseable message: {}", e);
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("Parse error: {e}")),
                ));
            }
        };

        let has_id = value.get("id").is_some();
        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) if !has_id => {
                debug!("Ignoring non-request message: {}", e);
                return None;
            }
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(INVALID_REQUEST, format!("Invalid request: {e}")),
                ));
            }
        };

        debug!(method = %request.method, "Received request");

        if request.is_notification() {
            return None;
        }

        if !request.has_valid_version() {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(
                    INVALID_REQUEST,
                    format!("Invalid request: unsupported jsonrpc version '{}'", request.jsonrpc),
                ),
            ));
        }

        let params = request.params.unwrap_or_else(|| json!({}));
        let response = match self.dispatch(&request.method, params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        };
        Some(response)
    }

    async fn dispatch(&self, method: &str, params: Value) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {},
                    "resources": {},
                    "prompts": {}
                },
                "serverInfo": {
                    "name": self.name,
                    "version": self.version
                }
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(params).await,
            "resources/list" => Ok(self.list_resources()),
            "resources/read" => self.read_resource(params).await,
            "prompts/list" => Ok(self.list_prompts()),
            "prompts/get" => self.get_prompt(params),
            _ => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {method}"),
            )),
        }
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .registry
            .tool_specs()
            .into_iter()
            .map(|spec| {
                json!({
                    "name": spec.name,
                    "description": spec.description,
                    "inputSchema": spec.parameters_schema
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, params: Value) -> Result<Value, JsonRpcError> {
        let name = string_param(&params, "name")?;
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        let result = self.registry.execute(name, arguments).await;
        Ok(json!({
            "content": [{ "type": "text", "text": result.text() }],
            "isError": !result.success
        }))
    }

    fn list_resources(&self) -> Value {
        let resources: Vec<Value> = self
            .registry
            .resource_specs()
            .into_iter()
            .map(|spec| {
                json!({
                    "uri": spec.uri,
                    "name": spec.name,
                    "description": spec.description,
                    "mimeType": spec.mime_type
                })
            })
            .collect();
        json!({ "resources": resources })
    }

    async fn read_resource(&self, params: Value) -> Result<Value, JsonRpcError> {
        let uri = string_param(&params, "uri")?;
        let resource = self
            .registry
            .resource(uri)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown resource: {uri}")))?;

        let text = resource
            .read()
            .await
            .map_err(|e| JsonRpcError::internal(format!("{e:#}")))?;

        Ok(json!({
            "contents": [{
                "uri": uri,
                "mimeType": resource.mime_type(),
                "text": text
            }]
        }))
    }

    fn list_prompts(&self) -> Value {
        let prompts: Vec<Value> = self
            .registry
            .prompt_specs()
            .into_iter()
            .map(|spec| {
                json!({
                    "name": spec.name,
                    "description": spec.description,
                    "arguments": spec.arguments
                })
            })
            .collect();
        json!({ "prompts": prompts })
    }

    fn get_prompt(&self, params: Value) -> Result<Value, JsonRpcError> {
        let name = string_param(&params, "name")?;
        let prompt = self
            .registry
            .prompt(name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown prompt: {name}")))?;

        let args = prompt_arguments(params.get("arguments"));
        let text = prompt
            .render(&args)
            .map_err(|e| JsonRpcError::invalid_params(format!("{e:#}")))?;

        Ok(json!({
            "description": prompt.description(),
            "messages": [{
                "role": "user",
                "content": { "type": "text", "text": text }
            }]
        }))
    }
}

fn string_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, JsonRpcError> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| JsonRpcError::invalid_params(format!("Missing '{key}' parameter")))
}

/// Prompt arguments are strings on the wire; numbers and booleans are accepted too.
fn prompt_arguments(raw: Option<&Value>) -> HashMap<String, String> {
    let Some(Value::Object(map)) = raw else {
        return HashMap::new();
    };

    map.iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Null => return None,
                other => other.to_string(),
            };
            Some((key.clone(), value))
        })
        .collect()
}
