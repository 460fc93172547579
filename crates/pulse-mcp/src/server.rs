//! Stdio transport MCP server
//!
//! Reads one JSON-RPC message per line from the host and writes one response
//! per line back. Requests are handled one at a time in arrival order.

use crate::protocol::{
    CallToolParams, INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest, JsonRpcResponse,
    METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
};
use crate::{MCPError, Result};
use pulse_tools::{ToolError, ToolRegistry};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Identity reported in the `initialize` handshake
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// MCP server exposing a tool registry over stdio
pub struct StdioServer {
    info: ServerInfo,
    registry: Arc<ToolRegistry>,
}

impl StdioServer {
    /// Create a new server for the given registry
    pub fn new(info: ServerInfo, registry: Arc<ToolRegistry>) -> Self {
        Self { info, registry }
    }

    /// Serve on the process's stdin/stdout until the host closes stdin
    pub async fn run(&self) -> Result<()> {
        info!(
            "Starting MCP server {} v{} with {} tools",
            self.info.name,
            self.info.version,
            self.registry.len()
        );
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve on an arbitrary line-oriented transport
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| MCPError::TransportFailed(e.to_string()))?
        {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut payload = serde_json::to_vec(&response)?;
                payload.push(b'\n');
                writer
                    .write_all(&payload)
                    .await
                    .map_err(|e| MCPError::TransportFailed(e.to_string()))?;
                writer
                    .flush()
                    .await
                    .map_err(|e| MCPError::TransportFailed(e.to_string()))?;
            }
        }

        info!("Host closed the connection");
        Ok(())
    }

    /// Handle one raw message; `None` means no response is owed
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Discarding malformed message: {}", e);
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(raw.clone()) {
            Ok(request) => request,
            Err(e) => {
                let id = raw.get("id").cloned().unwrap_or(Value::Null);
                return Some(JsonRpcResponse::failure(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid request: {e}"),
                ));
            }
        };

        self.handle_request(request).await
    }

    /// Dispatch a parsed request
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("Received {}", request.method);

        let Some(id) = request.id.clone() else {
            // Notifications (e.g. notifications/initialized) need no reply
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                json!({ "tools": self.registry.descriptors() }),
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            other => JsonRpcResponse::failure(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        };

        Some(response)
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": self.info.name,
                "version": self.info.version
            }
        })
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams =
            match serde_json::from_value(params.unwrap_or(Value::Null)) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::failure(
                        id,
                        INVALID_PARAMS,
                        format!("Invalid tools/call params: {e}"),
                    );
                }
            };

        if self.registry.get(&params.name).is_none() {
            return JsonRpcResponse::failure(
                id,
                INVALID_PARAMS,
                format!("Unknown tool: {}", params.name),
            );
        }

        let arguments = params.arguments.unwrap_or_else(|| json!({}));
        info!("Calling tool {}", params.name);

        match self.registry.call(&params.name, arguments).await {
            Ok(output) => JsonRpcResponse::success(id, tool_result(&output, false)),
            Err(ToolError::InvalidParams(msg)) => {
                JsonRpcResponse::failure(id, INVALID_PARAMS, msg)
            }
            Err(e) => {
                warn!("Tool {} failed: {}", params.name, e);
                JsonRpcResponse::success(id, tool_result(&json!(e.to_string()), true))
            }
        }
    }
}

/// Wrap tool output as MCP text content
fn tool_result(output: &Value, is_error: bool) -> Value {
    let text = match output {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };

    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error
    })
}
