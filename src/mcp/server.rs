//! MCP server setup and lifecycle.
//!
//! Implements a JSON-RPC 2.0 MCP server over stdio. Protocol responses go
//! to stdout; all diagnostics go through `tracing` to stderr so the
//! transport stream stays clean.
//!
//! Every `tools/call` passes through the access guard: the request
//! extractor maps the tool's operation shape to the resource id that needs
//! a verdict, and the call executes only when the resolver allows it.
//! Resolver errors deny (fail closed).

use crate::access::{AccessResolver, extract_page_id_from_request};
use crate::mcp::{McpMethod, ToolRegistry};
use crate::workspace::ApiExecutor;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// MCP protocol version.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name.
const SERVER_NAME: &str = "pagegate";

/// Maximum request body size (1MB) to prevent DoS via large payloads.
const MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024;

/// Incoming JSON-RPC request.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// Request id; absent for notifications.
    id: Option<Value>,
    /// Method name.
    method: String,
    /// Method parameters.
    #[serde(default)]
    params: Value,
}

/// Outgoing JSON-RPC response.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// MCP server for pagegate.
pub struct McpServer {
    /// Tool registry.
    tools: ToolRegistry,
    /// Access guard.
    resolver: Arc<AccessResolver>,
    /// Workspace API capability for proxied calls.
    executor: Arc<dyn ApiExecutor>,
}

impl McpServer {
    /// Creates a new MCP server.
    #[must_use]
    pub fn new(resolver: Arc<AccessResolver>, executor: Arc<dyn ApiExecutor>) -> Self {
        Self {
            tools: ToolRegistry::new(),
            resolver,
            executor,
        }
    }

    /// Runs the server over stdio until the input stream closes.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read or stdout cannot be written.
    pub async fn run_stdio(&self) -> Result<()> {
        info!(
            enabled = self.resolver.is_enabled(),
            roots = self.resolver.roots().len(),
            "starting MCP server on stdio"
        );

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        loop {
            let line = lines.next_line().await.map_err(|e| Error::OperationFailed {
                operation: "read_stdin".to_string(),
                cause: e.to_string(),
            })?;
            let Some(line) = line else {
                break;
            };
            if line.is_empty() {
                continue;
            }

            let Some(response) = self.handle_line(&line).await else {
                continue;
            };
            let mut payload =
                serde_json::to_string(&response).map_err(|e| Error::OperationFailed {
                    operation: "serialize_response".to_string(),
                    cause: e.to_string(),
                })?;
            payload.push('\n');
            let written = async {
                stdout.write_all(payload.as_bytes()).await?;
                stdout.flush().await
            };
            written.await.map_err(|e| Error::OperationFailed {
                operation: "write_stdout".to_string(),
                cause: e.to_string(),
            })?;
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Parses one request line and produces the response, if any.
    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        if line.len() > MAX_REQUEST_BODY_SIZE {
            warn!(size = line.len(), "request exceeds body size limit");
            return Some(JsonRpcResponse::failure(
                Value::Null,
                -32600,
                "request too large",
            ));
        }

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "unparseable request");
                return Some(JsonRpcResponse::failure(Value::Null, -32700, "parse error"));
            },
        };

        self.dispatch(request).await
    }

    /// Dispatches a parsed request; notifications produce no response.
    async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let method = McpMethod::from_name(&request.method);
        if method.is_notification() || request.id.is_none() {
            debug!(method = %method, "notification received");
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);

        let response = match method {
            McpMethod::Initialize => JsonRpcResponse::success(id, Self::initialize_result()),
            McpMethod::ListTools => JsonRpcResponse::success(id, self.list_tools_result()),
            McpMethod::CallTool => match self.call_tool(&request.params).await {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => {
                    // Tool-level failures are tool results, not protocol errors.
                    JsonRpcResponse::success(
                        id,
                        json!({
                            "content": [{ "type": "text", "text": e.to_string() }],
                            "isError": true
                        }),
                    )
                },
            },
            McpMethod::Ping => JsonRpcResponse::success(id, json!({})),
            McpMethod::Initialized => return None,
            McpMethod::Unknown(name) => {
                debug!(method = %name, "unknown method");
                JsonRpcResponse::failure(id, -32601, format!("method not found: {name}"))
            },
        };
        Some(response)
    }

    /// Builds the `initialize` result.
    fn initialize_result() -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    /// Builds the `tools/list` result.
    fn list_tools_result(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .list()
            .into_iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.input_schema
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    /// Executes a guarded `tools/call`.
    async fn call_tool(&self, params: &Value) -> Result<Value> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidInput("missing tool name".to_string()))?;
        let arguments = match params.get("arguments") {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                return Err(Error::InvalidInput(
                    "tool arguments must be an object".to_string(),
                ));
            },
        };

        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| Error::InvalidInput(format!("unknown tool: {name}")))?;

        self.authorize(tool.operation.path, &arguments).await?;

        let mut path_params = HashMap::new();
        for param in tool.operation.path_params {
            let value = arguments
                .get(*param)
                .and_then(Value::as_str)
                .ok_or_else(|| Error::InvalidInput(format!("missing parameter '{param}'")))?;
            path_params.insert((*param).to_string(), value.to_string());
        }

        let body = if tool.operation.method == "GET" {
            None
        } else {
            let mut body = arguments.clone();
            for param in tool.operation.path_params {
                body.remove(*param);
            }
            Some(Value::Object(body))
        };

        let data = self
            .executor
            .execute(tool.operation, &path_params, body.as_ref())
            .await?;

        let text =
            serde_json::to_string_pretty(&data).map_err(|e| Error::OperationFailed {
                operation: "render_tool_result".to_string(),
                cause: e.to_string(),
            })?;
        Ok(json!({ "content": [{ "type": "text", "text": text }] }))
    }

    /// Applies the access guard to one tool call.
    ///
    /// A request with no extractable resource id needs no verdict. Any
    /// resolver error denies.
    async fn authorize(&self, path: &str, arguments: &Map<String, Value>) -> Result<()> {
        let Some(resource) = extract_page_id_from_request(path, arguments) else {
            return Ok(());
        };

        match self.resolver.is_page_allowed(&resource).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::AccessDenied { resource }),
            Err(e) => {
                warn!(resource = %resource, error = %e, "access check failed, denying");
                Err(Error::AccessDenied { resource })
            },
        }
    }
}
