//! Tool server that reads JSON-RPC 2.0 messages from stdin and writes
//! responses to stdout, one message per line.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::service::RxCheck;

use super::tools::{get_tool_definitions, handle_tool_call};
use super::transport::{ErrorCode, JsonRpcRequest, JsonRpcResponse};

/// Runtime statistics for the MCP server.
pub struct ServerStats {
    started_at: Instant,
    total_requests: AtomicU64,
    tool_calls: AtomicU64,
    errors: AtomicU64,
}

impl ServerStats {
    fn new() -> Self {
        Self {
            started_at: Instant::now(),
            total_requests: AtomicU64::new(0),
            tool_calls: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }
}

/// The tool server wrapping an `RxCheck` instance.
pub struct McpServer {
    rx: RxCheck,
    stats: ServerStats,
    tool_call_counts: std::sync::Mutex<HashMap<String, u64>>,
}

impl McpServer {
    /// Creates a new server backed by the given service.
    pub fn new(rx: RxCheck) -> Self {
        Self {
            rx,
            stats: ServerStats::new(),
            tool_call_counts: std::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Runs the server on stdin/stdout until stdin is closed.
    pub async fn run(&self) -> Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.serve(reader, &mut stdout).await
    }

    /// Serves requests from `reader`, writing one response line per request
    /// to `writer`, until the reader reaches end of input.
    pub async fn serve<R, W>(&self, reader: R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("tool server started");
        let mut lines = reader.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }

            let parsed: std::result::Result<JsonRpcRequest, _> = serde_json::from_str(&line);

            let response = match parsed {
                Ok(request) => self.handle_request(&request),
                Err(e) => Some(JsonRpcResponse::error(
                    Value::Null,
                    ErrorCode::ParseError,
                    format!("failed to parse JSON-RPC request: {}", e),
                )),
            };

            if let Some(resp) = response {
                let json_line = match serde_json::to_string(&resp) {
                    Ok(s) => s,
                    Err(e) => {
                        warn!(error = %e, "failed to serialize response");
                        continue;
                    }
                };
                let output = format!("{}\n", json_line);
                if let Err(e) = writer.write_all(output.as_bytes()).await {
                    warn!(error = %e, "failed to write response");
                    break;
                }
                if let Err(e) = writer.flush().await {
                    warn!(error = %e, "failed to flush output");
                    break;
                }
            }
        }

        info!("input closed; tool server stopping");
        Ok(())
    }

    /// Dispatches a parsed JSON-RPC request to the appropriate handler.
    ///
    /// Returns `None` for notifications (requests without an `id`).
    pub fn handle_request(&self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        self.stats.total_requests.fetch_add(1, Ordering::Relaxed);
        let id = request.id.clone();
        debug!(method = request.method.as_str(), "request received");

        if let Err(resp) = request.check_version() {
            self.stats.errors.fetch_add(1, Ordering::Relaxed);
            return Some(resp);
        }

        let result = match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(id)),
            "initialized" | "notifications/initialized" => None,
            "tools/list" => Some(self.handle_tools_list(id)),
            "tools/call" => Some(self.handle_tools_call(request)),
            "ping" => Some(JsonRpcResponse::success(id, json!({}))),
            _ if request.is_notification() => None,
            _ => Some(JsonRpcResponse::error(
                id,
                ErrorCode::MethodNotFound,
                format!("method not found: {}", request.method),
            )),
        };

        // Track errors
        if let Some(ref resp) = result {
            if resp.error.is_some() {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
            }
        }

        result
    }

    /// Handles the `initialize` method, returning server capabilities.
    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "rxcheck",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    /// Handles the `tools/list` method, returning all available tool definitions.
    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let tools = get_tool_definitions();
        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Handles the `tools/call` method, dispatching to the appropriate tool handler.
    fn handle_tools_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let call = match request.tool_call() {
            Ok(call) => call,
            Err(resp) => return resp,
        };
        let id = request.id.clone();

        self.stats.tool_calls.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut counts) = self.tool_call_counts.lock() {
            *counts.entry(call.name.clone()).or_insert(0) += 1;
        }

        let server_stats = if call.name == "rxcheck_status" {
            Some(self.server_stats_json())
        } else {
            None
        };

        match handle_tool_call(&self.rx, &call.name, call.arguments, server_stats) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                debug!(tool = call.name.as_str(), error = %e, "tool call failed");
                JsonRpcResponse::tool_failure(id, &call.name, &e)
            }
        }
    }

    /// Returns the current server runtime statistics as a JSON value.
    pub fn server_stats_json(&self) -> Value {
        let uptime = self.stats.started_at.elapsed();
        let tool_counts: Value = self
            .tool_call_counts
            .lock()
            .map(|counts| json!(*counts))
            .unwrap_or(json!({}));

        json!({
            "uptime_secs": uptime.as_secs(),
            "total_requests": self.stats.total_requests.load(Ordering::Relaxed),
            "tool_calls": self.stats.tool_calls.load(Ordering::Relaxed),
            "errors": self.stats.errors.load(Ordering::Relaxed),
            "tool_call_counts": tool_counts,
        })
    }
}
