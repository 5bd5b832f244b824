//! JSON-RPC 2.0 envelopes for the stdio tool server, plus the mapping from
//! service errors onto JSON-RPC error objects.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::RxCheckError;

pub const JSONRPC_VERSION: &str = "2.0";

/// An incoming request or notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// Number, string or null; absent on notifications.
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Notifications carry no id and never get a response.
    pub fn is_notification(&self) -> bool {
        self.id.is_null()
    }

    /// Rejects envelopes that do not declare protocol version 2.0.
    pub fn check_version(&self) -> Result<(), JsonRpcResponse> {
        if self.jsonrpc == JSONRPC_VERSION {
            Ok(())
        } else {
            Err(JsonRpcResponse::error(
                self.id.clone(),
                ErrorCode::InvalidRequest,
                format!("unsupported jsonrpc version: {}", self.jsonrpc),
            ))
        }
    }

    /// Extracts the tool name and arguments of a `tools/call` request.
    /// Missing `arguments` means an empty argument object.
    pub fn tool_call(&self) -> Result<ToolCall, JsonRpcResponse> {
        let params = self.params.as_ref().ok_or_else(|| {
            JsonRpcResponse::error(
                self.id.clone(),
                ErrorCode::InvalidParams,
                "missing params for tools/call".to_string(),
            )
        })?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                JsonRpcResponse::error(
                    self.id.clone(),
                    ErrorCode::InvalidParams,
                    "missing 'name' in tools/call params".to_string(),
                )
            })?;

        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => json!({}),
            Some(args @ Value::Object(_)) => args.clone(),
            Some(_) => {
                return Err(JsonRpcResponse::error(
                    self.id.clone(),
                    ErrorCode::InvalidParams,
                    "'arguments' must be an object".to_string(),
                ))
            }
        };

        Ok(ToolCall {
            name: name.to_string(),
            arguments,
        })
    }
}

/// Name and arguments of one `tools/call`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Value,
}

/// An outgoing response. Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: ErrorCode, message: String) -> Self {
        Self::with_error(
            id,
            JsonRpcError {
                code: code.as_i32(),
                message,
                data: None,
            },
        )
    }

    /// Error response for a failed tool call. The `data` member names the
    /// error kind and, for unknown drugs, lists the offending names so that
    /// clients need not parse the message.
    pub fn tool_failure(id: Value, tool: &str, err: &RxCheckError) -> Self {
        Self::with_error(
            id,
            JsonRpcError {
                code: error_code(err).as_i32(),
                message: format!("{} failed: {}", tool, err),
                data: Some(error_data(err)),
            },
        )
    }

    fn with_error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// JSON-RPC 2.0 error codes used by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }
}

/// Problems with the caller's input are invalid params; everything else
/// (tables not loaded, config, I/O) is internal.
pub fn error_code(err: &RxCheckError) -> ErrorCode {
    if err.is_caller_error() {
        ErrorCode::InvalidParams
    } else {
        ErrorCode::InternalError
    }
}

fn error_data(err: &RxCheckError) -> Value {
    match err {
        RxCheckError::UnknownDrug { names } => json!({ "kind": "unknown_drug", "names": names }),
        RxCheckError::IdenticalDrug { name } => json!({ "kind": "identical_drug", "names": [name] }),
        RxCheckError::NotInitialized => json!({ "kind": "not_initialized" }),
        RxCheckError::Config { .. } => json!({ "kind": "config" }),
        RxCheckError::InvalidInput { .. } => json!({ "kind": "invalid_input" }),
        RxCheckError::Io(_) => json!({ "kind": "io" }),
        RxCheckError::Json(_) => json!({ "kind": "json" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(msg: Value) -> JsonRpcRequest {
        serde_json::from_value(msg).expect("failed to parse request")
    }

    #[test]
    fn test_tool_call_extracts_name_and_arguments() {
        let request = parse(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {"name": "rxcheck_check", "arguments": {"drugs": ["Warfarin", "Aspirin"]}}
        }));

        let call = request.tool_call().expect("tool call should parse");
        assert_eq!(call.name, "rxcheck_check");
        assert_eq!(call.arguments["drugs"][1], "Aspirin");
    }

    #[test]
    fn test_tool_call_without_arguments_is_empty_object() {
        let request = parse(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": {"name": "rxcheck_status"}
        }));

        let call = request.tool_call().expect("tool call should parse");
        assert_eq!(call.arguments, json!({}));
    }

    #[test]
    fn test_tool_call_rejects_non_object_arguments() {
        let request = parse(json!({
            "jsonrpc": "2.0",
            "id": "req-9",
            "method": "tools/call",
            "params": {"name": "rxcheck_classify", "arguments": ["Aspirin"]}
        }));

        let resp = request.tool_call().expect_err("array arguments should fail");
        assert_eq!(resp.id, json!("req-9"));
        assert_eq!(resp.error.map(|e| e.code), Some(-32602));
    }

    #[test]
    fn test_tool_call_missing_name() {
        let request = parse(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"arguments": {}}
        }));
        assert!(request.tool_call().is_err());
    }

    #[test]
    fn test_string_and_numeric_ids_echoed() {
        for id in [json!(7), json!("abc-123")] {
            let request = parse(json!({"jsonrpc": "2.0", "id": id, "method": "ping"}));
            assert!(!request.is_notification());
            let resp = JsonRpcResponse::success(request.id.clone(), json!({}));
            assert_eq!(resp.id, id);
        }
    }

    #[test]
    fn test_notification_has_no_id() {
        let request = parse(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}));
        assert!(request.is_notification());
        assert!(request.params.is_none());
    }

    #[test]
    fn test_wrong_version_is_invalid_request() {
        let request = parse(json!({"jsonrpc": "1.0", "id": 1, "method": "ping"}));
        let resp = request.check_version().expect_err("version 1.0 should fail");
        assert_eq!(resp.error.map(|e| e.code), Some(-32600));
    }

    #[test]
    fn test_unknown_drug_failure_lists_names() {
        let err = RxCheckError::UnknownDrug {
            names: vec!["Foo".to_string(), "Bar".to_string()],
        };
        let resp = JsonRpcResponse::tool_failure(json!(4), "rxcheck_check", &err);
        let error = resp.error.as_ref().expect("error should be set");
        assert_eq!(error.code, -32602);
        assert!(error.message.starts_with("rxcheck_check failed"));
        let data = error.data.as_ref().expect("data should be set");
        assert_eq!(data["kind"], "unknown_drug");
        assert_eq!(data["names"], json!(["Foo", "Bar"]));

        let json = serde_json::to_string(&resp).expect("failed to serialize response");
        assert!(!json.contains("\"result\""));
    }

    #[test]
    fn test_not_initialized_is_internal() {
        let resp = JsonRpcResponse::tool_failure(
            json!(5),
            "rxcheck_classify",
            &RxCheckError::NotInitialized,
        );
        assert_eq!(resp.error.map(|e| e.code), Some(-32603));
    }
}
