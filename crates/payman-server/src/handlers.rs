//! JSON-RPC Handlers
//!
//! Model Context Protocol methods served over stdio: the `initialize`
//! handshake, `ping`, `tools/list` and `tools/call`. Notifications get no
//! reply.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use payman_core::ToolCall;

use crate::config::{SERVER_NAME, SERVER_VERSION};
use crate::state::AppState;

/// Protocol version answered when the client does not ask for one
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

// ============================================================================
// Message Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    /// `None` only when the member is absent; `"id": null` is `Some(Null)`
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub(crate) fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

// ============================================================================
// Dispatch
// ============================================================================

/// Handle one line from the client. `None` means nothing is written back.
pub async fn handle_message(state: &mut AppState, line: &str) -> Option<RpcResponse> {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Failed to parse JSON-RPC message");
            return Some(RpcResponse::error(Value::Null, PARSE_ERROR, format!("Parse error: {e}")));
        }
    };

    let request: RpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Malformed JSON-RPC request");
            return Some(RpcResponse::error(
                Value::Null,
                INVALID_REQUEST,
                format!("Invalid request: {e}"),
            ));
        }
    };

    let Some(id) = request.id else {
        debug!(method = %request.method, "Received notification");
        return None;
    };

    let response = match request.method.as_str() {
        "initialize" => RpcResponse::result(id, initialize(request.params.as_ref())),
        "ping" => RpcResponse::result(id, json!({})),
        "tools/list" => RpcResponse::result(id, tools_list(state)),
        "tools/call" => tools_call(state, id, request.params).await,
        other => {
            warn!(method = other, "Unknown method");
            RpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {other}"))
        }
    };
    Some(response)
}

fn initialize(params: Option<&Value>) -> Value {
    let protocol_version = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    info!(protocol_version, "Client initialized");

    json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        }
    })
}

fn tools_list(state: &AppState) -> Value {
    let tools: Vec<Value> = state
        .tools
        .schemas()
        .into_iter()
        .map(|schema| {
            json!({
                "name": schema.name,
                "description": schema.description,
                "inputSchema": schema.input_schema(),
            })
        })
        .collect();

    json!({ "tools": tools })
}

async fn tools_call(state: &mut AppState, id: Value, params: Option<Value>) -> RpcResponse {
    let params: CallParams = match params.map(serde_json::from_value::<CallParams>).transpose() {
        Ok(Some(params)) => params,
        Ok(None) => return RpcResponse::error(id, INVALID_PARAMS, "Missing tool call params"),
        Err(e) => {
            return RpcResponse::error(id, INVALID_PARAMS, format!("Invalid tool call params: {e}"));
        }
    };

    let call = ToolCall::from_json(params.name, params.arguments);
    info!(tool = %call.name, "Tool call");

    let result = match state.tools.execute(&mut state.session, &call).await {
        Ok(result) => result,
        Err(e) => {
            warn!(tool = %call.name, error = %e, "Rejected tool call");
            return RpcResponse::error(id, INVALID_PARAMS, e.to_string());
        }
    };

    match serde_json::to_value(result.into_response()) {
        Ok(body) => RpcResponse::result(id, body),
        Err(e) => RpcResponse::error(id, INTERNAL_ERROR, format!("Unserializable result: {e}")),
    }
}
