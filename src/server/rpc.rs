//! JSON-RPC request handling for the subnet_calculator tool.
//!
//! One request per line in, at most one response per line out. Requests
//! without an `id` are notifications and never get a response.

use crate::config::{SERVER_NAME, TOOL_NAME};
use crate::processing::compute_subnet_with_preview;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

const PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Deserialize, Debug)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// `Some(Value::Null)` for `"id": null`, `None` only when the key is absent.
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Deserialize, Debug)]
struct ToolCallParams {
    name: String,
    arguments: SubnetArguments,
}

#[derive(Deserialize, Debug)]
struct SubnetArguments {
    cidr: String,
}

// Only called when the key is present, so null stays an id.
fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn rpc_result(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

fn rpc_error(id: Value, code: i64, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message.into() },
    })
}

/// Deserialize `value` into `T`, the error names the failing path.
fn from_value_with_path<T>(value: Value) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = e.path().to_string();
        format!("path={path} error={}", e.into_inner())
    })
}

/// Tool definition advertised by `tools/list`.
pub fn tool_definition() -> Value {
    json!({
        "name": TOOL_NAME,
        "description": "Calculate network details plus previous and next subnets",
        "inputSchema": {
            "type": "object",
            "properties": {
                "cidr": {
                    "type": "string",
                    "description": "Network in CIDR notation, e.g. 192.168.1.0/24"
                }
            },
            "required": ["cidr"]
        }
    })
}

/// Stateless request handler.
#[derive(Debug, Clone)]
pub struct ToolServer {
    preview_limit: usize,
}

impl ToolServer {
    pub fn new(preview_limit: usize) -> Self {
        ToolServer { preview_limit }
    }

    /// Handle one raw line, `None` means nothing is written back.
    pub fn handle_line(&self, line: &str) -> Option<Value> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("unparseable request: {e}");
                return Some(rpc_error(Value::Null, PARSE_ERROR, format!("Parse error: {e}")));
            }
        };

        let id = value.get("id").cloned();
        let request: RpcRequest = match from_value_with_path(value) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("invalid request: {e}");
                return Some(rpc_error(
                    id.unwrap_or(Value::Null),
                    INVALID_REQUEST,
                    format!("Invalid request: {e}"),
                ));
            }
        };

        self.handle_request(request)
    }

    pub fn handle_request(&self, request: RpcRequest) -> Option<Value> {
        log::debug!("request method={} id={:?}", request.method, request.id);

        let Some(id) = request.id else {
            log::debug!("notification {} ignored", request.method);
            return None;
        };

        if request.jsonrpc.as_deref() != Some("2.0") {
            log::warn!("unsupported jsonrpc version {:?}", request.jsonrpc);
            return Some(rpc_error(
                id,
                INVALID_REQUEST,
                format!("Invalid request: jsonrpc must be \"2.0\", got {:?}", request.jsonrpc),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => {
                let version = request
                    .params
                    .get("protocolVersion")
                    .and_then(Value::as_str)
                    .unwrap_or(PROTOCOL_VERSION);
                rpc_result(
                    id,
                    json!({
                        "protocolVersion": version,
                        "serverInfo": {
                            "name": SERVER_NAME,
                            "version": env!("CARGO_PKG_VERSION"),
                        },
                        "capabilities": { "tools": {} },
                    }),
                )
            }
            "ping" => rpc_result(id, json!({})),
            "tools/list" => rpc_result(id, json!({ "tools": [tool_definition()] })),
            "tools/call" => self.call_tool(id, request.params),
            other => {
                log::warn!("unknown method {other}");
                rpc_error(id, METHOD_NOT_FOUND, format!("Method not found: {other}"))
            }
        };
        Some(response)
    }

    fn call_tool(&self, id: Value, params: Value) -> Value {
        let params: ToolCallParams = match from_value_with_path(params) {
            Ok(p) => p,
            Err(e) => return rpc_error(id, INVALID_PARAMS, format!("Invalid params: {e}")),
        };
        if params.name != TOOL_NAME {
            return rpc_error(id, INVALID_PARAMS, format!("Unknown tool: {}", params.name));
        }

        let cidr = params.arguments.cidr;
        log::info!("Tool triggered with CIDR: {cidr}");

        // A rejected CIDR is a tool-level error, the call itself succeeded.
        let result = match compute_subnet_with_preview(&cidr, self.preview_limit) {
            Ok(info) => match serde_json::to_value(&info) {
                Ok(structured) => json!({
                    "content": [{ "type": "text", "text": structured.to_string() }],
                    "structuredContent": structured,
                    "isError": false,
                }),
                Err(e) => {
                    log::error!("serializing result for {cidr}: {e}");
                    return rpc_error(id, INTERNAL_ERROR, format!("Serialization error: {e}"));
                }
            },
            Err(e) => {
                let error = json!({ "error": e.to_string(), "kind": e.reason() });
                json!({
                    "content": [{ "type": "text", "text": error.to_string() }],
                    "isError": true,
                })
            }
        };
        rpc_result(id, result)
    }
}
