//! Handler — MCP method dispatch over JSON-RPC frames.
//!
//! One [`McpServer`] is composed at startup and wired to the stdio
//! transport; there is no ambient tool registry. Tool failures surface
//! as `isError` payloads inside a successful `tools/call` result;
//! protocol-level errors are reserved for malformed or unknown frames.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::rpc::frame::{self, Request, Response};
use crate::state::SharedState;
use crate::tools::ToolSet;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "cloudwatch-logs";

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

pub struct McpServer {
    tools: ToolSet,
}

impl McpServer {
    pub fn new(state: SharedState) -> Self {
        Self {
            tools: ToolSet::new(state),
        }
    }

    /// Handle one raw input line. Returns the serialized reply frame, or
    /// `None` when the line was a notification.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let reply = match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle_request(request).await?,
            Err(err) => Response::failure(
                Value::Null,
                frame::PARSE_ERROR,
                format!("invalid JSON-RPC frame: {err}"),
            ),
        };
        match serde_json::to_string(&reply) {
            Ok(text) => Some(text),
            Err(err) => {
                error!("failed to serialize reply frame: {err}");
                None
            }
        }
    }

    async fn handle_request(&self, request: Request) -> Option<Response> {
        debug!(method = %request.method, "handling request");
        let id = request.id;
        match request.method.as_str() {
            "initialize" => Some(Response::success(id?, self.initialize_result())),
            "notifications/initialized" | "notifications/cancelled" => None,
            "ping" => Some(Response::success(id?, json!({}))),
            "tools/list" => Some(Response::success(
                id?,
                json!({ "tools": self.tools.descriptions() }),
            )),
            "tools/call" => {
                let id = id?;
                let params = match request.params {
                    Some(params) => params,
                    None => {
                        return Some(Response::failure(
                            id,
                            frame::INVALID_PARAMS,
                            "tools/call requires params",
                        ))
                    }
                };
                let call: CallParams = match serde_json::from_value(params) {
                    Ok(call) => call,
                    Err(err) => {
                        return Some(Response::failure(
                            id,
                            frame::INVALID_PARAMS,
                            format!("invalid tools/call params: {err}"),
                        ))
                    }
                };
                match self.tools.call(&call.name, call.arguments).await {
                    Some(outcome) => Some(Response::success(
                        id,
                        json!({
                            "content": [{ "type": "text", "text": outcome.text }],
                            "isError": outcome.is_error,
                        }),
                    )),
                    None => Some(Response::failure(
                        id,
                        frame::INVALID_PARAMS,
                        format!("unknown tool: {}", call.name),
                    )),
                }
            }
            other => {
                warn!("unknown method: {other}");
                Some(Response::failure(
                    id?,
                    frame::METHOD_NOT_FOUND,
                    format!("method not found: {other}"),
                ))
            }
        }
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::client::cloudwatch::{ClientFactory, LogGroupRecord};
    use crate::client::fake::{FakeClientFactory, FakeCloudWatch};
    use crate::conf::ServerConfig;
    use crate::state::ServerState;

    fn server_with_fake() -> (McpServer, Arc<FakeCloudWatch>) {
        let fake = Arc::new(FakeCloudWatch::new());
        let factory = Arc::new(FakeClientFactory::new(Arc::clone(&fake)));
        let state = Arc::new(ServerState::new(
            factory as Arc<dyn ClientFactory>,
            ServerConfig::default(),
        ));
        (McpServer::new(state), fake)
    }

    async fn roundtrip(server: &McpServer, frame: Value) -> Value {
        let reply = server
            .handle_line(&frame.to_string())
            .await
            .expect("expected a reply frame");
        serde_json::from_str(&reply).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_reports_tool_capability() {
        let (server, _fake) = server_with_fake();
        let reply = roundtrip(
            &server,
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
        )
        .await;
        assert_eq!(reply["id"], 1);
        assert_eq!(reply["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert!(reply["result"]["capabilities"]["tools"].is_object());
        assert_eq!(reply["result"]["serverInfo"]["name"], SERVER_NAME);
    }

    #[tokio::test]
    async fn test_tools_list_names_all_three_tools() {
        let (server, _fake) = server_with_fake();
        let reply = roundtrip(
            &server,
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
        )
        .await;
        let names: Vec<&str> = reply["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["list_groups", "list_streams", "get_logs"]);
    }

    #[tokio::test]
    async fn test_empty_listing_renders_empty_array_payload() {
        let (server, _fake) = server_with_fake();
        let reply = roundtrip(
            &server,
            json!({
                "jsonrpc": "2.0", "id": 3, "method": "tools/call",
                "params": { "name": "list_groups", "arguments": {} }
            }),
        )
        .await;
        assert_eq!(reply["result"]["isError"], false);
        assert_eq!(reply["result"]["content"][0]["text"], "[]");
    }

    #[tokio::test]
    async fn test_tool_payload_contains_listed_group() {
        let (server, fake) = server_with_fake();
        fake.add_group(LogGroupRecord {
            name: Some("/aws/lambda/a".into()),
            creation_time: Some(5),
            stored_bytes: Some(6),
        })
        .await;
        let reply = roundtrip(
            &server,
            json!({
                "jsonrpc": "2.0", "id": 4, "method": "tools/call",
                "params": { "name": "list_groups" }
            }),
        )
        .await;
        let text = reply["result"]["content"][0]["text"].as_str().unwrap();
        let payload: Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload[0]["logGroupName"], "/aws/lambda/a");
    }

    #[tokio::test]
    async fn test_tool_failure_stays_in_result_channel() {
        let (server, fake) = server_with_fake();
        fake.register_group("g").await;
        let reply = roundtrip(
            &server,
            json!({
                "jsonrpc": "2.0", "id": 5, "method": "tools/call",
                "params": { "name": "get_logs", "arguments": { "logGroupName": "g", "startTime": "5x" } }
            }),
        )
        .await;
        assert!(reply.get("error").is_none(), "must not be a protocol fault");
        assert_eq!(reply["result"]["isError"], true);
        let text = reply["result"]["content"][0]["text"].as_str().unwrap();
        let payload: Value = serde_json::from_str(text).unwrap();
        assert!(payload["error"].as_str().unwrap().contains("5x"));
    }

    #[tokio::test]
    async fn test_missing_required_param_is_error_payload() {
        let (server, _fake) = server_with_fake();
        let reply = roundtrip(
            &server,
            json!({
                "jsonrpc": "2.0", "id": 6, "method": "tools/call",
                "params": { "name": "list_streams", "arguments": {} }
            }),
        )
        .await;
        assert_eq!(reply["result"]["isError"], true);
        let text = reply["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("logGroupName"));
    }

    #[tokio::test]
    async fn test_notification_produces_no_reply() {
        let (server, _fake) = server_with_fake();
        let frame = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        assert_eq!(server.handle_line(&frame.to_string()).await, None);
    }

    #[tokio::test]
    async fn test_unknown_method_is_rejected() {
        let (server, _fake) = server_with_fake();
        let reply = roundtrip(
            &server,
            json!({ "jsonrpc": "2.0", "id": 7, "method": "resources/list" }),
        )
        .await;
        assert_eq!(reply["error"]["code"], frame::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let (server, _fake) = server_with_fake();
        let reply = roundtrip(
            &server,
            json!({
                "jsonrpc": "2.0", "id": 8, "method": "tools/call",
                "params": { "name": "delete_group", "arguments": {} }
            }),
        )
        .await;
        assert_eq!(reply["error"]["code"], frame::INVALID_PARAMS);
        assert!(reply["error"]["message"]
            .as_str()
            .unwrap()
            .contains("delete_group"));
    }

    #[tokio::test]
    async fn test_malformed_frame_is_parse_error() {
        let (server, _fake) = server_with_fake();
        let reply = server.handle_line("{ not json").await.unwrap();
        let reply: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(reply["error"]["code"], frame::PARSE_ERROR);
        assert_eq!(reply["id"], Value::Null);
    }
}
