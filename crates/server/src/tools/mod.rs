//! Tools module — tool catalogue and dispatch.
//!
//! `spec.rs` declares the tool names and JSON-Schema descriptions;
//! [`ToolSet`] routes a `tools/call` to the matching handler and applies
//! the one error policy: any failure inside a tool is reported on the
//! successful response channel as an `{"error": …}` payload so the
//! calling agent can observe it without the connection faulting.

pub mod spec;

use serde_json::{json, Value};
use tracing::warn;

use crate::client::error::LogsError;
use crate::logs::route::{GetLogsParams, ListGroupsParams, ListStreamsParams};
use crate::logs::LogTools;
use crate::state::SharedState;

/// The rendered result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub text: String,
    pub is_error: bool,
}

/// Immutable set of named tool handlers, composed once at startup.
pub struct ToolSet {
    logs: LogTools,
}

impl ToolSet {
    pub fn new(state: SharedState) -> Self {
        Self {
            logs: LogTools::new(state),
        }
    }

    /// The tool catalogue for `tools/list`.
    pub fn descriptions(&self) -> Value {
        spec::list_tools()
    }

    /// Invoke a tool by name. Returns `None` for an unknown tool name so
    /// the protocol layer can reject the envelope; every failure inside a
    /// known tool becomes an error payload, never a protocol fault.
    pub async fn call(&self, name: &str, arguments: Value) -> Option<ToolOutcome> {
        let result = match name {
            spec::LIST_GROUPS_TOOL => match decode::<ListGroupsParams>(arguments) {
                Ok(params) => self.logs.list_groups(params).await,
                Err(err) => Err(err),
            },
            spec::LIST_STREAMS_TOOL => match decode::<ListStreamsParams>(arguments) {
                Ok(params) => self.logs.list_streams(params).await,
                Err(err) => Err(err),
            },
            spec::GET_LOGS_TOOL => match decode::<GetLogsParams>(arguments) {
                Ok(params) => self.logs.get_logs(params).await,
                Err(err) => Err(err),
            },
            _ => return None,
        };

        Some(match result {
            Ok(value) => ToolOutcome {
                text: render(&value),
                is_error: false,
            },
            Err(err) => {
                warn!(tool = name, error = %err, "tool call failed");
                ToolOutcome {
                    text: render(&json!({ "error": err.to_string() })),
                    is_error: true,
                }
            }
        })
    }
}

fn decode<T: serde::de::DeserializeOwned>(arguments: Value) -> Result<T, LogsError> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| LogsError::InvalidParams(e.to_string()))
}

fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\":\"failed to render response: {e}\"}}"))
}
