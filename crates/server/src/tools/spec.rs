//! Tool descriptions for the MCP catalogue.

use serde_json::{json, Value};

pub const LIST_GROUPS_TOOL: &str = "list_groups";
pub const LIST_STREAMS_TOOL: &str = "list_streams";
pub const GET_LOGS_TOOL: &str = "get_logs";

fn credential_properties() -> Value {
    json!({
        "region": {
            "type": "string",
            "description": "AWS region"
        },
        "accessKeyId": {
            "type": "string",
            "description": "AWS access key ID"
        },
        "secretAccessKey": {
            "type": "string",
            "description": "AWS secret access key"
        },
        "sessionToken": {
            "type": "string",
            "description": "AWS session token for temporary credentials"
        }
    })
}

/// The catalogue returned by `tools/list`.
pub fn list_tools() -> Value {
    let mut list_groups_props = json!({
        "prefix": {
            "type": "string",
            "description": "Log group name prefix"
        }
    });
    merge(&mut list_groups_props, credential_properties());

    let mut list_streams_props = json!({
        "logGroupName": {
            "type": "string",
            "description": "The name of the log group"
        }
    });
    merge(&mut list_streams_props, credential_properties());

    let mut get_logs_props = json!({
        "logGroupName": {
            "type": "string",
            "description": "The name of the log group"
        },
        "logStreamName": {
            "type": "string",
            "description": "Restrict the query to exactly this log stream"
        },
        "startTime": {
            "type": "string",
            "description": "Start time as ISO date-time or relative (e.g. \"5m\", \"1h\", \"1d\")"
        },
        "endTime": {
            "type": "string",
            "description": "End time as ISO date-time or relative"
        },
        "filterPattern": {
            "type": "string",
            "description": "CloudWatch Logs filter pattern applied by the service"
        }
    });
    merge(&mut get_logs_props, credential_properties());

    json!([
        {
            "name": LIST_GROUPS_TOOL,
            "description": "List available CloudWatch log groups",
            "inputSchema": {
                "type": "object",
                "properties": list_groups_props
            },
            "annotations": {
                "title": "List Log Groups",
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": true,
                "openWorldHint": true
            }
        },
        {
            "name": LIST_STREAMS_TOOL,
            "description": "List available CloudWatch log streams in a log group",
            "inputSchema": {
                "type": "object",
                "properties": list_streams_props,
                "required": ["logGroupName"]
            },
            "annotations": {
                "title": "List Log Streams",
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": true,
                "openWorldHint": true
            }
        },
        {
            "name": GET_LOGS_TOOL,
            "description": "Get CloudWatch logs from a specific log group and stream",
            "inputSchema": {
                "type": "object",
                "properties": get_logs_props,
                "required": ["logGroupName"]
            },
            "annotations": {
                "title": "Get Logs",
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": false,
                "openWorldHint": true
            }
        }
    ])
}

fn merge(target: &mut Value, extra: Value) {
    if let (Some(target), Some(extra)) = (target.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            target.insert(key.clone(), value.clone());
        }
    }
}
