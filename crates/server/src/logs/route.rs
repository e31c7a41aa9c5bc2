//! Route — the three log tool operations.
//!
//! Each operation decodes its parameters, parses any time bounds before
//! touching the network, builds a client through the factory, issues one
//! upstream call, and projects the first result page to JSON.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::client::cloudwatch::{
    CredentialOverrides, DescribeGroupsRequest, DescribeStreamsRequest, FilterEventsRequest,
};
use crate::client::error::LogsError;
use crate::logs::{map, time};
use crate::state::SharedState;

/// Credential material accepted by every tool, flattened into its params.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialParams {
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

impl CredentialParams {
    fn into_overrides(self) -> CredentialOverrides {
        CredentialOverrides {
            region: self.region,
            access_key_id: self.access_key_id,
            secret_access_key: self.secret_access_key,
            session_token: self.session_token,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGroupsParams {
    pub prefix: Option<String>,
    #[serde(flatten)]
    pub credentials: CredentialParams,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStreamsParams {
    pub log_group_name: String,
    #[serde(flatten)]
    pub credentials: CredentialParams,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLogsParams {
    pub log_group_name: String,
    pub log_stream_name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub filter_pattern: Option<String>,
    #[serde(flatten)]
    pub credentials: CredentialParams,
}

/// The log tool handlers, bound to shared state at startup.
pub struct LogTools {
    state: SharedState,
}

impl LogTools {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// List log groups, optionally restricted to a name prefix.
    ///
    /// An empty prefix is treated as absent: the upstream API treats an
    /// empty-string filter differently from no filter, so it is never sent.
    pub async fn list_groups(&self, params: ListGroupsParams) -> Result<Value, LogsError> {
        let client = self
            .state
            .factory
            .connect(params.credentials.into_overrides())
            .await?;

        let request = DescribeGroupsRequest {
            name_prefix: params.prefix.filter(|prefix| !prefix.is_empty()),
        };
        debug!(?request, "listing log groups");

        let groups = client.describe_log_groups(request).await?;
        let summaries: Vec<map::LogGroupSummary> =
            groups.into_iter().map(map::group_summary).collect();
        serde_json::to_value(summaries).map_err(LogsError::from)
    }

    /// List log streams in a group. `ResourceNotFound` propagates from
    /// upstream when the group does not exist.
    pub async fn list_streams(&self, params: ListStreamsParams) -> Result<Value, LogsError> {
        let client = self
            .state
            .factory
            .connect(params.credentials.into_overrides())
            .await?;

        let request = DescribeStreamsRequest {
            log_group_name: params.log_group_name,
        };
        debug!(?request, "listing log streams");

        let streams = client.describe_log_streams(request).await?;
        let summaries: Vec<map::LogStreamSummary> =
            streams.into_iter().map(map::stream_summary).collect();
        serde_json::to_value(summaries).map_err(LogsError::from)
    }

    /// Query log events in a group within an optional time window.
    ///
    /// Time strings are parsed before any upstream call so a malformed
    /// value fails fast. Only parameters actually supplied are sent.
    pub async fn get_logs(&self, params: GetLogsParams) -> Result<Value, LogsError> {
        let start_ms = match params.start_time.as_deref() {
            Some(raw) => time::parse_time(raw)?,
            None => None,
        };
        let end_ms = match params.end_time.as_deref() {
            Some(raw) => time::parse_time(raw)?,
            None => None,
        };

        let client = self
            .state
            .factory
            .connect(params.credentials.into_overrides())
            .await?;

        let mut request = FilterEventsRequest {
            log_group_name: params.log_group_name,
            ..Default::default()
        };
        if let Some(stream) = params.log_stream_name.filter(|name| !name.is_empty()) {
            request.log_stream_names = Some(vec![stream]);
        }
        if let Some(pattern) = params.filter_pattern.filter(|pattern| !pattern.is_empty()) {
            request.filter_pattern = Some(pattern);
        }
        // Known quirk, preserved: a parsed bound of exactly 0 is treated
        // as "not provided" and dropped from the request.
        if let Some(ms) = start_ms {
            if ms != 0 {
                request.start_time = Some(ms);
            }
        }
        if let Some(ms) = end_ms {
            if ms != 0 {
                request.end_time = Some(ms);
            }
        }
        debug!(?request, "filtering log events");

        let events = client.filter_log_events(request).await?;
        let views: Vec<map::LogEventView> = events.into_iter().map(map::event_view).collect();
        serde_json::to_value(views).map_err(LogsError::from)
    }
}
