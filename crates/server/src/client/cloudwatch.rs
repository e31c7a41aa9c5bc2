//! CloudWatch trait — abstract interface for the upstream log service.
//!
//! Every tool handler reaches CloudWatch Logs through this trait.
//! `live.rs` provides the real aws-sdk-backed implementation.
//! `fake.rs` provides a recording test double.

use std::pin::Pin;
use std::sync::Arc;

use crate::client::error::LogsError;

// ── Request shapes ──────────────────────────────────────────────
//
// Each optional field is independently nullable; `None` means the
// parameter is not sent upstream at all. The service distinguishes
// "not specified" from "specified as empty/zero", so handlers must
// never fill these with defaults.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeGroupsRequest {
    pub name_prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeStreamsRequest {
    pub log_group_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterEventsRequest {
    pub log_group_name: String,
    pub log_stream_names: Option<Vec<String>>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub filter_pattern: Option<String>,
}

// ── Upstream record shapes ──────────────────────────────────────
//
// Raw first-page records as the service returns them; projection to
// the wire shapes happens in `logs::map`.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogGroupRecord {
    pub name: Option<String>,
    pub creation_time: Option<i64>,
    pub stored_bytes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogStreamRecord {
    pub name: Option<String>,
    pub creation_time: Option<i64>,
    pub first_event_timestamp: Option<i64>,
    pub last_event_timestamp: Option<i64>,
    pub stored_bytes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEventRecord {
    pub timestamp: Option<i64>,
    pub message: Option<String>,
    pub log_stream_name: Option<String>,
}

// ── The trait ───────────────────────────────────────────────────

/// Unified async interface over the CloudWatch Logs API.
///
/// Object-safe thanks to `Pin<Box<…>>` returns. Implementations must be
/// `Send + Sync` so a handle can be shared across concurrent tool calls.
/// All three operations read the first result page only.
pub trait CloudWatchOps: Send + Sync {
    fn describe_log_groups(
        &self,
        request: DescribeGroupsRequest,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<LogGroupRecord>, LogsError>> + Send + '_>>;

    fn describe_log_streams(
        &self,
        request: DescribeStreamsRequest,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<LogStreamRecord>, LogsError>> + Send + '_>>;

    fn filter_log_events(
        &self,
        request: FilterEventsRequest,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<LogEventRecord>, LogsError>> + Send + '_>>;
}

// ── Per-call client construction ────────────────────────────────

/// Credential material a single tool call may carry.
///
/// An access key pair takes precedence over the ambient resolution
/// chain; the session token only applies alongside a key pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialOverrides {
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

/// Builds a ready-to-use [`CloudWatchOps`] handle for one tool call.
///
/// Tool calls are independent, so a fresh client is constructed per call
/// rather than pooled; connection reuse inside the SDK is incidental and
/// nothing here depends on it.
pub trait ClientFactory: Send + Sync {
    fn connect(
        &self,
        overrides: CredentialOverrides,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Arc<dyn CloudWatchOps>, LogsError>> + Send + '_>>;
}
