//! Fake — recording test double for the CloudWatch Logs interface.
//!
//! Provides a deterministic [`FakeCloudWatch`] that implements
//! [`CloudWatchOps`] from in-memory state, and records every request it
//! receives so tests can assert exactly which parameters were sent
//! upstream (including which optional parameters were omitted).

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::client::cloudwatch::{
    ClientFactory, CloudWatchOps, CredentialOverrides, DescribeGroupsRequest,
    DescribeStreamsRequest, FilterEventsRequest, LogEventRecord, LogGroupRecord, LogStreamRecord,
};
use crate::client::error::LogsError;

/// Mutable inner state protected by a mutex.
#[derive(Default)]
struct Inner {
    groups: Vec<LogGroupRecord>,
    streams: HashMap<String, Vec<LogStreamRecord>>,
    events: HashMap<String, Vec<LogEventRecord>>,
    group_requests: Vec<DescribeGroupsRequest>,
    stream_requests: Vec<DescribeStreamsRequest>,
    event_requests: Vec<FilterEventsRequest>,
}

/// A fake CloudWatch Logs client for deterministic testing.
///
/// Seed groups, streams, and events up front; every operation then
/// filters the canned data the way the service would for a first page.
#[derive(Default)]
pub struct FakeCloudWatch {
    inner: Mutex<Inner>,
}

impl FakeCloudWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a log group name so stream/event queries against it
    /// succeed with empty results instead of `ResourceNotFound`.
    pub async fn register_group(&self, name: &str) {
        let mut state = self.inner.lock().await;
        state.streams.entry(name.to_string()).or_default();
        state.events.entry(name.to_string()).or_default();
    }

    /// Seed a group into the listing.
    pub async fn add_group(&self, record: LogGroupRecord) {
        let mut state = self.inner.lock().await;
        if let Some(name) = &record.name {
            state.streams.entry(name.clone()).or_default();
            state.events.entry(name.clone()).or_default();
        }
        state.groups.push(record);
    }

    /// Seed a stream under a group.
    pub async fn add_stream(&self, group: &str, record: LogStreamRecord) {
        let mut state = self.inner.lock().await;
        state.events.entry(group.to_string()).or_default();
        state.streams.entry(group.to_string()).or_default().push(record);
    }

    /// Seed an event under a group.
    pub async fn add_event(&self, group: &str, record: LogEventRecord) {
        let mut state = self.inner.lock().await;
        state.streams.entry(group.to_string()).or_default();
        state.events.entry(group.to_string()).or_default().push(record);
    }

    pub async fn group_requests(&self) -> Vec<DescribeGroupsRequest> {
        self.inner.lock().await.group_requests.clone()
    }

    pub async fn stream_requests(&self) -> Vec<DescribeStreamsRequest> {
        self.inner.lock().await.stream_requests.clone()
    }

    pub async fn event_requests(&self) -> Vec<FilterEventsRequest> {
        self.inner.lock().await.event_requests.clone()
    }
}

impl CloudWatchOps for FakeCloudWatch {
    fn describe_log_groups(
        &self,
        request: DescribeGroupsRequest,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<LogGroupRecord>, LogsError>> + Send + '_>>
    {
        Box::pin(async move {
            let mut state = self.inner.lock().await;
            state.group_requests.push(request.clone());
            let groups = state
                .groups
                .iter()
                .filter(|group| match &request.name_prefix {
                    Some(prefix) => group
                        .name
                        .as_deref()
                        .is_some_and(|name| name.starts_with(prefix.as_str())),
                    None => true,
                })
                .cloned()
                .collect();
            Ok(groups)
        })
    }

    fn describe_log_streams(
        &self,
        request: DescribeStreamsRequest,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<LogStreamRecord>, LogsError>> + Send + '_>>
    {
        Box::pin(async move {
            let mut state = self.inner.lock().await;
            state.stream_requests.push(request.clone());
            match state.streams.get(&request.log_group_name) {
                Some(streams) => Ok(streams.clone()),
                None => Err(LogsError::ResourceNotFound(format!(
                    "log group does not exist: {}",
                    request.log_group_name
                ))),
            }
        })
    }

    fn filter_log_events(
        &self,
        request: FilterEventsRequest,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<LogEventRecord>, LogsError>> + Send + '_>>
    {
        Box::pin(async move {
            let mut state = self.inner.lock().await;
            state.event_requests.push(request.clone());
            let events = match state.events.get(&request.log_group_name) {
                Some(events) => events,
                None => {
                    return Err(LogsError::ResourceNotFound(format!(
                        "log group does not exist: {}",
                        request.log_group_name
                    )))
                }
            };
            let matched = events
                .iter()
                .filter(|event| {
                    if let Some(streams) = &request.log_stream_names {
                        let in_streams = event
                            .log_stream_name
                            .as_ref()
                            .is_some_and(|name| streams.contains(name));
                        if !in_streams {
                            return false;
                        }
                    }
                    let timestamp = event.timestamp.unwrap_or(0);
                    if let Some(start) = request.start_time {
                        if timestamp < start {
                            return false;
                        }
                    }
                    if let Some(end) = request.end_time {
                        if timestamp > end {
                            return false;
                        }
                    }
                    if let Some(pattern) = &request.filter_pattern {
                        // The real service interprets a pattern language;
                        // a substring check is enough for tests.
                        if !event
                            .message
                            .as_deref()
                            .is_some_and(|message| message.contains(pattern.as_str()))
                        {
                            return false;
                        }
                    }
                    true
                })
                .cloned()
                .collect();
            Ok(matched)
        })
    }
}

/// Factory that hands out one shared [`FakeCloudWatch`] and records the
/// credential overrides each tool call supplied.
pub struct FakeClientFactory {
    client: Arc<FakeCloudWatch>,
    overrides: Mutex<Vec<CredentialOverrides>>,
}

impl FakeClientFactory {
    pub fn new(client: Arc<FakeCloudWatch>) -> Self {
        Self {
            client,
            overrides: Mutex::new(Vec::new()),
        }
    }

    pub async fn recorded_overrides(&self) -> Vec<CredentialOverrides> {
        self.overrides.lock().await.clone()
    }
}

impl ClientFactory for FakeClientFactory {
    fn connect(
        &self,
        overrides: CredentialOverrides,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Arc<dyn CloudWatchOps>, LogsError>> + Send + '_>>
    {
        Box::pin(async move {
            self.overrides.lock().await.push(overrides);
            Ok(Arc::clone(&self.client) as Arc<dyn CloudWatchOps>)
        })
    }
}
