//! Live — implements `CloudWatchOps` over aws-sdk-cloudwatchlogs.
//!
//! Also hosts the session factory: one authenticated client per tool
//! call, built from per-call overrides or the ambient credential chain.

use std::pin::Pin;
use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudwatchlogs::config::Credentials;
use aws_sdk_cloudwatchlogs::Client;
use tracing::debug;

use crate::client::cloudwatch::{
    ClientFactory, CloudWatchOps, CredentialOverrides, DescribeGroupsRequest,
    DescribeStreamsRequest, FilterEventsRequest, LogEventRecord, LogGroupRecord, LogStreamRecord,
};
use crate::client::error::{map_sdk_error, LogsError};
use crate::conf::ServerConfig;

#[derive(Debug, Clone)]
pub struct CloudWatchClient {
    client: Client,
}

impl CloudWatchClient {
    /// Build an authenticated client.
    ///
    /// A full access-key pair in `overrides` wins over the ambient chain
    /// (environment, shared config file, instance/task role); the session
    /// token rides along only with an explicit pair. Region precedence:
    /// per-call override, then configured default, then ambient.
    pub async fn connect(config: &ServerConfig, overrides: &CredentialOverrides) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        let region = overrides
            .region
            .clone()
            .or_else(|| config.default_region.clone());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&overrides.access_key_id, &overrides.secret_access_key)
        {
            debug!("using per-call static credentials");
            loader = loader.credentials_provider(Credentials::new(
                access_key_id.clone(),
                secret_access_key.clone(),
                overrides.session_token.clone(),
                None,
                "tool-call-override",
            ));
        }

        let shared = loader.load().await;
        Self {
            client: Client::new(&shared),
        }
    }

    async fn describe_log_groups(
        &self,
        request: DescribeGroupsRequest,
    ) -> Result<Vec<LogGroupRecord>, LogsError> {
        let output = self
            .client
            .describe_log_groups()
            .set_log_group_name_prefix(request.name_prefix)
            .send()
            .await
            .map_err(|e| map_sdk_error("describe_log_groups", e))?;

        Ok(output
            .log_groups
            .unwrap_or_default()
            .into_iter()
            .map(|group| LogGroupRecord {
                name: group.log_group_name,
                creation_time: group.creation_time,
                stored_bytes: group.stored_bytes,
            })
            .collect())
    }

    async fn describe_log_streams(
        &self,
        request: DescribeStreamsRequest,
    ) -> Result<Vec<LogStreamRecord>, LogsError> {
        let output = self
            .client
            .describe_log_streams()
            .log_group_name(request.log_group_name)
            .send()
            .await
            .map_err(|e| map_sdk_error("describe_log_streams", e))?;

        Ok(output
            .log_streams
            .unwrap_or_default()
            .into_iter()
            .map(|stream| LogStreamRecord {
                name: stream.log_stream_name,
                creation_time: stream.creation_time,
                first_event_timestamp: stream.first_event_timestamp,
                last_event_timestamp: stream.last_event_timestamp,
                stored_bytes: stream.stored_bytes,
            })
            .collect())
    }

    async fn filter_log_events(
        &self,
        request: FilterEventsRequest,
    ) -> Result<Vec<LogEventRecord>, LogsError> {
        let output = self
            .client
            .filter_log_events()
            .log_group_name(request.log_group_name)
            .set_log_stream_names(request.log_stream_names)
            .set_start_time(request.start_time)
            .set_end_time(request.end_time)
            .set_filter_pattern(request.filter_pattern)
            .send()
            .await
            .map_err(|e| map_sdk_error("filter_log_events", e))?;

        Ok(output
            .events
            .unwrap_or_default()
            .into_iter()
            .map(|event| LogEventRecord {
                timestamp: event.timestamp,
                message: event.message,
                log_stream_name: event.log_stream_name,
            })
            .collect())
    }
}

impl CloudWatchOps for CloudWatchClient {
    fn describe_log_groups(
        &self,
        request: DescribeGroupsRequest,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<LogGroupRecord>, LogsError>> + Send + '_>>
    {
        Box::pin(self.describe_log_groups(request))
    }

    fn describe_log_streams(
        &self,
        request: DescribeStreamsRequest,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<LogStreamRecord>, LogsError>> + Send + '_>>
    {
        Box::pin(self.describe_log_streams(request))
    }

    fn filter_log_events(
        &self,
        request: FilterEventsRequest,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<LogEventRecord>, LogsError>> + Send + '_>>
    {
        Box::pin(self.filter_log_events(request))
    }
}

/// Factory wired into live deployments.
pub struct LiveClientFactory {
    config: ServerConfig,
}

impl LiveClientFactory {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}

impl ClientFactory for LiveClientFactory {
    fn connect(
        &self,
        overrides: CredentialOverrides,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Arc<dyn CloudWatchOps>, LogsError>> + Send + '_>>
    {
        Box::pin(async move {
            let client = CloudWatchClient::connect(&self.config, &overrides).await;
            Ok(Arc::new(client) as Arc<dyn CloudWatchOps>)
        })
    }
}
