//! Pure projection functions for tool responses.
//!
//! Upstream record → wire shape mapping and timestamp rendering. Field
//! names follow the upstream camelCase wire shape so responses stay
//! recognisable to callers that also talk to the service directly.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::client::cloudwatch::{LogEventRecord, LogGroupRecord, LogStreamRecord};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogGroupSummary {
    pub log_group_name: Option<String>,
    pub creation_time: Option<i64>,
    pub stored_bytes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogStreamSummary {
    pub log_stream_name: Option<String>,
    pub creation_time: Option<i64>,
    pub first_event_timestamp: Option<i64>,
    pub last_event_timestamp: Option<i64>,
    pub stored_bytes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogEventView {
    pub timestamp: Option<String>,
    pub message: Option<String>,
    pub log_stream_name: Option<String>,
}

pub fn group_summary(record: LogGroupRecord) -> LogGroupSummary {
    LogGroupSummary {
        log_group_name: record.name,
        creation_time: record.creation_time,
        stored_bytes: record.stored_bytes,
    }
}

pub fn stream_summary(record: LogStreamRecord) -> LogStreamSummary {
    LogStreamSummary {
        log_stream_name: record.name,
        creation_time: record.creation_time,
        first_event_timestamp: record.first_event_timestamp,
        last_event_timestamp: record.last_event_timestamp,
        stored_bytes: record.stored_bytes,
    }
}

/// Project an event, rendering the millisecond timestamp as a local-naive
/// date-time string. A timestamp of 0 is formatted like any other value;
/// only a missing timestamp stays null.
pub fn event_view(record: LogEventRecord) -> LogEventView {
    LogEventView {
        timestamp: record.timestamp.map(format_event_timestamp),
        message: record.message,
        log_stream_name: record.log_stream_name,
    }
}

/// Render epoch milliseconds in the local time zone without an offset
/// suffix. Identical event data may serialize differently across hosts
/// with different time zone configuration.
pub fn format_event_timestamp(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.naive_local().format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
        None => ms.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_summary_field_names() {
        let summary = group_summary(LogGroupRecord {
            name: Some("/aws/lambda/billing".into()),
            creation_time: Some(1_700_000_000_000),
            stored_bytes: Some(2048),
        });
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            json!({
                "logGroupName": "/aws/lambda/billing",
                "creationTime": 1_700_000_000_000i64,
                "storedBytes": 2048,
            })
        );
    }

    #[test]
    fn test_stream_summary_round_trip() {
        let summaries = vec![stream_summary(LogStreamRecord {
            name: Some("2024/05/01/[$LATEST]abc".into()),
            creation_time: Some(1_700_000_000_001),
            first_event_timestamp: Some(1_700_000_000_002),
            last_event_timestamp: None,
            stored_bytes: Some(0),
        })];
        let text = serde_json::to_string(&summaries).unwrap();
        let back: Vec<LogStreamSummary> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, summaries);
    }

    #[test]
    fn test_event_zero_timestamp_is_formatted_not_dropped() {
        let view = event_view(LogEventRecord {
            timestamp: Some(0),
            message: Some("boot".into()),
            log_stream_name: Some("s".into()),
        });
        let rendered = view.timestamp.expect("timestamp 0 must still be rendered");
        assert!(rendered.contains('T'), "expected a date-time string, got {rendered}");
        assert_eq!(view.message.as_deref(), Some("boot"));
    }

    #[test]
    fn test_event_missing_timestamp_stays_null() {
        let view = event_view(LogEventRecord {
            timestamp: None,
            message: Some("no ts".into()),
            log_stream_name: None,
        });
        assert_eq!(view.timestamp, None);
    }

    #[test]
    fn test_event_message_preserved_verbatim() {
        let message = "  {\"level\":\"warn\"}  \ttrailing";
        let view = event_view(LogEventRecord {
            timestamp: Some(1_714_564_800_000),
            message: Some(message.into()),
            log_stream_name: Some("stream-a".into()),
        });
        assert_eq!(view.message.as_deref(), Some(message));
    }

    #[test]
    fn test_event_round_trip() {
        let events = vec![event_view(LogEventRecord {
            timestamp: Some(1_714_564_800_123),
            message: Some("hello".into()),
            log_stream_name: Some("stream-a".into()),
        })];
        let text = serde_json::to_string(&events).unwrap();
        let back: Vec<LogEventView> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, events);
    }
}
