//! Client module — the seam between tool handlers and CloudWatch Logs.
//!
//! `cloudwatch.rs` defines the abstract interface and request shapes,
//! `live.rs` the aws-sdk-backed implementation, `fake.rs` a recording
//! test double, and `error.rs` the error taxonomy and SDK error mapping.

pub mod cloudwatch;
pub mod error;
pub mod fake;
pub mod live;

pub use cloudwatch::{ClientFactory, CloudWatchOps, CredentialOverrides};
pub use error::LogsError;
