//! Error taxonomy and CloudWatch SDK error mapping.
//!
//! Single source of truth for converting an [`SdkError`] into a
//! [`LogsError`]. Used by every operation in `live.rs`.
//!
//! Mapping rules:
//! - `ResourceNotFoundException` → `ResourceNotFound`
//! - credential/signature service codes → `Auth`
//! - construction failures (credential resolution) → `Auth`
//! - dispatch/timeout failures → `Upstream`
//! - everything else → `Upstream`

use aws_sdk_cloudwatchlogs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogsError {
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
    #[error("CloudWatch Logs request failed: {0}")]
    Upstream(String),
    #[error("Failed to serialize response: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LogsError {
    fn from(err: serde_json::Error) -> Self {
        LogsError::Serialization(err.to_string())
    }
}

/// Map an [`SdkError`] from any CloudWatch Logs operation to a [`LogsError`].
///
/// `context` names the operation being performed (e.g. `describe_log_groups`)
/// so failures stay attributable in the error payload handed to the caller.
pub fn map_sdk_error<E, R>(context: &str, err: SdkError<E, R>) -> LogsError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let code = err.code().map(str::to_owned);
    let detail = format!("{}", DisplayErrorContext(&err));
    match &err {
        // Credential resolution happens lazily; a client that cannot build a
        // signed request never reaches the wire.
        SdkError::ConstructionFailure(_) => LogsError::Auth(format!("{context}: {detail}")),
        SdkError::TimeoutError(_) => LogsError::Upstream(format!("{context}: {detail}")),
        SdkError::DispatchFailure(_) => {
            if detail.to_ascii_lowercase().contains("credential") {
                LogsError::Auth(format!("{context}: {detail}"))
            } else {
                LogsError::Upstream(format!("{context}: {detail}"))
            }
        }
        _ => classify_service_code(context, code.as_deref().unwrap_or(""), &detail),
    }
}

/// Classify a service-level error code into the taxonomy.
///
/// Pure so the mapping is unit-testable without constructing SDK errors.
pub fn classify_service_code(context: &str, code: &str, detail: &str) -> LogsError {
    match code {
        "ResourceNotFoundException" => LogsError::ResourceNotFound(format!("{context}: {detail}")),
        "AccessDeniedException"
        | "UnrecognizedClientException"
        | "InvalidSignatureException"
        | "ExpiredTokenException"
        | "UnauthorizedException" => LogsError::Auth(format!("{context}: {detail}")),
        _ => LogsError::Upstream(format!("{context}: {detail}")),
    }
}
