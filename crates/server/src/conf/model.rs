use serde::{Deserialize, Serialize};

/// Server configuration.
///
/// Credentials never live here: tool calls either carry their own key
/// material or rely on the SDK's ambient resolution chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Region used when a tool call does not supply one. `None` defers
    /// to the SDK's ambient region resolution.
    pub default_region: Option<String>,
    /// Alternate CloudWatch Logs endpoint, e.g. a local emulator.
    pub endpoint_url: Option<String>,
}
