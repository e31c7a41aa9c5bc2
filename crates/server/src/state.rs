use std::sync::Arc;

use crate::client::cloudwatch::ClientFactory;
use crate::conf::ServerConfig;

/// Shared, immutable state behind every tool invocation.
///
/// There is deliberately no cache and no cross-call bookkeeping here:
/// each tool call builds its own upstream client through the factory
/// and discards it when the response is serialized.
pub struct ServerState {
    /// Builds an authenticated CloudWatch Logs client per tool call.
    pub factory: Arc<dyn ClientFactory>,
    pub config: ServerConfig,
}

impl ServerState {
    pub fn new(factory: Arc<dyn ClientFactory>, config: ServerConfig) -> Self {
        Self { factory, config }
    }
}

pub type SharedState = Arc<ServerState>;
