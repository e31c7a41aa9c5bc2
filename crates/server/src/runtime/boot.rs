//! Boot — logging init, config load, state creation.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::cloudwatch::ClientFactory;
use crate::client::live::LiveClientFactory;
use crate::conf::ServerConfig;
use crate::state::{ServerState, SharedState};

/// Initialise the tracing / logging subsystem.
///
/// All diagnostics go to stderr; stdout is reserved for protocol frames.
pub fn init_logging(level: Option<&str>) {
    let default_filter = format!("server={}", level.unwrap_or("info"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load config, build the live client factory, and create shared state.
///
/// A failure here is the only process-fatal error: `main` exits non-zero
/// after the diagnostics reach stderr.
pub fn boot(
    config_path: Option<&Path>,
    region_override: Option<String>,
) -> Result<SharedState, Box<dyn std::error::Error>> {
    info!("Starting CloudWatch Logs MCP server");

    let mut config = ServerConfig::load(config_path)?;
    if let Some(region) = region_override {
        config.default_region = Some(region);
    }
    info!(
        "Loaded configuration: default_region={}, endpoint_url={}",
        config.default_region.as_deref().unwrap_or("<ambient>"),
        config.endpoint_url.as_deref().unwrap_or("<default>"),
    );

    let factory: Arc<dyn ClientFactory> = Arc::new(LiveClientFactory::new(config.clone()));
    let state = Arc::new(ServerState::new(factory, config));
    info!("Initialized shared application state");

    Ok(state)
}
