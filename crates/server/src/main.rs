use clap::Parser;
use server::runtime::{boot, serve};

/// Read-only CloudWatch Logs tools served over the MCP stdio protocol.
#[derive(Parser, Debug)]
#[command(name = "cwlogs-mcp", version)]
struct Cli {
    /// Logging verbosity (trace, debug, info, warn, error). Diagnostics go
    /// to stderr; stdout carries protocol frames only.
    #[arg(long, env = "CWLOGS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Default AWS region used when a tool call does not supply one.
    #[arg(long, env = "CWLOGS_REGION")]
    region: Option<String>,

    /// Path to an optional TOML configuration file.
    #[arg(long, env = "CWLOGS_CONFIG_FILE")]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    boot::init_logging(cli.log_level.as_deref());
    let state = boot::boot(cli.config.as_deref(), cli.region.clone())?;
    serve::serve(state).await
}
