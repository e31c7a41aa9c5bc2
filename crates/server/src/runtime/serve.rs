//! Serve — the stdio transport loop.
//!
//! Reads newline-delimited JSON-RPC frames from stdin and writes reply
//! frames to stdout, one per line. The process exits cleanly when the
//! host closes stdin.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use crate::rpc::McpServer;
use crate::state::SharedState;

/// Wire the composed server to stdin/stdout and serve until EOF.
pub async fn serve(state: SharedState) -> Result<(), Box<dyn std::error::Error>> {
    let server = McpServer::new(state);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    info!("CloudWatch Logs MCP server ready on stdio");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(reply) = server.handle_line(line).await {
            stdout.write_all(reply.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}
