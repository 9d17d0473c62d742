use std::path::PathBuf;

use crate::config::TriageConfig;
use crate::error::Result;
use crate::server;

/// Execute the `serve` command: start the HTTP server.
pub async fn execute(
    mut config: TriageConfig,
    host: Option<String>,
    port: Option<u16>,
    model: Option<PathBuf>,
) -> Result<()> {
    // Override config with CLI arguments
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(model) = model {
        config.model_path = model;
    }

    println!("A3S Triage server starting...");
    println!("Listening on http://{}:{}", config.host, config.port);
    println!("Press Ctrl+C to stop");

    server::start(config).await
}
