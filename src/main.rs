use clap::Parser;
use tracing_subscriber::EnvFilter;

use a3s_triage::cli::{Cli, Commands};
use a3s_triage::TriageConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = TriageConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port, model } => {
            a3s_triage::cli::serve::execute(config, host, port, model).await?;
        }
        Commands::Mask { text } => {
            a3s_triage::cli::mask::execute(text)?;
        }
        Commands::Classify {
            text,
            model,
            remap_labels,
        } => {
            a3s_triage::cli::classify::execute(config, text, model, remap_labels)?;
        }
    }

    Ok(())
}
