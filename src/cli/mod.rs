pub mod classify;
pub mod mask;
pub mod serve;

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

/// A3S Triage - PII masking and support-ticket classification
#[derive(Debug, Parser)]
#[command(name = "a3s-triage", version, about)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server and interactive page
    Serve {
        /// Host address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Path to the JSON model artifact
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Mask PII in an email body and print the entities
    Mask {
        /// Email body; read from stdin when omitted
        text: Option<String>,
    },

    /// Mask PII, then predict the support category
    Classify {
        /// Email body; read from stdin when omitted
        text: Option<String>,

        /// Path to the JSON model artifact
        #[arg(long)]
        model: Option<PathBuf>,

        /// Print display names instead of raw labels
        #[arg(long)]
        remap_labels: bool,
    },
}

/// Use the positional argument, or all of stdin when it is absent
pub(crate) fn read_input(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
