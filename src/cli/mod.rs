//! CLI interface for the ConsultPro gateway

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "consultpro")]
#[command(version = "0.1.0")]
#[command(about = "Session-aware API gateway for the ConsultPro booking platform", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new consultpro.toml configuration file
    Init,

    /// Start the gateway HTTP server
    Serve {
        /// Host to bind to (defaults to the configured server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the configured server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration and probe the upstream API
    Check,
}
