//! CLI command implementations

use anyhow::Result;
use std::fs;

use crate::cli::{error, info, success, warn};
use crate::config::{self, Config};
use crate::upstream::ConsultApi;

/// Initialize a new consultpro.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("consultpro.toml");

    if config_path.exists() {
        warn("consultpro.toml already exists");
        return Ok(());
    }

    let content = config::default_config_content();
    fs::write(config_path, content)?;

    success("Created consultpro.toml");
    info("Edit the configuration file and run 'consultpro serve' to start the gateway");

    Ok(())
}

/// Start the gateway HTTP server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting gateway at http://{}:{}", host, port));

    crate::api::run_server(config, &host, port).await?;
    Ok(())
}

/// Validate configuration and probe the upstream API
pub async fn check() -> Result<()> {
    let config = load_config()?;
    success("Configuration loaded");

    info(&format!(
        "Server: {}:{}",
        config.server.host, config.server.port
    ));
    info(&format!("Upstream: {}", config.upstream.base_url));

    if config.auth.dev_logins {
        warn("Development logins are enabled");
    }

    match &config.razorpay {
        Some(_) => success("Razorpay: configured"),
        None => info("Razorpay: not configured"),
    }
    match &config.cashfree {
        Some(cashfree) => success(&format!("Cashfree: configured ({})", cashfree.api_base())),
        None => info("Cashfree: not configured"),
    }

    let api = ConsultApi::new(&config.upstream)?;
    match api.ping().await {
        Ok(status) => success(&format!("Upstream reachable (HTTP {})", status)),
        Err(e) => error(&format!("Upstream unreachable: {}", e)),
    }

    Ok(())
}

// Helper functions

fn load_config() -> Result<Config> {
    config::load_config().map_err(|e| anyhow::anyhow!("{}", e))
}
