//! Configuration schema definitions

use serde::{Deserialize, Serialize};

pub const CASHFREE_SANDBOX_URL: &str = "https://sandbox.cashfree.com/pg";
pub const CASHFREE_PRODUCTION_URL: &str = "https://api.cashfree.com/pg";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub razorpay: Option<RazorpayConfig>,

    #[serde(default)]
    pub cashfree: Option<CashfreeConfig>,
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Login and session cookie behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Accept the fixed development logins
    #[serde(default)]
    pub dev_logins: bool,

    /// Set the Secure attribute on session cookies
    #[serde(default)]
    pub cookie_secure: bool,
}

/// Upstream ConsultPro REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,

    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
}

fn default_upstream_base_url() -> String {
    "https://consultpro.ksangeeth76.workers.dev".to_string()
}

fn default_upstream_timeout() -> u64 {
    30
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            timeout_secs: default_upstream_timeout(),
        }
    }
}

/// Razorpay credentials (optional)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RazorpayConfig {
    pub key_id: String,

    pub key_secret: String,

    /// API endpoint override
    #[serde(default = "default_razorpay_base_url")]
    pub base_url: String,
}

fn default_razorpay_base_url() -> String {
    "https://api.razorpay.com".to_string()
}

/// Cashfree credentials (optional)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashfreeConfig {
    pub app_id: String,

    pub secret_key: String,

    #[serde(default)]
    pub environment: CashfreeEnvironment,

    /// Explicit endpoint override; takes precedence over `environment`
    #[serde(default)]
    pub base_url: Option<String>,
}

impl CashfreeConfig {
    /// Resolved API base for the configured environment
    pub fn api_base(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => match self.environment {
                CashfreeEnvironment::Sandbox => CASHFREE_SANDBOX_URL.to_string(),
                CashfreeEnvironment::Production => CASHFREE_PRODUCTION_URL.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CashfreeEnvironment {
    #[default]
    Sandbox,
    Production,
}
