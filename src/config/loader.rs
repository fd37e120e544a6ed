//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;

use super::Config;

const CONFIG_FILENAME: &str = "consultpro.toml";

/// Load configuration from consultpro.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<std::path::PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# ConsultPro Gateway Configuration

[server]
host = "0.0.0.0"
port = 4000

[auth]
# Accept the fixed development logins (admin@test.com / user@test.com)
dev_logins = false
# Set the Secure attribute on session cookies (requires HTTPS)
cookie_secure = false

[upstream]
base_url = "https://consultpro.ksangeeth76.workers.dev"
timeout_secs = 30

# Razorpay credentials (optional, for payment routes)
# [razorpay]
# key_id = "${RAZORPAY_KEY_ID}"
# key_secret = "${RAZORPAY_KEY_SECRET}"

# Cashfree credentials (optional, for payment routes)
# [cashfree]
# app_id = "${CASHFREE_APP_ID}"
# secret_key = "${CASHFREE_SECRET_KEY}"
# environment = "sandbox"  # or "production"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_interpolation() {
        env::set_var("TEST_VAR", "hello");
        let content = "value = \"${TEST_VAR}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"hello\"");
        env::remove_var("TEST_VAR");
    }

    #[test]
    fn test_env_interpolation_with_default() {
        let content = "value = \"${NONEXISTENT_VAR:-default_value}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"default_value\"");
    }

    #[test]
    fn default_content_parses() {
        let config: Config = toml::from_str(default_config_content()).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(
            config.upstream.base_url,
            "https://consultpro.ksangeeth76.workers.dev"
        );
        assert!(!config.auth.dev_logins);
        assert!(config.razorpay.is_none());
        assert!(config.cashfree.is_none());
    }

    #[test]
    fn loads_config_from_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "[server]\nport = 4100\n\n[razorpay]\nkey_id = \"rzp_test_x\"\nkey_secret = \"s3cret\"\n",
        )
        .unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.server.port, 4100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.razorpay.unwrap().key_id, "rzp_test_x");
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(CONFIG_FILENAME);
        assert!(matches!(
            load_config_from_path(&missing),
            Err(Error::ConfigNotFound)
        ));
    }
}
