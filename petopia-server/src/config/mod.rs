//! Configuration module for petopia-server.
//!
//! Handles loading configuration from the TOML file, CLI arguments and
//! environment variables.

pub mod file;

use crate::config::file::{FileConfig, LiqPayConfig as FileLiqPayConfig};
use petopia_core::config::{LiqPayConfig, ORDER_ID_PLACEHOLDER};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PUBLIC_KEY_ENV: &str = "LIQPAY_PUBLIC_KEY";
pub const PRIVATE_KEY_ENV: &str = "LIQPAY_PRIVATE_KEY";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Loaded configuration result containing all parts.
#[derive(Debug)]
pub struct LoadedConfig {
    pub listen: SocketAddr,
    pub liqpay: LiqPayConfig,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI and environment overrides
    /// 3. Validate the configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        self.load_from_str(&config_content, |name| std::env::var(name).ok())
    }

    fn load_from_str(
        &self,
        content: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<LoadedConfig, ConfigError> {
        let mut file_config: FileConfig = toml::from_str(content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }
        apply_key_overrides(&mut file_config.liqpay, env);

        validate(&file_config)?;

        if file_config.liqpay.public_key.is_empty() || file_config.liqpay.private_key.is_empty() {
            tracing::warn!(
                "LiqPay keys are not configured, payment requests will fail until {} and {} are set",
                PUBLIC_KEY_ENV,
                PRIVATE_KEY_ENV
            );
        }

        Ok(LoadedConfig {
            listen: file_config.server.listen,
            liqpay: convert_liqpay(file_config.liqpay),
        })
    }
}

/// Environment variables take precedence over keys from the file.
fn apply_key_overrides(config: &mut FileLiqPayConfig, env: impl Fn(&str) -> Option<String>) {
    if let Some(public_key) = env(PUBLIC_KEY_ENV).filter(|v| !v.is_empty()) {
        config.public_key = public_key;
    }
    if let Some(private_key) = env(PRIVATE_KEY_ENV).filter(|v| !v.is_empty()) {
        config.private_key = private_key;
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    let liqpay = &config.liqpay;
    if liqpay.currency.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "liqpay.currency must not be empty".to_string(),
        ));
    }
    for (name, template) in [
        ("liqpay.result_url", &liqpay.result_url),
        ("liqpay.server_url", &liqpay.server_url),
    ] {
        let sample = template.replace(ORDER_ID_PLACEHOLDER, "0");
        url::Url::parse(&sample).map_err(|e| {
            ConfigError::ValidationError(format!("{name} is not a valid URL: {e}"))
        })?;
    }
    Ok(())
}

fn convert_liqpay(l: FileLiqPayConfig) -> LiqPayConfig {
    LiqPayConfig {
        public_key: l.public_key,
        private_key: l.private_key.into_bytes().into_boxed_slice(),
        currency: l.currency,
        result_url: l.result_url,
        server_url: l.server_url,
        description: l.description,
        check_callback_amount: l.check_callback_amount,
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}
