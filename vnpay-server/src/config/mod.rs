//! Configuration module for vnpay-server.
//!
//! Handles loading configuration from an optional TOML file, CLI arguments
//! and environment variables, and turning the hash secret into a
//! [`HashSecret`] before the server starts.

pub mod file;

use crate::config::file::FileConfig;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use vnpay_sdk::{HashSecret, SignatureError};

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("VNPay hash secret not configured (set VNPAY_HASH_SECRET or [vnpay].hash_secret)")]
    MissingHashSecret,

    #[error("invalid VNPay hash secret: {0}")]
    InvalidHashSecret(#[from] SignatureError),
}

/// Validated configuration, ready to build the application state from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub listen: SocketAddr,
    pub return_path: String,
    pub secret: HashSecret,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    listen_override: Option<SocketAddr>,
    secret_override: Option<String>,
}

impl ConfigLoader {
    /// Create a new config loader.
    ///
    /// `secret_override` comes from `--hash-secret` / `VNPAY_HASH_SECRET`
    /// and takes precedence over the file.
    pub fn new(
        config_path: Option<impl AsRef<Path>>,
        listen_override: Option<SocketAddr>,
        secret_override: Option<String>,
    ) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            listen_override,
            secret_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, if one was given
    /// 2. Apply CLI and environment overrides
    /// 3. Validate the configuration
    /// 4. Build the HMAC key from the hash secret
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let file_config = match &self.config_path {
            Some(path) => {
                let config_content = std::fs::read_to_string(path)?;
                toml::from_str(&config_content)?
            }
            None => FileConfig::default(),
        };
        self.resolve(file_config)
    }

    fn resolve(&self, mut file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }
        if let Some(secret) = &self.secret_override {
            file_config.vnpay.hash_secret = Some(secret.clone());
        }

        self.validate(&file_config)?;

        let raw_secret = file_config
            .vnpay
            .hash_secret
            .ok_or(ConfigError::MissingHashSecret)?;
        let secret = HashSecret::new(raw_secret)?;

        Ok(LoadedConfig {
            listen: file_config.server.listen,
            return_path: file_config.vnpay.return_path,
            secret,
        })
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if !config.vnpay.return_path.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "return_path {:?} must start with '/'",
                config.vnpay.return_path
            )));
        }
        Ok(())
    }
}
