//! Server configuration
//!
//! Layers built-in defaults, an optional TOML file and `JAILFTP_*`
//! environment variables into a `ServerConfig`.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ServerError;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_CONTROL_PORT: u16 = 55555;
pub const DEFAULT_BANNER: &str = "jailftp ready";

/// Config file looked up in the working directory when none is given.
const DEFAULT_CONFIG_NAME: &str = "jailftp";
const ENV_PREFIX: &str = "JAILFTP";

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind the control listener to.
    pub bind_address: String,

    /// Port for the control connection; 0 picks a free port.
    pub control_port: u16,

    /// Directory served as the jail; the working directory when unset.
    #[serde(default)]
    pub server_root: Option<PathBuf>,

    /// Text sent after `220` when a client connects.
    pub banner: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            control_port: DEFAULT_CONTROL_PORT,
            server_root: None,
            banner: DEFAULT_BANNER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `config_file`, or from `jailftp.toml` in the
    /// working directory if it exists, with environment overrides.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ServerError> {
        let mut builder = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("control_port", i64::from(DEFAULT_CONTROL_PORT))?
            .set_default("banner", DEFAULT_BANNER)?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        if self.banner.is_empty() || self.banner.contains(['\r', '\n']) {
            return Err(config::ConfigError::Message(
                "banner must be a single non-empty line".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and control port as socket address
    pub fn control_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.control_port)
    }
}
