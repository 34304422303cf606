//! Daemon configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `queueup.{json,toml,yaml}` in the working directory (or the file named by
//! `QUEUEUP_CONFIG`), then `QUEUEUP_*` environment variables.

use ::config::{Config, ConfigError, Environment, File};
use queueup_api_rpc::rate_limiter::MAX_BURST;
use queueup_api_rpc::server::{
    RpcServerConfig, DEFAULT_RATE_LIMIT_BURST, DEFAULT_RATE_LIMIT_RATE, DEFAULT_RPC_HOST,
    DEFAULT_RPC_PORT,
};
use serde::Deserialize;

const ENV_PREFIX: &str = "QUEUEUP";
const CONFIG_PATH_VAR: &str = "QUEUEUP_CONFIG";
const DEFAULT_CONFIG_NAME: &str = "queueup";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DaemonConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    /// Directory for a daily-rolling JSON log file; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<String>,
    pub rate_limit_burst: u32,
    pub rate_limit_rate: u32,
}

impl DaemonConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).ok();
        Self::build(
            path.as_deref(),
            Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    fn build(path: Option<&str>, env: Environment) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::with_name(&shellexpand::tilde(path)).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config: DaemonConfig = Config::builder()
            .set_default("host", DEFAULT_RPC_HOST)?
            .set_default("port", i64::from(DEFAULT_RPC_PORT))?
            .set_default("log_format", "pretty")?
            .set_default("rate_limit_burst", i64::from(DEFAULT_RATE_LIMIT_BURST))?
            .set_default("rate_limit_rate", i64::from(DEFAULT_RATE_LIMIT_RATE))?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Message("host cannot be empty".to_string()));
        }
        if self.rate_limit_burst == 0 || self.rate_limit_rate == 0 {
            return Err(ConfigError::Message(
                "rate_limit_burst and rate_limit_rate must be positive".to_string(),
            ));
        }
        if self.rate_limit_burst > MAX_BURST {
            return Err(ConfigError::Message(format!(
                "rate_limit_burst must be at most {}",
                MAX_BURST
            )));
        }
        Ok(())
    }

    pub fn rpc_server_config(&self) -> RpcServerConfig {
        RpcServerConfig {
            host: self.host.clone(),
            port: self.port,
            rate_limit_burst: self.rate_limit_burst,
            rate_limit_rate: self.rate_limit_rate,
        }
    }
}
