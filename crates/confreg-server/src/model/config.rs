//! Configuration management for the confreg server
//!
//! Sources, lowest precedence first:
//! 1. `conf/application.yml` (optional, path selectable with `--config`)
//! 2. `CONFREG_*` environment variables (`CONFREG_STORAGE__MODE=consul`)
//! 3. command line flags

use anyhow::{Context, anyhow};
use clap::Parser;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment};

use confreg_config::LabelMatchRule;
use confreg_persistence::consul::config::DEFAULT_CONSUL_ADDRESS;
use confreg_persistence::{ConsulConfig, StorageMode};

use super::constants::{
    CONSUL_ADDRESS, CONSUL_CONNECT_TIMEOUT_MS, CONSUL_DATACENTER, CONSUL_READ_TIMEOUT_MS,
    CONSUL_TOKEN, DEFAULT_CONFIG_FILE, DEFAULT_CONSUL_CONNECT_TIMEOUT_MS,
    DEFAULT_CONSUL_READ_TIMEOUT_MS, ENV_PREFIX, ENV_PREFIX_SEPARATOR, ENV_SEPARATOR,
    GROUP_LABEL_REMOVAL_RULE, LOGS_CONSOLE, LOGS_FILE, LOGS_LEVEL, LOGS_PATH, STORAGE_KEY_PREFIX,
    STORAGE_MODE,
};
use crate::startup::LoggingConfig;

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command(name = "confreg-server", version, about = "Versioned configuration registry")]
pub struct Cli {
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    config_file: String,
    #[arg(short = 'm', long = "storage-mode")]
    storage_mode: Option<String>,
    #[arg(long = "consul-address", env = "CONSUL_HTTP_ADDR")]
    consul_address: Option<String>,
    #[arg(long = "consul-token", env = "CONSUL_HTTP_TOKEN", hide_env_values = true)]
    consul_token: Option<String>,
    #[arg(long = "key-prefix")]
    key_prefix: Option<String>,
    #[arg(long = "log-level")]
    log_level: Option<String>,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    /// Load configuration for the running process
    pub fn new() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(args: Cli) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .add_source(config::File::with_name(&args.config_file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_PREFIX_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );

        let overrides = [
            (STORAGE_MODE, args.storage_mode),
            (CONSUL_ADDRESS, args.consul_address),
            (CONSUL_TOKEN, args.consul_token),
            (STORAGE_KEY_PREFIX, args.key_prefix),
            (LOGS_LEVEL, args.log_level),
        ];
        for (key, value) in overrides {
            if let Some(v) = value {
                builder = builder
                    .set_override(key, v)
                    .with_context(|| format!("Failed to set {} override", key))?;
            }
        }

        Self::from_builder(builder).with_context(|| {
            format!("Failed to build configuration - check {}", args.config_file)
        })
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
        Ok(Configuration {
            config: builder.build()?,
        })
    }

    // ========================================================================
    // Storage Configuration
    // ========================================================================

    pub fn storage_mode(&self) -> anyhow::Result<StorageMode> {
        match self.config.get_string(STORAGE_MODE) {
            Ok(v) => v.parse().map_err(|e: String| anyhow!(e)),
            Err(_) => Ok(StorageMode::default()),
        }
    }

    pub fn key_prefix(&self) -> String {
        self.config
            .get_string(STORAGE_KEY_PREFIX)
            .unwrap_or_default()
    }

    pub fn consul_config(&self) -> ConsulConfig {
        let address = self
            .config
            .get_string(CONSUL_ADDRESS)
            .unwrap_or(DEFAULT_CONSUL_ADDRESS.to_string());

        let mut consul = ConsulConfig::new(&address).with_timeouts(
            self.get_u64(CONSUL_CONNECT_TIMEOUT_MS, DEFAULT_CONSUL_CONNECT_TIMEOUT_MS),
            self.get_u64(CONSUL_READ_TIMEOUT_MS, DEFAULT_CONSUL_READ_TIMEOUT_MS),
        );
        if let Ok(token) = self.config.get_string(CONSUL_TOKEN) {
            consul = consul.with_token(&token);
        }
        if let Ok(datacenter) = self.config.get_string(CONSUL_DATACENTER) {
            consul = consul.with_datacenter(&datacenter);
        }
        consul
    }

    // ========================================================================
    // Group Configuration
    // ========================================================================

    pub fn label_removal_rule(&self) -> anyhow::Result<LabelMatchRule> {
        match self.config.get_string(GROUP_LABEL_REMOVAL_RULE) {
            Ok(v) => Ok(v.parse()?),
            Err(_) => Ok(LabelMatchRule::default()),
        }
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.config.get_string(LOGS_PATH).ok(),
            self.config.get_bool(LOGS_CONSOLE).unwrap_or(true),
            self.config.get_bool(LOGS_FILE).unwrap_or(false),
            self.config
                .get_string(LOGS_LEVEL)
                .unwrap_or("info".to_string()),
        )
    }

    fn get_u64(&self, key: &str, default: u64) -> u64 {
        self.config
            .get_int(key)
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(default)
    }
}
