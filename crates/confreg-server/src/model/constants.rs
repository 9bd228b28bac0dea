//! Configuration keys and defaults for the confreg server

pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";

/// Environment variables `CONFREG_<SECTION>__<KEY>` override file settings
pub const ENV_PREFIX: &str = "CONFREG";
pub const ENV_PREFIX_SEPARATOR: &str = "_";
pub const ENV_SEPARATOR: &str = "__";

// Storage
pub const STORAGE_MODE: &str = "storage.mode";
pub const STORAGE_KEY_PREFIX: &str = "storage.key_prefix";
pub const CONSUL_ADDRESS: &str = "storage.consul.address";
pub const CONSUL_TOKEN: &str = "storage.consul.token";
pub const CONSUL_DATACENTER: &str = "storage.consul.datacenter";
pub const CONSUL_CONNECT_TIMEOUT_MS: &str = "storage.consul.connect_timeout_ms";
pub const CONSUL_READ_TIMEOUT_MS: &str = "storage.consul.read_timeout_ms";

pub const DEFAULT_CONSUL_CONNECT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_CONSUL_READ_TIMEOUT_MS: u64 = 30000;

// Groups
pub const GROUP_LABEL_REMOVAL_RULE: &str = "group.label_removal_rule";

// Logging
pub const LOGS_PATH: &str = "logs.path";
pub const LOGS_LEVEL: &str = "logs.level";
pub const LOGS_CONSOLE: &str = "logs.console";
pub const LOGS_FILE: &str = "logs.file";
