// Consul KV backend
// Talks to a Consul agent over its HTTP KV API

pub mod client;
pub mod config;
pub mod model;

pub use client::ConsulBackend;
pub use config::ConsulConfig;
pub use model::KVPair;

/// Consul HTTP API paths
pub const KV_PATH: &str = "v1/kv";
pub const STATUS_LEADER_PATH: &str = "v1/status/leader";

/// Header carrying the ACL token
pub const TOKEN_HEADER: &str = "X-Consul-Token";
