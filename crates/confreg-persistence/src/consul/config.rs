// Configuration for the Consul KV backend

pub const DEFAULT_CONSUL_ADDRESS: &str = "http://127.0.0.1:8500";

/// Connection settings for a Consul agent
#[derive(Clone, Debug)]
pub struct ConsulConfig {
    /// Agent HTTP address (e.g. "http://127.0.0.1:8500")
    pub address: String,
    /// ACL token sent with every request
    pub token: Option<String>,
    /// Datacenter to query (default: the agent's own)
    pub datacenter: Option<String>,
    /// Connection timeout in milliseconds (default: 5000)
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds (default: 30000)
    pub read_timeout_ms: u64,
}

impl Default for ConsulConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_CONSUL_ADDRESS.to_string(),
            token: None,
            datacenter: None,
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
        }
    }
}

impl ConsulConfig {
    /// Create a config for a single agent address
    pub fn new(address: &str) -> Self {
        Self {
            address: normalize_address(address),
            ..Default::default()
        }
    }

    /// Set the ACL token; an empty token means none
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.trim().to_string()).filter(|t| !t.is_empty());
        self
    }

    pub fn with_datacenter(mut self, datacenter: &str) -> Self {
        self.datacenter = Some(datacenter.trim().to_string()).filter(|d| !d.is_empty());
        self
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }
}

/// Add `http://` to bare `host:port` addresses and drop trailing slashes
pub fn normalize_address(address: &str) -> String {
    let trimmed = address.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
