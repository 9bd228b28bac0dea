// Persistence model types

/// Which backend a registry stores its keys in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageMode {
    /// In-process map, lost on exit
    #[default]
    Memory,
    /// Consul KV over HTTP
    Consul,
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageMode::Memory => write!(f, "memory"),
            StorageMode::Consul => write!(f, "consul"),
        }
    }
}

impl std::str::FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StorageMode::Memory),
            "consul" => Ok(StorageMode::Consul),
            _ => Err(format!("Invalid storage mode: {}", s)),
        }
    }
}
