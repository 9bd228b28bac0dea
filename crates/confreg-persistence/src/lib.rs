//! confreg Persistence - key-value backends and key layout
//!
//! This crate provides:
//! - The [`Backend`] capability trait every store is built on
//! - An in-process backend ([`MemoryBackend`])
//! - An adapter over the Consul KV HTTP API ([`ConsulBackend`])
//! - The [`KeyCodec`] mapping entity identities onto flat keys

pub mod consul;
pub mod key;
pub mod memory;
pub mod model;
pub mod traits;

pub use consul::{ConsulBackend, ConsulConfig};
pub use key::{KeyCodec, MemberKey, label_digest};
pub use memory::MemoryBackend;
pub use model::StorageMode;
pub use traits::Backend;
