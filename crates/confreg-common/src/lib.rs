//! confreg Common - Shared types and utilities
//!
//! This crate provides the foundational types used across all confreg components:
//! - Entity model (configs, labels, groups)
//! - Error types and error codes
//! - Identity and label validation helpers

pub mod error;
pub mod model;
pub mod utils;

// Re-exports for convenience
pub use error::{BackendError, ErrorCode, RegistryError, Result};
pub use model::{Config, ConfigGroup, ConfigWithLabels, Label, LabelSet, validate_identity};
pub use utils::{is_valid_label_part, is_valid_segment};

/// Entity kind names used in error messages
pub const CONFIG_KIND: &str = "config";
pub const GROUP_KIND: &str = "config group";
