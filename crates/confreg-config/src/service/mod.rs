//! Storage services
//!
//! - Config CRUD
//! - Label matching
//! - Group membership

pub mod config;
pub mod group;
pub mod label;

pub use config::ConfigStore;
pub use group::GroupStore;
pub use label::{LabelMatchRule, matches_exact, matches_superset};
