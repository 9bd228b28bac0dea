//! confreg Config - Config and config group storage
//!
//! This crate provides:
//! - Config add/get/delete ([`ConfigStore`])
//! - Label predicates for group members ([`LabelMatchRule`])
//! - Config group lifecycle and membership ([`GroupStore`])
//!
//! Both stores work over any [`confreg_persistence::Backend`].

pub mod service;

pub use service::*;
