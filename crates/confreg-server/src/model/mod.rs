//! Server models
//!
//! - `constants` - configuration keys and defaults
//! - `config` - configuration loading and typed accessors

pub mod config;
pub mod constants;

pub use config::{Cli, Configuration};
pub use constants::*;
