//! Application startup utilities
//!
//! Logging setup, registry wiring and shutdown signal handling.

mod logging;
mod registry;
mod shutdown;

pub use logging::{LogRotation, LoggingConfig, LoggingGuard, ROOT_LOG_FILE, init_logging};
pub use registry::Registry;
pub use shutdown::wait_for_shutdown_signal;
