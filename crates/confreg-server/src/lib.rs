// confreg server library: configuration, logging and process wiring for the
// registry stores

pub mod model; // Configuration and constants
pub mod startup; // Logging, registry wiring, shutdown

pub use model::Configuration;
pub use startup::Registry;
