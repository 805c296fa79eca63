//! I/O modules for simulation runs and request files.

pub mod simulation_runner;
pub mod request_file;

// Re-export commonly used types
pub use simulation_runner::{RunResult, SimulationRunner};
pub use request_file::{load_request, save_request};
