//! Utility modules for the league-sim shell.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{format_cell, format_duration, format_memory_mb, get_current_memory_mb};
