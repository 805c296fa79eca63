//! State management modules for the league simulation shell.
//!
//! This module contains state-only logic (no UI concerns):
//! - Simulation state (request being edited, last report, call messages)
//! - View state (selected tab, manual dark mode)

mod simulation_state;
mod view_state;

pub use simulation_state::{item_name, SimulationState, ITEM_CATALOG};
pub use view_state::{ShellTab, ViewState};
