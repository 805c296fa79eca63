//! Centralized application state for the league simulation shell.
//!
//! Composes focused state components so each keeps its invariants local and
//! panels can borrow the parts they need independently.

use lsim::{ModulePhase, SimulationRequest};

use crate::state::{ShellTab, SimulationState, ViewState};

/// Main application state composed of focused state components.
pub struct AppState {
    // ===== Focused State Components =====
    /// Simulation request and results
    pub simulation: SimulationState,

    /// Tab selection and dark mode
    pub view: ViewState,

    // ===== Top-Level State =====
    /// Current error message to display (if any)
    pub error_message: Option<String>,

    /// Module phase observed on the previous frame
    pub module_phase: ModulePhase,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new application state with default values.
    pub fn new() -> Self {
        Self {
            simulation: SimulationState::new(),
            view: ViewState::new(),
            error_message: None,
            module_phase: ModulePhase::Unloaded,
        }
    }

    /// Creates an AppState restored from persisted preferences.
    pub fn restored(request: Option<SimulationRequest>, tab: ShellTab, dark_mode: bool) -> Self {
        Self {
            simulation: request
                .map(SimulationState::with_request)
                .unwrap_or_default(),
            view: ViewState::with_tab(tab, dark_mode),
            error_message: None,
            module_phase: ModulePhase::Unloaded,
        }
    }
}
