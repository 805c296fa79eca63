//! Application-level coordination and workflow management.
//!
//! Connects panel interactions to the module lifecycle: observing load
//! completion, calling module entry points and collecting run results.

use lsim::{ModuleCallError, ModuleHandle, ModulePhase, Sequencer, UiHost};
use std::path::Path;

use crate::app::AppState;
use crate::io::{self, RunResult, SimulationRunner};
use crate::state::ShellTab;

/// Coordinates application-level operations and workflows.
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Publishes any module load outcome and reacts to phase changes.
    ///
    /// Called once per frame. A failed module leaves everything already on
    /// screen untouched; only a banner is added and simulation controls stay
    /// disabled. Returns true if the phase changed this frame.
    pub fn poll_module<H: UiHost>(state: &mut AppState, sequencer: &mut Sequencer<H>) -> bool {
        let phase = sequencer.poll();
        if phase == state.module_phase {
            return false;
        }
        state.module_phase = phase;

        if phase == ModulePhase::Failed {
            let detail = sequencer
                .handle()
                .error()
                .map(|err| err.to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            state.error_message = Some(format!("Simulation module unavailable: {}", detail));
        }
        true
    }

    /// Calls the module's `greet` entry point.
    pub fn greet(state: &mut AppState, handle: &ModuleHandle) {
        match handle.invoke(|module| module.greet()) {
            Ok(greeting) => state.simulation.set_greeting(greeting),
            Err(err) => Self::report_call_error(state, err),
        }
    }

    /// Starts a simulation run with the current request.
    pub fn run_simulation(
        state: &mut AppState,
        runner: &mut SimulationRunner,
        handle: &ModuleHandle,
        ctx: &egui::Context,
    ) {
        let request = state.simulation.request().clone();
        tracing::debug!(items = request.item_ids.len(), "Starting simulation run");
        if let Err(err) = runner.start(handle, request, ctx) {
            Self::report_call_error(state, err);
        }
    }

    /// Applies a finished run to the state. Returns true if a run finished.
    pub fn check_run_completion(state: &mut AppState, runner: &mut SimulationRunner) -> bool {
        match runner.check_completion() {
            RunResult::Success(report) => {
                tracing::info!(rows = report.rows.len(), "Simulation run finished");
                state.simulation.set_report(report);
                state.view.select_tab(ShellTab::Results);
                true
            }
            RunResult::Error(message) => {
                tracing::warn!(error = %message, "Simulation run failed");
                state.simulation.set_run_error(message);
                true
            }
            RunResult::None => false,
        }
    }

    /// Replaces the request with one read from `path`.
    pub fn import_request(state: &mut AppState, path: &Path) {
        match io::load_request(path) {
            Ok(request) => {
                state.simulation.replace_request(request);
                state.error_message = None;
            }
            Err(e) => {
                state.error_message = Some(format!("Error importing request: {:#}", e));
            }
        }
    }

    /// Writes the current request to `path`.
    pub fn export_request(state: &mut AppState, path: &Path) {
        if let Err(e) = io::save_request(path, state.simulation.request()) {
            state.error_message = Some(format!("Error exporting request: {:#}", e));
        }
    }

    fn report_call_error(state: &mut AppState, err: ModuleCallError) {
        tracing::warn!(error = %err, "Module call rejected");
        state.simulation.set_run_error(err.to_string());
    }
}
