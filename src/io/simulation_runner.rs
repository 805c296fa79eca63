//! Background execution of simulation runs.
//!
//! Runs `execute_simulation` on a worker thread so the GUI stays responsive
//! while the engine works. Results come back through a channel and are
//! collected once per frame with [`SimulationRunner::check_completion`].

use lsim::{ModuleCallError, ModuleHandle, SimulationReport, SimulationRequest};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// Result of a simulation run.
pub enum RunResult {
    /// The module returned a report
    Success(SimulationReport),
    /// The module returned an error (or the worker died)
    Error(String),
    /// No run finished since the last check
    None,
}

/// Runs simulations off the UI thread, one at a time.
#[derive(Default)]
pub struct SimulationRunner {
    /// Channel receiver for the run in flight
    receiver: Option<Receiver<Result<SimulationReport, String>>>,
}

impl SimulationRunner {
    /// Creates a runner with no active run.
    pub fn new() -> Self {
        Self { receiver: None }
    }

    /// Checks if a run is currently in progress.
    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }

    /// Starts a run against the ready module.
    ///
    /// Fails without spawning anything if the module is not ready. A run
    /// already in flight is left to finish; its result is discarded.
    ///
    /// # Arguments
    /// * `handle` - Module handle; must be in the `Ready` state
    /// * `request` - Request to simulate
    /// * `ctx` - egui context for requesting a repaint when the run completes
    pub fn start(
        &mut self,
        handle: &ModuleHandle,
        request: SimulationRequest,
        ctx: &egui::Context,
    ) -> Result<(), ModuleCallError> {
        let module = handle.module()?;
        let (sender, receiver) = channel();
        self.receiver = Some(receiver);

        let ctx_handle = ctx.clone();
        thread::spawn(move || {
            let result = module
                .execute_simulation(&request)
                .map_err(|e| format!("{e:#}"));
            let _ = sender.send(result);
            ctx_handle.request_repaint();
        });
        Ok(())
    }

    /// Returns the finished run's result, if any.
    pub fn check_completion(&mut self) -> RunResult {
        let Some(receiver) = &self.receiver else {
            return RunResult::None;
        };

        let result = match receiver.try_recv() {
            Ok(Ok(report)) => RunResult::Success(report),
            Ok(Err(message)) => RunResult::Error(message),
            Err(TryRecvError::Empty) => return RunResult::None,
            Err(TryRecvError::Disconnected) => {
                RunResult::Error("simulation worker exited without a result".to_string())
            }
        };
        self.receiver = None;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsim::{
        EchoModule, LoadOptions, ModulePhase, MountTarget, Registrar, RootView, Sequencer,
        ShellHost, ThemeSelection,
    };
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    struct EmptyView;

    impl RootView for EmptyView {
        fn name(&self) -> &str {
            "EmptyView"
        }

        fn required_capabilities(&self) -> Vec<lsim::Capability> {
            Vec::new()
        }
    }

    fn ready_handle() -> ModuleHandle {
        let mut host = ShellHost::new();
        Registrar::configure(&mut host, &ThemeSelection::default(), &["Button"]).unwrap();
        let mut sequencer = Sequencer::new(host);
        sequencer
            .start(
                &EmptyView,
                &MountTarget::default(),
                Arc::new(EchoModule::loader()),
                LoadOptions::default(),
            )
            .unwrap();
        assert_eq!(sequencer.wait_for_module(Duration::from_secs(5)), ModulePhase::Ready);
        sequencer.handle()
    }

    fn wait_for_result(runner: &mut SimulationRunner) -> RunResult {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match runner.check_completion() {
                RunResult::None if Instant::now() < deadline => {
                    thread::sleep(Duration::from_millis(5));
                }
                other => return other,
            }
        }
    }

    #[test]
    fn test_runner_idle() {
        let mut runner = SimulationRunner::new();
        assert!(!runner.is_running());
        assert!(matches!(runner.check_completion(), RunResult::None));
    }

    #[test]
    fn test_start_requires_ready_module() {
        let mut runner = SimulationRunner::new();
        let result = runner.start(
            &ModuleHandle::new(),
            SimulationRequest::default(),
            &egui::Context::default(),
        );
        assert!(matches!(result, Err(ModuleCallError::NotReady(ModulePhase::Unloaded))));
        assert!(!runner.is_running());
    }

    #[test]
    fn test_run_produces_report() {
        let handle = ready_handle();
        let mut runner = SimulationRunner::new();
        let mut request = SimulationRequest::default();
        request.item_ids = vec![3072, 3026];

        runner.start(&handle, request, &egui::Context::default()).unwrap();
        assert!(runner.is_running());
        match wait_for_result(&mut runner) {
            RunResult::Success(report) => assert_eq!(report.rows.len(), 2),
            RunResult::Error(message) => panic!("run failed: {message}"),
            RunResult::None => panic!("run did not finish"),
        }
        assert!(!runner.is_running());
    }
}
