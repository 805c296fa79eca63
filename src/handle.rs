//! Shared, observable lifecycle state of the simulation module.
//!
//! A [`ModuleHandle`] is cheap to clone and may be read from anywhere. Only
//! the [`crate::Sequencer`] can move it forward, and only along
//! `Unloaded -> Loading -> {Ready | Failed}`.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::error::{ModuleCallError, ModuleLoadError};
use crate::module::SimulationModule;

/// Lifecycle state without payload, used for queries and transition checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModulePhase {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

impl ModulePhase {
    /// Returns true if `self -> next` is a legal lifecycle transition.
    pub fn can_transition_to(self, next: ModulePhase) -> bool {
        matches!(
            (self, next),
            (ModulePhase::Unloaded, ModulePhase::Loading)
                | (ModulePhase::Loading, ModulePhase::Ready)
                | (ModulePhase::Loading, ModulePhase::Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ModulePhase::Ready | ModulePhase::Failed)
    }
}

impl fmt::Display for ModulePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModulePhase::Unloaded => "Unloaded",
            ModulePhase::Loading => "Loading",
            ModulePhase::Ready => "Ready",
            ModulePhase::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// Lifecycle state of the simulation module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleState {
    Unloaded,
    Loading,
    Ready,
    Failed(ModuleLoadError),
}

impl ModuleState {
    pub fn phase(&self) -> ModulePhase {
        match self {
            ModuleState::Unloaded => ModulePhase::Unloaded,
            ModuleState::Loading => ModulePhase::Loading,
            ModuleState::Ready => ModulePhase::Ready,
            ModuleState::Failed(_) => ModulePhase::Failed,
        }
    }
}

/// Rejected lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IllegalTransition {
    pub from: ModulePhase,
    pub to: ModulePhase,
}

struct HandleInner {
    state: ModuleState,
    module: Option<Arc<dyn SimulationModule>>,
    history: Vec<ModulePhase>,
    loading_since: Option<Instant>,
    load_duration: Option<Duration>,
}

/// Read-mostly handle to the simulation module and its lifecycle state.
#[derive(Clone)]
pub struct ModuleHandle {
    inner: Arc<RwLock<HandleInner>>,
}

impl fmt::Debug for ModuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleHandle")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Default for ModuleHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleHandle {
    /// Creates a handle in the `Unloaded` state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HandleInner {
                state: ModuleState::Unloaded,
                module: None,
                history: vec![ModulePhase::Unloaded],
                loading_since: None,
                load_duration: None,
            })),
        }
    }

    // ===== Queries =====

    pub fn state(&self) -> ModuleState {
        self.read(|inner| inner.state.clone())
    }

    pub fn phase(&self) -> ModulePhase {
        self.read(|inner| inner.state.phase())
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == ModulePhase::Ready
    }

    /// Failure detail, present only in the `Failed` state.
    pub fn error(&self) -> Option<ModuleLoadError> {
        self.read(|inner| match &inner.state {
            ModuleState::Failed(error) => Some(error.clone()),
            _ => None,
        })
    }

    /// Every phase the handle has been in, oldest first.
    pub fn history(&self) -> Vec<ModulePhase> {
        self.read(|inner| inner.history.clone())
    }

    /// Time between entering `Loading` and reaching a terminal state.
    pub fn load_duration(&self) -> Option<Duration> {
        self.read(|inner| inner.load_duration)
    }

    // ===== Entry points =====

    /// Returns the ready module, or why it cannot be used.
    pub fn module(&self) -> Result<Arc<dyn SimulationModule>, ModuleCallError> {
        self.read(|inner| match (&inner.state, &inner.module) {
            (ModuleState::Ready, Some(module)) => Ok(Arc::clone(module)),
            (ModuleState::Failed(error), _) => Err(ModuleCallError::LoadFailed(error.clone())),
            (state, _) => Err(ModuleCallError::NotReady(state.phase())),
        })
    }

    /// Calls `f` with the module if it is ready.
    pub fn invoke<T>(
        &self,
        f: impl FnOnce(&dyn SimulationModule) -> T,
    ) -> Result<T, ModuleCallError> {
        let module = self.module()?;
        Ok(f(module.as_ref()))
    }

    // ===== Transitions (sequencer only) =====

    pub(crate) fn begin_loading(&self) -> Result<(), IllegalTransition> {
        self.transition(ModuleState::Loading, None)
    }

    pub(crate) fn publish_ready(
        &self,
        module: Arc<dyn SimulationModule>,
    ) -> Result<(), IllegalTransition> {
        self.transition(ModuleState::Ready, Some(module))
    }

    pub(crate) fn publish_failed(&self, error: ModuleLoadError) -> Result<(), IllegalTransition> {
        self.transition(ModuleState::Failed(error), None)
    }

    fn transition(
        &self,
        next: ModuleState,
        module: Option<Arc<dyn SimulationModule>>,
    ) -> Result<(), IllegalTransition> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let from = inner.state.phase();
        let to = next.phase();
        if !from.can_transition_to(to) {
            return Err(IllegalTransition { from, to });
        }

        let now = Instant::now();
        if to == ModulePhase::Loading {
            inner.loading_since = Some(now);
        } else {
            inner.load_duration = inner.loading_since.map(|since| now.duration_since(since));
        }
        inner.state = next;
        inner.module = module;
        inner.history.push(to);
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&HandleInner) -> T) -> T {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&inner)
    }
}
