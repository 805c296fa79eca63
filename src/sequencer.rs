//! Bootstrap ordering and module lifecycle.
//!
//! The sequencer mounts the root view synchronously, then loads and
//! initializes the simulation module on a background thread so the UI stays
//! responsive. The outcome travels back over a channel and is published to the
//! [`ModuleHandle`] by [`Sequencer::poll`], which the UI calls once per frame.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{BootstrapError, ConfigurationError, ModuleLoadError};
use crate::handle::{ModuleHandle, ModulePhase};
use crate::host::{MountTarget, RootView, UiHost};
use crate::module::{ModuleLoader, SimulationModule};

type LoadOutcome = Result<Box<dyn SimulationModule>, ModuleLoadError>;

/// Cooperative cancellation flag for a pending module load.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Options for [`Sequencer::load_module`].
#[derive(Default)]
pub struct LoadOptions {
    /// Fail with [`ModuleLoadError::TimedOut`] if no outcome arrives in time.
    pub timeout: Option<Duration>,
    pub cancel: CancellationToken,
    /// Context to wake when the outcome is available.
    pub repaint: Option<egui::Context>,
}

impl LoadOptions {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }
}

struct PendingLoad {
    receiver: Receiver<LoadOutcome>,
    deadline: Option<(Instant, Duration)>,
    cancel: CancellationToken,
}

/// Owns the bootstrap order and the module lifecycle.
pub struct Sequencer<H: UiHost> {
    host: H,
    handle: ModuleHandle,
    pending: Option<PendingLoad>,
}

impl<H: UiHost> Sequencer<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            handle: ModuleHandle::new(),
            pending: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// A read-only view of the module lifecycle.
    pub fn handle(&self) -> ModuleHandle {
        self.handle.clone()
    }

    /// Mounts `root` at `target`.
    ///
    /// Every capability the view renders must already be registered.
    pub fn bootstrap(&mut self, root: &dyn RootView, target: &MountTarget) -> Result<(), BootstrapError> {
        if let Some(capability) = self
            .host
            .capabilities()
            .missing(&root.required_capabilities())
            .into_iter()
            .next()
        {
            let err = ConfigurationError::MissingCapability {
                view: root.name().to_string(),
                capability: capability.name().to_string(),
            };
            tracing::error!(error = %err, "Bootstrap aborted");
            return Err(err.into());
        }

        self.host.mount(root, target).map_err(|err| {
            tracing::error!(error = %err, target = %target, "Mount failed");
            BootstrapError::from(err)
        })?;
        tracing::info!(view = root.name(), target = %target, "Root view mounted");
        Ok(())
    }

    /// Starts loading the simulation module in the background.
    ///
    /// Returns immediately; the handle is `Loading` until [`Self::poll`]
    /// observes the outcome.
    pub fn load_module(
        &mut self,
        loader: Arc<dyn ModuleLoader>,
        options: LoadOptions,
    ) -> Result<(), BootstrapError> {
        if !self.host.is_mounted() {
            return Err(BootstrapError::NotMounted);
        }
        self.handle
            .begin_loading()
            .map_err(|illegal| BootstrapError::AlreadyStarted(illegal.from))?;

        let description = loader.describe();
        tracing::info!(module = %description, timeout = ?options.timeout, "Loading simulation module");

        let (sender, receiver) = channel();
        let cancel = options.cancel.clone();
        let repaint = options.repaint;
        let worker_cancel = cancel.clone();

        thread::spawn(move || {
            let outcome = load_and_init(loader.as_ref(), &worker_cancel);
            // Receiver is gone if the sequencer was dropped or already settled.
            let _ = sender.send(outcome);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });

        self.pending = Some(PendingLoad {
            receiver,
            deadline: options.timeout.map(|timeout| (Instant::now() + timeout, timeout)),
            cancel,
        });
        Ok(())
    }

    /// Mounts the root view and then starts the module load.
    pub fn start(
        &mut self,
        root: &dyn RootView,
        target: &MountTarget,
        loader: Arc<dyn ModuleLoader>,
        options: LoadOptions,
    ) -> Result<(), BootstrapError> {
        self.bootstrap(root, target)?;
        self.load_module(loader, options)
    }

    /// Publishes the load outcome if one is available. Call once per frame.
    pub fn poll(&mut self) -> ModulePhase {
        let Some(pending) = &self.pending else {
            return self.handle.phase();
        };

        if pending.cancel.is_cancelled() {
            self.settle(Err(ModuleLoadError::Cancelled));
        } else {
            match pending.receiver.try_recv() {
                Ok(outcome) => self.settle(outcome),
                Err(TryRecvError::Disconnected) => self.settle(Err(ModuleLoadError::Disconnected)),
                Err(TryRecvError::Empty) => {
                    if let Some((deadline, timeout)) = pending.deadline {
                        if Instant::now() >= deadline {
                            self.settle(Err(ModuleLoadError::TimedOut(timeout)));
                        }
                    }
                }
            }
        }
        self.handle.phase()
    }

    /// Blocks until the load settles or `max_wait` elapses.
    ///
    /// For headless callers and tests; the UI uses [`Self::poll`].
    pub fn wait_for_module(&mut self, max_wait: Duration) -> ModulePhase {
        let started = Instant::now();
        while let Some(pending) = &self.pending {
            let elapsed = started.elapsed();
            if elapsed >= max_wait {
                break;
            }
            let mut slice = (max_wait - elapsed).min(Duration::from_millis(10));
            if let Some((deadline, _)) = pending.deadline {
                slice = slice.min(deadline.saturating_duration_since(Instant::now()));
            }
            match pending.receiver.recv_timeout(slice) {
                Ok(outcome) => self.settle(outcome),
                Err(RecvTimeoutError::Disconnected) => self.settle(Err(ModuleLoadError::Disconnected)),
                Err(RecvTimeoutError::Timeout) => {
                    self.poll();
                }
            }
        }
        self.handle.phase()
    }

    fn settle(&mut self, outcome: LoadOutcome) {
        self.pending = None;
        let result = match outcome {
            Ok(module) => {
                let published = self.handle.publish_ready(Arc::from(module));
                if published.is_ok() {
                    tracing::info!(elapsed = ?self.handle.load_duration(), "Simulation module ready");
                }
                published
            }
            Err(err) => {
                let published = self.handle.publish_failed(err.clone());
                if published.is_ok() {
                    tracing::error!(error = %err, "Simulation module failed to load");
                }
                published
            }
        };
        if let Err(illegal) = result {
            tracing::warn!(from = %illegal.from, to = %illegal.to, "Discarded module outcome");
        }
    }
}

fn load_and_init(loader: &dyn ModuleLoader, cancel: &CancellationToken) -> LoadOutcome {
    let loaded = panic::catch_unwind(AssertUnwindSafe(|| loader.load()))
        .map_err(|payload| ModuleLoadError::Panicked(panic_message(payload)))?;
    let mut module = loaded.map_err(|err| ModuleLoadError::LoaderFailed(format!("{err:#}")))?;

    if cancel.is_cancelled() {
        return Err(ModuleLoadError::Cancelled);
    }

    let initialized = panic::catch_unwind(AssertUnwindSafe(|| module.init()))
        .map_err(|payload| ModuleLoadError::Panicked(panic_message(payload)))?;
    initialized.map_err(|err| ModuleLoadError::InitRejected(format!("{err:#}")))?;
    Ok(module)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
