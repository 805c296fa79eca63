//! League Simulation Shell GUI Application
//!
//! Desktop front end for the league simulation module, built with egui.
//! Startup runs in a fixed order:
//! - configure the host from a shell profile (theme preset, capabilities)
//! - mount the root view
//! - load and initialize the simulation module in the background
//!
//! The window is usable while the module loads; simulation controls unlock
//! once it is ready. A module that fails to load leaves the UI in place and
//! shows an error banner.
//!
//! Layout:
//! - `app/` - Application state and coordinators
//! - `io/` - Background simulation runs and request files
//! - `state/` - Simulation request and view state
//! - `ui/` - Capability-backed widgets and panels
//! - `utils/` - Formatting helpers

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use std::process::ExitCode;
use std::sync::Arc;

use lsim::{
    BootstrapError, Capability, EchoModule, HostConfiguration, LoadOptions, ModuleHandle,
    ModulePhase, Registrar, RootView, Sequencer, ShellHost, ShellProfile, SimulationRequest,
    UiHost,
};

mod utils;
mod io;
mod app;
mod ui;
mod state;

use app::{
    AppState, ApplicationCoordinator, SettingsCoordinator, DARK_MODE_KEY, REQUEST_KEY, TAB_KEY,
};
use io::SimulationRunner;
use state::ShellTab;
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Root view of the shell. Renders every capability kind.
struct ShellView;

impl RootView for ShellView {
    fn name(&self) -> &str {
        "ShellView"
    }

    fn required_capabilities(&self) -> Vec<Capability> {
        Capability::ALL.to_vec()
    }
}

/// Main application entry point.
///
/// Usage: `league-sim-gui [PROFILE.json]`
fn main() -> ExitCode {
    lsim::logging::init("info");

    let profile = match std::env::args().nth(1) {
        Some(path) => match ShellProfile::load(&path) {
            Ok(profile) => profile,
            Err(err) => {
                tracing::error!(path = %path, error = %err, "Cannot read shell profile");
                return ExitCode::from(2);
            }
        },
        None => ShellProfile::default(),
    };

    let mut host = ShellHost::new();
    let config = match Registrar::configure(&mut host, &profile.theme, &profile.capabilities) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Invalid shell configuration");
            return ExitCode::from(2);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_title("League Sim"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "League Sim",
        options,
        Box::new(move |cc| {
            let app = LeagueSimApp::new(cc, host, config, &profile)?;
            Ok(Box::new(app))
        }),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Application exited with an error");
            ExitCode::FAILURE
        }
    }
}

/// The league simulation shell application.
///
/// Delegates to coordinators:
/// - `ApplicationCoordinator` handles the module lifecycle and module calls
/// - `SettingsCoordinator` handles preference persistence
/// - `PanelManager` handles UI panel layout and rendering
struct LeagueSimApp {
    /// Centralized application state
    state: AppState,
    /// Owns the host and the module lifecycle
    sequencer: Sequencer<ShellHost>,
    /// Theme and capabilities, fixed for the process lifetime
    config: HostConfiguration,
    /// Background simulation runs
    runner: SimulationRunner,
}

impl LeagueSimApp {
    /// Mounts the shell, starts the module load and restores preferences.
    fn new(
        cc: &eframe::CreationContext,
        mut host: ShellHost,
        config: HostConfiguration,
        profile: &ShellProfile,
    ) -> Result<Self, BootstrapError> {
        host.bind_context(cc.egui_ctx.clone());
        let mut sequencer = Sequencer::new(host);

        let options = LoadOptions::default()
            .with_timeout(profile.module.load_timeout())
            .with_repaint(cc.egui_ctx.clone());
        sequencer.start(
            &ShellView,
            &profile.mount_target(),
            Arc::new(EchoModule::loader()),
            options,
        )?;

        let request: Option<SimulationRequest> =
            SettingsCoordinator::try_load_setting(cc.storage, REQUEST_KEY);
        let tab = SettingsCoordinator::load_setting_or(cc.storage, TAB_KEY, ShellTab::default());
        let dark_mode = config.theme().options().allows_manual_dark_mode()
            && SettingsCoordinator::load_setting_or(cc.storage, DARK_MODE_KEY, false);
        if dark_mode {
            cc.egui_ctx.set_theme(egui::Theme::Dark);
        }

        tracing::debug!(
            capabilities = sequencer.host().capabilities().len(),
            "Shell ready"
        );

        Ok(Self::with_state(
            AppState::restored(request, tab, dark_mode),
            sequencer,
            config,
        ))
    }

    fn with_state(state: AppState, sequencer: Sequencer<ShellHost>, config: HostConfiguration) -> Self {
        Self {
            state,
            sequencer,
            config,
            runner: SimulationRunner::new(),
        }
    }

    fn handle(&self) -> ModuleHandle {
        self.sequencer.handle()
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::GreetRequested => {
                let handle = self.handle();
                ApplicationCoordinator::greet(&mut self.state, &handle);
            }
            PanelInteraction::RunRequested => {
                let handle = self.handle();
                ApplicationCoordinator::run_simulation(&mut self.state, &mut self.runner, &handle, ctx);
            }
            PanelInteraction::ImportRequested(path) => {
                ApplicationCoordinator::import_request(&mut self.state, &path);
            }
            PanelInteraction::ExportRequested(path) => {
                ApplicationCoordinator::export_request(&mut self.state, &path);
            }
            PanelInteraction::DarkModeToggled(dark) => {
                self.state.view.set_dark_mode(dark);
                ctx.set_theme(if dark { egui::Theme::Dark } else { egui::Theme::Light });
            }
        }
    }
}

impl eframe::App for LeagueSimApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::save_setting(storage, REQUEST_KEY, self.state.simulation.request());
        SettingsCoordinator::save_setting(storage, TAB_KEY, &self.state.view.selected_tab());
        SettingsCoordinator::save_setting(storage, DARK_MODE_KEY, &self.state.view.dark_mode());
    }

    /// Main update loop:
    /// 1. Publish any module load outcome
    /// 2. Collect finished simulation runs
    /// 3. Render all panels via PanelManager
    /// 4. Handle panel interactions
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::poll_module(&mut self.state, &mut self.sequencer);
        ApplicationCoordinator::check_run_completion(&mut self.state, &mut self.runner);

        // Keep polling so a load timeout is noticed without user input
        if self.state.module_phase == ModulePhase::Loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        let handle = self.handle();
        if let Some(interaction) =
            PanelManager::render_all_panels(ctx, &mut self.state, &self.config, &handle, &self.runner)
        {
            self.handle_panel_interaction(interaction, ctx);
        }
    }
}
