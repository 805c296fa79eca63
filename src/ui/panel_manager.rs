//! Panel orchestration and layout management.
//!
//! Lays out the header, status bar, error banner and tabbed central area,
//! and funnels their interactions into a single [`PanelInteraction`].

use lsim::{HostConfiguration, ModuleHandle};
use std::path::PathBuf;

use crate::app::AppState;
use crate::io::SimulationRunner;
use crate::state::ShellTab;
use crate::ui::widgets::Widgets;
use crate::ui::{header, module_panel, results_panel, setup_panel, status_bar};

/// Result of panel interactions that need to be handled by the application coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelInteraction {
    /// User asked the module to greet
    GreetRequested,
    /// User started a simulation run
    RunRequested,
    /// User picked a request file to import
    ImportRequested(PathBuf),
    /// User picked a destination to export the request to
    ExportRequested(PathBuf),
    /// User flipped the manual dark mode switch
    DarkModeToggled(bool),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// Called from `eframe::App::update()` once per frame.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        config: &HostConfiguration,
        handle: &ModuleHandle,
        runner: &SimulationRunner,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;
        let widgets = Widgets::new(config, ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state, &widgets, config, handle) {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::GreetRequested => PanelInteraction::GreetRequested,
                    header::HeaderInteraction::ImportRequested(path) => {
                        PanelInteraction::ImportRequested(path)
                    }
                    header::HeaderInteraction::ExportRequested(path) => {
                        PanelInteraction::ExportRequested(path)
                    }
                    header::HeaderInteraction::DarkModeToggled(dark) => {
                        PanelInteraction::DarkModeToggled(dark)
                    }
                });
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, &widgets, handle, runner.is_running());
        });

        let central_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(8))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default().frame(central_frame).show(ctx, |ui| {
            let mut dismissed = false;
            if let Some(message) = &state.error_message {
                ui.horizontal(|ui| {
                    ui.colored_label(widgets.colors().danger, format!("⚠ {}", message));
                    if ui.small_button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
                ui.separator();
            }
            if dismissed {
                state.error_message = None;
            }

            widgets.tab_view(ui, &ShellTab::ALL, state.view.selected_tab_mut(), ShellTab::label);

            let selected = state.view.selected_tab();
            widgets.tab_panel(ui, |ui| match selected {
                ShellTab::Setup => {
                    if let Some(setup_panel::SetupInteraction::RunRequested) =
                        setup_panel::render_setup_panel(ui, state, &widgets, handle, runner.is_running())
                    {
                        interaction = Some(PanelInteraction::RunRequested);
                    }
                }
                ShellTab::Results => results_panel::render_results_panel(ui, state, &widgets),
                ShellTab::Module => module_panel::render_module_panel(ui, &widgets, config, handle),
            });
        });

        interaction
    }
}
