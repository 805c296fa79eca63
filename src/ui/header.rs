//! Header panel UI rendering
//!
//! Handles the top bar with the module greeting, request import/export and
//! the manual dark mode switch.

use egui::RichText;
use lsim::{HostConfiguration, ModuleHandle};
use std::path::PathBuf;

use crate::app::AppState;
use crate::ui::widgets::{Severity, Widgets};

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User clicked "Greet"
    GreetRequested,
    /// User picked a request file to import
    ImportRequested(PathBuf),
    /// User picked a destination to export the request to
    ExportRequested(PathBuf),
    /// User flipped the dark mode switch
    DarkModeToggled(bool),
}

fn request_dialog() -> rfd::FileDialog {
    let mut dialog = rfd::FileDialog::new().add_filter("Simulation Requests", &["json"]);
    if let Ok(cwd) = std::env::current_dir() {
        dialog = dialog.set_directory(cwd);
    }
    dialog
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
/// * `widgets` - Capability renderer
/// * `config` - Host configuration (theme options)
/// * `handle` - Module handle, used to gate module calls
pub fn render_header(
    ui: &mut egui::Ui,
    state: &mut AppState,
    widgets: &Widgets<'_>,
    config: &HostConfiguration,
    handle: &ModuleHandle,
) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new("League Sim").heading().strong());
        widgets.tag(ui, config.theme().preset().name(), Severity::Secondary);

        ui.separator();

        let greet = widgets.button(ui, "👋 Greet", handle.is_ready());
        if widgets.tooltip(greet, "Call the module's greet() entry point").clicked() {
            interaction = Some(HeaderInteraction::GreetRequested);
        }

        if widgets.button(ui, "📂 Import Request", true).clicked() {
            if let Some(path) = request_dialog().pick_file() {
                interaction = Some(HeaderInteraction::ImportRequested(path));
            }
        }

        if widgets.button(ui, "💾 Export Request", true).clicked() {
            if let Some(path) = request_dialog().set_file_name("request.json").save_file() {
                interaction = Some(HeaderInteraction::ExportRequested(path));
            }
        }

        if config.theme().options().allows_manual_dark_mode() {
            ui.separator();
            let mut dark_mode = state.view.dark_mode();
            if widgets.checkbox(ui, &mut dark_mode, "Dark mode").changed() {
                interaction = Some(HeaderInteraction::DarkModeToggled(dark_mode));
            }
        }

        if let Some(greeting) = state.simulation.greeting() {
            ui.separator();
            ui.label(RichText::new(greeting).italics());
        }
    });

    interaction
}
