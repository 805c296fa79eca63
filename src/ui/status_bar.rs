//! Status bar UI rendering
//!
//! Handles the bottom status bar with memory usage and module state.

use egui::RichText;
use lsim::ModuleHandle;

use crate::ui::module_panel::phase_severity;
use crate::ui::widgets::Widgets;
use crate::utils::{format_memory_mb, get_current_memory_mb};

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `widgets` - Capability renderer
/// * `handle` - Module handle
/// * `running` - Whether a simulation run is in flight
pub fn render_status_bar(ui: &mut egui::Ui, widgets: &Widgets<'_>, handle: &ModuleHandle, running: bool) {
    ui.horizontal(|ui| {
        // Always show memory usage first
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());

        ui.label(RichText::new("|").strong());
        ui.label(RichText::new("Module:").strong());
        let phase = handle.phase();
        widgets.tag(ui, &phase.to_string(), phase_severity(phase));

        if running {
            ui.label(RichText::new("|").strong());
            ui.spinner();
            ui.label("Simulating…");
        }
    });
}
