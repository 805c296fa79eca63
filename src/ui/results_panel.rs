//! Results tab rendering
//!
//! Shows the last report returned by the module, or why there is none.

use egui::RichText;

use crate::app::AppState;
use crate::ui::widgets::Widgets;

/// Renders the results tab
pub fn render_results_panel(ui: &mut egui::Ui, state: &AppState, widgets: &Widgets<'_>) {
    if let Some(message) = state.simulation.run_error() {
        ui.colored_label(widgets.colors().danger, format!("Simulation error: {}", message));
        ui.separator();
    }

    match state.simulation.report() {
        Some(report) if !report.is_empty() => {
            ui.label(RichText::new(format!("{} rows", report.rows.len())).strong());
            widgets.data_table(ui, "results", report);
        }
        Some(_) => {
            ui.colored_label(widgets.colors().text_dim, "The simulation returned no rows.");
        }
        None => {
            ui.colored_label(widgets.colors().text_dim, "No results yet. Run a simulation from the Setup tab.");
        }
    }
}
