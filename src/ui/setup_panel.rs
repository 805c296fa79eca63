//! Setup tab rendering
//!
//! Edits the simulation request: engine flags, numeric options, the item
//! build and the result limit. The run button is only enabled once the
//! module is ready.

use egui::RichText;
use lsim::{ModuleHandle, SimulationRequest};

use crate::app::AppState;
use crate::state::{item_name, ITEM_CATALOG};
use crate::ui::widgets::{Severity, Widgets};

/// Result of user interaction with the setup tab
pub enum SetupInteraction {
    /// User clicked "Run Simulation"
    RunRequested,
}

/// Renders the setup tab
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
/// * `widgets` - Capability renderer
/// * `handle` - Module handle, used to gate the run button
/// * `running` - Whether a run is in flight
pub fn render_setup_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    widgets: &Widgets<'_>,
    handle: &ModuleHandle,
    running: bool,
) -> Option<SetupInteraction> {
    let mut interaction = None;

    ui.label(RichText::new("Options").strong());
    egui::Grid::new("setup_options").num_columns(2).show(ui, |ui| {
        for (key, value) in state.simulation.request_mut().options.iter_mut() {
            ui.label(key.as_str());
            if let Some(mut flag) = SimulationRequest::parse_flag(value) {
                if widgets.checkbox(ui, &mut flag, "").changed() {
                    *value = SimulationRequest::flag_text(flag).to_string();
                }
            } else if let Ok(mut number) = value.parse::<u64>() {
                if widgets.input_number(ui, &mut number, 0..=1000).changed() {
                    *value = number.to_string();
                }
            } else {
                ui.label(value.as_str());
            }
            ui.end_row();
        }
    });

    ui.add_space(8.0);
    ui.label(RichText::new("Items").strong());

    let mut remove_index = None;
    ui.horizontal_wrapped(|ui| {
        for (index, id) in state.simulation.request().item_ids.iter().enumerate() {
            let label = item_name(*id)
                .map(|name| name.to_string())
                .unwrap_or_else(|| format!("#{}", id));
            widgets.tag(ui, &label, Severity::Info);
            let remove = widgets.button(ui, "✕", true);
            if widgets.tooltip(remove, "Remove item").clicked() {
                remove_index = Some(index);
            }
        }
    });
    if let Some(index) = remove_index {
        state.simulation.remove_item(index);
    }

    ui.horizontal(|ui| {
        let options: Vec<String> = ITEM_CATALOG
            .iter()
            .map(|(id, name)| format!("{} ({})", name, id))
            .collect();
        widgets.dropdown(ui, "item_catalog", state.simulation.catalog_selection_mut(), &options);

        if widgets.button(ui, "➕ Add", true).clicked() {
            let selection = *state.simulation.catalog_selection_mut();
            if let Some((id, _)) = ITEM_CATALOG.get(selection) {
                state.simulation.add_item(*id);
            }
        }
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("Max results:");
        let mut max_results = state.simulation.request().max_results as u64;
        if widgets.input_number(ui, &mut max_results, 1..=500).changed() {
            state.simulation.request_mut().max_results = max_results as usize;
        }
    });

    ui.add_space(8.0);
    let can_run = handle.is_ready() && !running;
    let run = widgets.button(ui, "▶ Run Simulation", can_run);
    let hint = if running {
        "A simulation is already running"
    } else if handle.is_ready() {
        "Run the simulation with these settings"
    } else {
        "Available once the simulation module is ready"
    };
    if widgets.tooltip(run, hint).clicked() {
        interaction = Some(SetupInteraction::RunRequested);
    }

    interaction
}
