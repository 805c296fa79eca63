//! Module tab rendering
//!
//! Shows the module lifecycle, load timing and the active host
//! configuration.

use egui::RichText;
use lsim::{CapabilityRole, DarkModeSelector, HostConfiguration, ModuleHandle, ModulePhase};

use crate::ui::widgets::{Severity, Widgets};
use crate::utils::format_duration;

/// Tag severity for a lifecycle phase.
pub fn phase_severity(phase: ModulePhase) -> Severity {
    match phase {
        ModulePhase::Unloaded => Severity::Secondary,
        ModulePhase::Loading => Severity::Warn,
        ModulePhase::Ready => Severity::Success,
        ModulePhase::Failed => Severity::Danger,
    }
}

/// Renders the module tab
pub fn render_module_panel(
    ui: &mut egui::Ui,
    widgets: &Widgets<'_>,
    config: &HostConfiguration,
    handle: &ModuleHandle,
) {
    ui.label(RichText::new("Simulation Module").strong());
    egui::Grid::new("module_info").num_columns(2).show(ui, |ui| {
        ui.label("State:");
        widgets.tag(ui, &handle.phase().to_string(), phase_severity(handle.phase()));
        ui.end_row();

        ui.label("History:");
        let history: Vec<String> = handle.history().iter().map(|p| p.to_string()).collect();
        ui.label(history.join(" → "));
        ui.end_row();

        ui.label("Load time:");
        ui.label(
            handle
                .load_duration()
                .map(format_duration)
                .unwrap_or_else(|| "-".to_string()),
        );
        ui.end_row();

        if let Some(error) = handle.error() {
            ui.label("Error:");
            ui.colored_label(widgets.colors().danger, error.to_string());
            ui.end_row();
        }
    });

    ui.add_space(10.0);
    ui.label(RichText::new("Theme").strong());
    let options = config.theme().options();
    egui::Grid::new("theme_info").num_columns(2).show(ui, |ui| {
        ui.label("Preset:");
        ui.label(config.theme().preset().name());
        ui.end_row();

        ui.label("Prefix:");
        ui.label(options.prefix.as_str());
        ui.end_row();

        ui.label("Dark mode:");
        ui.label(match &options.dark_mode_selector {
            DarkModeSelector::System => "follows system".to_string(),
            DarkModeSelector::Class(selector) => format!("manual ({})", selector),
            DarkModeSelector::Disabled => "disabled".to_string(),
        });
        ui.end_row();

        ui.label("Layered:");
        ui.label(if options.css_layer { "yes" } else { "no" });
        ui.end_row();
    });

    ui.add_space(10.0);
    ui.label(RichText::new("Registered capabilities").strong());
    egui::Grid::new("capability_roles").num_columns(2).show(ui, |ui| {
        for (label, role, severity) in [
            ("Components:", CapabilityRole::Component, Severity::Secondary),
            ("Directives:", CapabilityRole::Directive, Severity::Info),
        ] {
            ui.label(label);
            ui.horizontal_wrapped(|ui| {
                for name in config.capabilities().names_with_role(role) {
                    widgets.tag(ui, name, severity);
                }
            });
            ui.end_row();
        }
    });
}
