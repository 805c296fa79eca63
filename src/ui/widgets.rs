//! Capability-backed widget rendering.
//!
//! Every control the shell draws goes through [`Widgets`], which maps a
//! [`Capability`] to an egui widget and scopes widget ids with the theme
//! prefix. The root view declares every capability used here, so bootstrap
//! has already refused to mount if any of them is unregistered.

use egui::{Response, RichText, Ui};
use lsim::{Capability, HostConfiguration, SimulationReport, ThemeColors};

use crate::utils::format_cell;

/// Visual weight of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warn,
    Danger,
    Secondary,
}

/// Renders registered capabilities with the active palette.
pub struct Widgets<'a> {
    config: &'a HostConfiguration,
    colors: ThemeColors,
}

impl<'a> Widgets<'a> {
    /// Creates a renderer using the palette of the context's current mode.
    pub fn new(config: &'a HostConfiguration, ctx: &egui::Context) -> Self {
        Self {
            config,
            colors: config.theme().colors(ctx.theme()),
        }
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.colors
    }

    pub fn button(&self, ui: &mut Ui, label: &str, enabled: bool) -> Response {
        ui.add_enabled(enabled, egui::Button::new(label))
    }

    /// Attaches hover text to `response`.
    pub fn tooltip(&self, response: Response, text: &str) -> Response {
        response.on_hover_text(text).on_disabled_hover_text(text)
    }

    /// Combo box over `options`. Returns true if the selection changed.
    pub fn dropdown(&self, ui: &mut Ui, salt: &str, selected: &mut usize, options: &[String]) -> bool {
        let mut changed = false;
        let selected_text = options.get(*selected).cloned().unwrap_or_default();
        egui::ComboBox::from_id_salt(self.config.widget_id(Capability::Dropdown, salt))
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for (index, option) in options.iter().enumerate() {
                    changed |= ui.selectable_value(selected, index, option.as_str()).changed();
                }
            });
        changed
    }

    /// Row of tab headers. Returns true if the selection changed.
    pub fn tab_view<T: Copy + PartialEq>(
        &self,
        ui: &mut Ui,
        tabs: &[T],
        selected: &mut T,
        label: impl Fn(T) -> &'static str,
    ) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            for &tab in tabs {
                let text = RichText::new(label(tab)).strong();
                if ui.selectable_label(*selected == tab, text).clicked() && *selected != tab {
                    *selected = tab;
                    changed = true;
                }
            }
        });
        ui.separator();
        changed
    }

    /// Content area of the selected tab.
    pub fn tab_panel(&self, ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
        egui::Frame::default().inner_margin(4.0).show(ui, add_contents);
    }

    pub fn tag(&self, ui: &mut Ui, text: &str, severity: Severity) -> Response {
        let fill = match severity {
            Severity::Success => self.colors.success,
            Severity::Info => self.colors.info,
            Severity::Warn => self.colors.warn,
            Severity::Danger => self.colors.danger,
            Severity::Secondary => self.colors.hover,
        };
        let text_color = match severity {
            Severity::Secondary => self.colors.text,
            _ => egui::Color32::WHITE,
        };
        let rich = RichText::new(format!(" {} ", text))
            .background_color(fill)
            .color(text_color)
            .strong();
        ui.label(rich)
    }

    pub fn input_number(
        &self,
        ui: &mut Ui,
        value: &mut u64,
        range: std::ops::RangeInclusive<u64>,
    ) -> Response {
        ui.add(egui::DragValue::new(value).range(range).speed(1.0))
    }

    pub fn checkbox(&self, ui: &mut Ui, checked: &mut bool, label: &str) -> Response {
        ui.checkbox(checked, label)
    }

    /// Striped table with one column per report column.
    pub fn data_table(&self, ui: &mut Ui, salt: &str, report: &SimulationReport) {
        egui::ScrollArea::both()
            .id_salt(self.config.widget_id(Capability::DataTable, salt))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new(self.config.widget_id(Capability::Column, salt))
                    .striped(true)
                    .num_columns(report.columns.len())
                    .show(ui, |ui| {
                        for column in &report.columns {
                            ui.label(RichText::new(column).strong().color(self.colors.primary));
                        }
                        ui.end_row();

                        for row in &report.rows {
                            for column_index in 0..report.columns.len() {
                                let cell = row.get(column_index).map(format_cell).unwrap_or_default();
                                ui.label(cell);
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
