//! UI panel rendering subsystem
//!
//! - Widgets (capability-backed controls scoped by the theme prefix)
//! - Header panel (greeting, request import/export, dark mode switch)
//! - Setup, results and module tabs
//! - Status bar (memory and module state)
//! - Panel manager (panel orchestration and layout)

pub mod widgets;
pub mod header;
pub mod setup_panel;
pub mod results_panel;
pub mod module_panel;
pub mod status_bar;
pub mod panel_manager;
