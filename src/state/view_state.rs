//! View selection state: active tab and manual dark mode.

use serde::{Deserialize, Serialize};

/// Tabs of the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShellTab {
    #[default]
    Setup,
    Results,
    Module,
}

impl ShellTab {
    pub const ALL: [ShellTab; 3] = [ShellTab::Setup, ShellTab::Results, ShellTab::Module];

    pub fn label(self) -> &'static str {
        match self {
            ShellTab::Setup => "Setup",
            ShellTab::Results => "Results",
            ShellTab::Module => "Module",
        }
    }
}

/// State of view-level selections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewState {
    selected_tab: ShellTab,
    /// Only honored when the theme lets the application control dark mode
    dark_mode: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab(selected_tab: ShellTab, dark_mode: bool) -> Self {
        Self {
            selected_tab,
            dark_mode,
        }
    }

    pub fn selected_tab(&self) -> ShellTab {
        self.selected_tab
    }

    pub fn select_tab(&mut self, tab: ShellTab) {
        self.selected_tab = tab;
    }

    pub fn selected_tab_mut(&mut self) -> &mut ShellTab {
        &mut self.selected_tab
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }
}
