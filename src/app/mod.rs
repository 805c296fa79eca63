//! Application-level modules for the league simulation shell.
//!
//! This module contains the application coordinator and centralized state management.

mod app_state;
mod application_coordinator;
mod settings_coordinator;

pub use app_state::AppState;
pub use application_coordinator::ApplicationCoordinator;
pub use settings_coordinator::SettingsCoordinator;
pub use settings_coordinator::{DARK_MODE_KEY, REQUEST_KEY, TAB_KEY};
