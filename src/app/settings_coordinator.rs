//! UI preference persistence.
//!
//! Preferences are stored in eframe's storage as JSON strings so any
//! serializable value (the last simulation request, the selected tab) can be
//! restored on the next start. The startup profile itself is never written
//! back: theme and capabilities stay fixed for the process lifetime.

use serde::{Deserialize, Serialize};

/// Storage key for the simulation request being edited.
pub const REQUEST_KEY: &str = "simulation_request";
/// Storage key for the selected tab.
pub const TAB_KEY: &str = "selected_tab";
/// Storage key for the manual dark mode switch.
pub const DARK_MODE_KEY: &str = "dark_mode";

/// Coordinates preference persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a preference, falling back to `default` when the key is missing
    /// or holds data that no longer deserializes.
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        Self::try_load_setting(storage, key).unwrap_or(default)
    }

    /// Attempts to load a preference, returning None if not found or invalid.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let storage = storage?;
        let json_str = storage.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "Ignoring unreadable preference");
                None
            }
        }
    }

    /// Saves a preference and flushes storage.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => {
                storage.set_string(key, json_str);
                storage.flush();
            }
            Err(err) => tracing::warn!(key, error = %err, "Failed to serialize preference"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ShellTab;
    use lsim::SimulationRequest;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                data: HashMap::new(),
            }
        }
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_request_round_trips_through_storage() {
        let mut storage = MockStorage::new();
        let mut request = SimulationRequest::default();
        request.set_flag("ITEM_HUBRIS_EMINENCE_ACTIVE", true);
        request.item_ids = vec![6697];

        SettingsCoordinator::save_setting(&mut storage, REQUEST_KEY, &request);
        let loaded: Option<SimulationRequest> =
            SettingsCoordinator::try_load_setting(Some(&storage), REQUEST_KEY);
        assert_eq!(loaded, Some(request));
    }

    #[test]
    fn test_missing_tab_uses_default() {
        let storage = MockStorage::new();
        let tab = SettingsCoordinator::load_setting_or(Some(&storage), TAB_KEY, ShellTab::Setup);
        assert_eq!(tab, ShellTab::Setup);

        let no_storage = SettingsCoordinator::load_setting_or(None, TAB_KEY, ShellTab::Module);
        assert_eq!(no_storage, ShellTab::Module);
    }

    #[test]
    fn test_corrupt_value_falls_back() {
        let mut storage = MockStorage::new();
        eframe::Storage::set_string(&mut storage, TAB_KEY, "\"Nonexistent\"".to_string());
        let tab = SettingsCoordinator::load_setting_or(Some(&storage), TAB_KEY, ShellTab::Results);
        assert_eq!(tab, ShellTab::Results);
    }
}
