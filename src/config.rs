//! Shell profiles: the declarative startup configuration.
//!
//! A profile selects the theme, the capabilities to register, the mount
//! target and module loading limits. The default profile matches the stock
//! league simulation front end.
//!
//! ```json
//! {
//!   "theme": { "preset": "Aura", "options": { "prefix": "p", "darkModeSelector": "system", "cssLayer": false } },
//!   "capabilities": ["Button", "DataTable", "Column"],
//!   "mountTarget": "#app",
//!   "module": { "loadTimeoutMs": 30000 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::capability::Capability;
use crate::error::ProfileError;
use crate::host::MountTarget;
use crate::theme::ThemeSelection;

/// Module loading settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ModuleSettings {
    /// No limit when absent.
    pub load_timeout_ms: Option<u64>,
}

impl ModuleSettings {
    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout_ms.map(Duration::from_millis)
    }
}

/// Startup configuration of the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ShellProfile {
    pub theme: ThemeSelection,
    pub capabilities: Vec<String>,
    pub mount_target: String,
    pub module: ModuleSettings,
}

impl Default for ShellProfile {
    fn default() -> Self {
        Self {
            theme: ThemeSelection::default(),
            capabilities: Capability::ALL.iter().map(|c| c.name().to_string()).collect(),
            mount_target: MountTarget::default().as_str().to_string(),
            module: ModuleSettings::default(),
        }
    }
}

impl ShellProfile {
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn mount_target(&self) -> MountTarget {
        MountTarget::new(self.mount_target.clone())
    }
}
