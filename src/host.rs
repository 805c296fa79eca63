//! UI host contract and the egui-backed shell host.

use std::fmt;

use crate::capability::{Capability, CapabilityTable};
use crate::error::MountError;
use crate::theme::ThemeConfiguration;

/// A view tree that can be mounted on a host.
pub trait RootView {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Every capability rendered anywhere in the view tree.
    fn required_capabilities(&self) -> Vec<Capability>;
}

/// Where the root view is attached, written as an element selector (`#app`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountTarget(String);

impl MountTarget {
    pub fn new(selector: impl Into<String>) -> Self {
        Self(selector.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A target is valid when it is `#` followed by a non-empty identifier.
    pub fn is_valid(&self) -> bool {
        self.0
            .strip_prefix('#')
            .is_some_and(|id| !id.is_empty() && !id.chars().any(char::is_whitespace))
    }
}

impl Default for MountTarget {
    fn default() -> Self {
        Self::new("#app")
    }
}

impl fmt::Display for MountTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operations a UI framework provides to the bootstrap.
pub trait UiHost {
    fn apply_theme(&mut self, theme: &ThemeConfiguration);

    fn register_capability(&mut self, name: &str, capability: Capability);

    /// Attaches `root` at `target`. Must not suspend.
    fn mount(&mut self, root: &dyn RootView, target: &MountTarget) -> Result<(), MountError>;

    fn capabilities(&self) -> &CapabilityTable;

    fn is_mounted(&self) -> bool;
}

/// Resolved theme plus registered capabilities.
///
/// Built once at startup and handed to the rendering layer by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfiguration {
    theme: ThemeConfiguration,
    capabilities: CapabilityTable,
}

impl HostConfiguration {
    pub fn new(theme: ThemeConfiguration, capabilities: CapabilityTable) -> Self {
        Self {
            theme,
            capabilities,
        }
    }

    pub fn theme(&self) -> &ThemeConfiguration {
        &self.theme
    }

    pub fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    /// Stable egui id for a widget instance, namespaced by the theme prefix.
    pub fn widget_id(&self, capability: Capability, salt: &str) -> egui::Id {
        let scoped = self.theme.options().scoped_id(capability.name());
        egui::Id::new((scoped, salt.to_string()))
    }
}

/// Host used by the desktop shell.
///
/// When bound to an [`egui::Context`], mounting installs the theme into it.
#[derive(Default)]
pub struct ShellHost {
    theme: Option<ThemeConfiguration>,
    capabilities: CapabilityTable,
    mounted: Option<(String, MountTarget)>,
    ctx: Option<egui::Context>,
}

impl ShellHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_context(&mut self, ctx: egui::Context) {
        self.ctx = Some(ctx);
    }

    pub fn theme(&self) -> Option<&ThemeConfiguration> {
        self.theme.as_ref()
    }

    /// Name of the mounted view and its target.
    pub fn mounted(&self) -> Option<(&str, &MountTarget)> {
        self.mounted.as_ref().map(|(name, target)| (name.as_str(), target))
    }
}

impl UiHost for ShellHost {
    fn apply_theme(&mut self, theme: &ThemeConfiguration) {
        self.theme = Some(theme.clone());
    }

    fn register_capability(&mut self, name: &str, capability: Capability) {
        self.capabilities.register(name, capability);
    }

    fn mount(&mut self, root: &dyn RootView, target: &MountTarget) -> Result<(), MountError> {
        if let Some((_, current)) = &self.mounted {
            return Err(MountError::AlreadyMounted {
                target: current.to_string(),
            });
        }
        if !target.is_valid() {
            return Err(MountError::InvalidTarget(target.to_string()));
        }
        let theme = self
            .theme
            .as_ref()
            .ok_or_else(|| MountError::Rejected("no theme applied before mount".to_string()))?;

        if let Some(ctx) = &self.ctx {
            theme.install(ctx);
        }
        self.mounted = Some((root.name().to_string(), target.clone()));
        Ok(())
    }

    fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }

    fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }
}
