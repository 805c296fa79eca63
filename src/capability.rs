//! Renderable UI capabilities and the table they are registered in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// How a capability participates in the view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityRole {
    /// A standalone widget.
    Component,
    /// A decoration attached to another widget's response.
    Directive,
}

/// A named, renderable UI building block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    Button,
    Dropdown,
    TabView,
    TabPanel,
    DataTable,
    Column,
    Tag,
    InputNumber,
    Checkbox,
    Tooltip,
}

impl Capability {
    pub const ALL: [Capability; 10] = [
        Capability::Button,
        Capability::Dropdown,
        Capability::TabView,
        Capability::TabPanel,
        Capability::DataTable,
        Capability::Column,
        Capability::Tag,
        Capability::InputNumber,
        Capability::Checkbox,
        Capability::Tooltip,
    ];

    /// Canonical registration name.
    pub fn name(self) -> &'static str {
        match self {
            Capability::Button => "Button",
            Capability::Dropdown => "Dropdown",
            Capability::TabView => "TabView",
            Capability::TabPanel => "TabPanel",
            Capability::DataTable => "DataTable",
            Capability::Column => "Column",
            Capability::Tag => "Tag",
            Capability::InputNumber => "InputNumber",
            Capability::Checkbox => "Checkbox",
            Capability::Tooltip => "Tooltip",
        }
    }

    pub fn roles(self) -> &'static [CapabilityRole] {
        match self {
            Capability::Tooltip => &[CapabilityRole::Directive, CapabilityRole::Component],
            _ => &[CapabilityRole::Component],
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Capability::ALL
            .into_iter()
            .find(|capability| capability.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigurationError::UnknownCapability(s.to_string()))
    }
}

/// Resolves a list of capability names, failing on the first unknown one.
pub fn resolve_capabilities<S: AsRef<str>>(names: &[S]) -> Result<Vec<Capability>, ConfigurationError> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

/// Capabilities registered with a host, keyed by canonical name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityTable {
    entries: BTreeMap<String, Capability>,
}

impl CapabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a capability under `name`; re-registering replaces the
    /// previous entry.
    pub fn register(&mut self, name: &str, capability: Capability) {
        self.entries.insert(name.to_string(), capability);
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.entries.contains_key(capability.name())
    }

    pub fn get(&self, name: &str) -> Option<Capability> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Registered names whose capability plays `role`, in sorted order.
    pub fn names_with_role(&self, role: CapabilityRole) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, capability)| capability.roles().contains(&role))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Capabilities from `required` that are not registered.
    pub fn missing(&self, required: &[Capability]) -> Vec<Capability> {
        required
            .iter()
            .copied()
            .filter(|capability| !self.contains(*capability))
            .collect()
    }
}

impl FromIterator<Capability> for CapabilityTable {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut table = CapabilityTable::new();
        for capability in iter {
            table.register(capability.name(), capability);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_names_round_trip() {
        for capability in Capability::ALL {
            assert_eq!(capability.name().parse::<Capability>().unwrap(), capability);
        }
        assert_eq!("datatable".parse::<Capability>().unwrap(), Capability::DataTable);
    }

    #[test]
    fn test_unknown_capability() {
        let result = resolve_capabilities(&["Button", "Slider"]);
        assert_eq!(result, Err(ConfigurationError::UnknownCapability("Slider".to_string())));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut table = CapabilityTable::new();
        table.register("Button", Capability::Button);
        table.register("Button", Capability::Button);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Button"), Some(Capability::Button));
    }

    #[test]
    fn test_missing_capabilities() {
        let table: CapabilityTable = [Capability::Button].into_iter().collect();
        let missing = table.missing(&[Capability::Button, Capability::DataTable]);
        assert_eq!(missing, vec![Capability::DataTable]);
    }

    #[test]
    fn test_tooltip_is_directive_and_component() {
        assert!(Capability::Tooltip.roles().contains(&CapabilityRole::Directive));
        assert!(Capability::Tooltip.roles().contains(&CapabilityRole::Component));
        assert_eq!(Capability::Button.roles(), &[CapabilityRole::Component]);
    }

    #[test]
    fn test_names_with_role() {
        let table: CapabilityTable = [Capability::Tooltip, Capability::Button, Capability::Tag]
            .into_iter()
            .collect();
        assert_eq!(table.names_with_role(CapabilityRole::Directive), vec!["Tooltip"]);
        assert_eq!(
            table.names_with_role(CapabilityRole::Component),
            vec!["Button", "Tag", "Tooltip"]
        );
    }
}
