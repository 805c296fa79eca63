//! Theme and capability registration.
//!
//! The registrar turns a declarative theme selection and capability list into
//! a [`HostConfiguration`] and applies it to a [`UiHost`]. Everything is
//! resolved before the host is touched, so a configuration error never leaves
//! the host half-configured.

use crate::capability::{resolve_capabilities, CapabilityRole, CapabilityTable};
use crate::error::ConfigurationError;
use crate::host::{HostConfiguration, UiHost};
use crate::theme::ThemeSelection;

/// Configures a UI host before first render.
pub struct Registrar;

impl Registrar {
    /// Resolves the selection and capability names without side effects.
    pub fn resolve<S: AsRef<str>>(
        theme: &ThemeSelection,
        capability_names: &[S],
    ) -> Result<HostConfiguration, ConfigurationError> {
        let theme = theme.resolve()?;
        let capabilities: CapabilityTable = resolve_capabilities(capability_names)?
            .into_iter()
            .collect();
        Ok(HostConfiguration::new(theme, capabilities))
    }

    /// Resolves and applies the configuration to `host`.
    ///
    /// Registering an already-registered capability replaces it, so calling
    /// this twice with the same arguments is the same as calling it once.
    pub fn configure<H: UiHost, S: AsRef<str>>(
        host: &mut H,
        theme: &ThemeSelection,
        capability_names: &[S],
    ) -> Result<HostConfiguration, ConfigurationError> {
        let config = match Self::resolve(theme, capability_names) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!(error = %err, preset = %theme.preset, "Host configuration rejected");
                return Err(err);
            }
        };

        host.apply_theme(config.theme());
        for name in config.capabilities().names() {
            if let Some(capability) = config.capabilities().get(name) {
                host.register_capability(name, capability);
            }
        }

        tracing::info!(
            preset = %config.theme().preset(),
            prefix = %config.theme().options().prefix,
            capabilities = config.capabilities().len(),
            directives = config.capabilities().names_with_role(CapabilityRole::Directive).len(),
            "Host configured"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capability;
    use crate::host::ShellHost;
    use crate::theme::{ThemeOptions, ThemePreset};

    #[test]
    fn test_configure_every_preset() {
        for preset in ThemePreset::ALL {
            let mut host = ShellHost::new();
            let selection = ThemeSelection::new(preset.name(), ThemeOptions::default());
            let config = Registrar::configure(&mut host, &selection, &["Button", "Tag"]).unwrap();

            assert_eq!(config.theme().preset(), preset);
            assert_eq!(host.capabilities().names(), vec!["Button", "Tag"]);
            assert_eq!(host.theme(), Some(config.theme()));
        }
    }

    #[test]
    fn test_names_are_canonicalized() {
        let mut host = ShellHost::new();
        Registrar::configure(&mut host, &ThemeSelection::default(), &["datatable", "INPUTNUMBER"])
            .unwrap();
        assert_eq!(host.capabilities().names(), vec!["DataTable", "InputNumber"]);
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let config =
            Registrar::resolve(&ThemeSelection::default(), &["Button", "button", "Button"]).unwrap();
        assert_eq!(config.capabilities().len(), 1);
        assert!(config.supports(Capability::Button));
    }

    #[test]
    fn test_unknown_capability_leaves_host_untouched() {
        let mut host = ShellHost::new();
        let result = Registrar::configure(&mut host, &ThemeSelection::default(), &["Button", "Carousel"]);
        assert_eq!(
            result,
            Err(ConfigurationError::UnknownCapability("Carousel".to_string()))
        );
        assert!(host.capabilities().is_empty());
        assert!(host.theme().is_none());
    }
}
