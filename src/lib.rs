pub mod error;
pub mod theme;
pub mod capability;
pub mod host;
pub mod registrar;
pub mod module;
pub mod handle;
pub mod sequencer;
pub mod config;
pub mod logging;

// Export error types
pub use error::{
    BootstrapError, ConfigurationError, ModuleCallError, ModuleLoadError, MountError, ProfileError,
};

// Export theme and capability configuration
pub use theme::{
    DarkModeSelector, ThemeColors, ThemeConfiguration, ThemeOptions, ThemePreset, ThemeSelection,
    hex_to_color32, adjust_brightness, with_alpha,
};
pub use capability::{Capability, CapabilityRole, CapabilityTable};

// Export host contract and registrar
pub use host::{HostConfiguration, MountTarget, RootView, ShellHost, UiHost};
pub use registrar::Registrar;

// Export module contract and lifecycle
pub use module::{
    EchoModule, FnLoader, ModuleLoader, SimulationModule, SimulationReport, SimulationRequest,
};
pub use handle::{ModuleHandle, ModulePhase, ModuleState};
pub use sequencer::{CancellationToken, LoadOptions, Sequencer};

// Export startup profile
pub use config::{ModuleSettings, ShellProfile};
