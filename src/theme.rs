//! Theme presets and options for the league simulation shell.
//!
//! A [`ThemeConfiguration`] is resolved once at startup from a declarative
//! [`ThemeSelection`] and is immutable afterwards. Each preset provides a
//! light and a dark palette which are installed into egui's visuals when the
//! root view is mounted.
//!
//! # Examples
//!
//! ```
//! use lsim::theme::{ThemeSelection, ThemePreset};
//!
//! let config = ThemeSelection::default().resolve().unwrap();
//! assert_eq!(config.preset(), ThemePreset::Aura);
//! assert_eq!(config.options().scoped_id("button"), "p-button");
//! ```

use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// The closed set of supported visual presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThemePreset {
    Aura,
    Material,
    Lara,
    Nora,
}

impl ThemePreset {
    /// All supported presets, in display order.
    pub const ALL: [ThemePreset; 4] = [
        ThemePreset::Aura,
        ThemePreset::Material,
        ThemePreset::Lara,
        ThemePreset::Nora,
    ];

    /// Canonical preset name.
    pub fn name(self) -> &'static str {
        match self {
            ThemePreset::Aura => "Aura",
            ThemePreset::Material => "Material",
            ThemePreset::Lara => "Lara",
            ThemePreset::Nora => "Nora",
        }
    }

    fn palette(self) -> &'static PresetPalette {
        match self {
            ThemePreset::Aura => &AURA,
            ThemePreset::Material => &MATERIAL,
            ThemePreset::Lara => &LARA,
            ThemePreset::Nora => &NORA,
        }
    }
}

impl fmt::Display for ThemePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemePreset {
    type Err = ConfigurationError;

    /// Parses a preset name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ThemePreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigurationError::UnknownPreset(s.to_string()))
    }
}

/// Strategy deciding when the dark palette is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectorValue", into = "String")]
pub enum DarkModeSelector {
    /// Follow the operating system preference.
    System,
    /// Dark mode is toggled by the application under the given selector name.
    Class(String),
    /// Always use the light palette.
    Disabled,
}

/// Profile form of the selector: a name, or `false` to disable dark mode.
#[derive(Deserialize)]
#[serde(untagged)]
enum SelectorValue {
    Flag(bool),
    Name(String),
}

impl From<SelectorValue> for DarkModeSelector {
    fn from(value: SelectorValue) -> Self {
        match value {
            SelectorValue::Flag(true) => DarkModeSelector::System,
            SelectorValue::Flag(false) => DarkModeSelector::Disabled,
            SelectorValue::Name(name) => DarkModeSelector::from(name),
        }
    }
}

impl From<String> for DarkModeSelector {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("system") {
            DarkModeSelector::System
        } else if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("false")
            || trimmed.eq_ignore_ascii_case("none")
        {
            DarkModeSelector::Disabled
        } else {
            DarkModeSelector::Class(trimmed.to_string())
        }
    }
}

impl From<DarkModeSelector> for String {
    fn from(value: DarkModeSelector) -> Self {
        match value {
            DarkModeSelector::System => "system".to_string(),
            DarkModeSelector::Class(selector) => selector,
            DarkModeSelector::Disabled => "none".to_string(),
        }
    }
}

/// Options applied alongside a preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ThemeOptions {
    /// Namespace for generated widget identifiers.
    pub prefix: String,
    pub dark_mode_selector: DarkModeSelector,
    /// When set, the preset only contributes its accent layer on top of the
    /// host's base visuals instead of replacing the surfaces.
    pub css_layer: bool,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            prefix: "p".to_string(),
            dark_mode_selector: DarkModeSelector::System,
            css_layer: false,
        }
    }
}

impl ThemeOptions {
    /// Returns `name` namespaced by the configured prefix, e.g. `p-datatable`.
    pub fn scoped_id(&self, name: &str) -> String {
        format!("{}-{}", self.prefix, name.to_ascii_lowercase())
    }

    /// Theme preference the host starts with.
    pub fn initial_preference(&self) -> egui::ThemePreference {
        match self.dark_mode_selector {
            DarkModeSelector::System => egui::ThemePreference::System,
            DarkModeSelector::Class(_) | DarkModeSelector::Disabled => egui::ThemePreference::Light,
        }
    }

    /// Whether the application may switch dark mode on and off itself.
    pub fn allows_manual_dark_mode(&self) -> bool {
        matches!(self.dark_mode_selector, DarkModeSelector::Class(_))
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.prefix.is_empty() || self.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigurationError::InvalidPrefix(self.prefix.clone()));
        }
        Ok(())
    }
}

/// Unresolved theme choice as it appears in a shell profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeSelection {
    pub preset: String,
    #[serde(default)]
    pub options: ThemeOptions,
}

impl Default for ThemeSelection {
    fn default() -> Self {
        Self {
            preset: ThemePreset::Aura.name().to_string(),
            options: ThemeOptions::default(),
        }
    }
}

impl ThemeSelection {
    pub fn new(preset: impl Into<String>, options: ThemeOptions) -> Self {
        Self {
            preset: preset.into(),
            options,
        }
    }

    /// Resolves the selection against the supported presets.
    pub fn resolve(&self) -> Result<ThemeConfiguration, ConfigurationError> {
        let preset: ThemePreset = self.preset.parse()?;
        self.options.validate()?;
        Ok(ThemeConfiguration {
            preset,
            options: self.options.clone(),
        })
    }
}

/// A resolved, immutable theme configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfiguration {
    preset: ThemePreset,
    options: ThemeOptions,
}

impl ThemeConfiguration {
    pub fn new(preset: ThemePreset, options: ThemeOptions) -> Result<Self, ConfigurationError> {
        options.validate()?;
        Ok(Self { preset, options })
    }

    pub fn preset(&self) -> ThemePreset {
        self.preset
    }

    pub fn options(&self) -> &ThemeOptions {
        &self.options
    }

    /// Color palette for the given mode.
    pub fn colors(&self, mode: egui::Theme) -> ThemeColors {
        self.preset.palette().colors(mode)
    }

    /// Builds egui visuals for the given mode.
    pub fn visuals(&self, mode: egui::Theme) -> egui::Visuals {
        let mut visuals = match mode {
            egui::Theme::Dark => egui::Visuals::dark(),
            egui::Theme::Light => egui::Visuals::light(),
        };
        let colors = self.colors(mode);
        if self.options.css_layer {
            apply_accents(&colors, &mut visuals);
        } else {
            apply_palette(&colors, &mut visuals);
        }
        visuals
    }

    /// Installs both palettes into the context and selects the initial mode.
    pub fn install(&self, ctx: &egui::Context) {
        ctx.set_visuals_of(egui::Theme::Dark, self.visuals(egui::Theme::Dark));
        ctx.set_visuals_of(egui::Theme::Light, self.visuals(egui::Theme::Light));
        ctx.set_theme(self.options.initial_preference());
    }
}

/// Color palette for one mode of a preset.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    // Surfaces
    pub background: Color32,
    pub panel_background: Color32,
    pub extreme_background: Color32,

    // Foreground
    pub text: Color32,
    pub text_dim: Color32,

    // Interactive
    pub primary: Color32,
    pub selection: Color32,
    pub hover: Color32,
    pub border: Color32,

    // Semantic (tags, status)
    pub success: Color32,
    pub info: Color32,
    pub warn: Color32,
    pub danger: Color32,
}

/// Static hex definition of a preset: primary color plus surface scales.
struct PresetPalette {
    primary_light: &'static str,
    primary_dark: &'static str,
    /// [background, panel, extreme, hover, border] for light mode
    surface_light: [&'static str; 5],
    /// [background, panel, extreme, hover, border] for dark mode
    surface_dark: [&'static str; 5],
}

impl PresetPalette {
    fn colors(&self, mode: egui::Theme) -> ThemeColors {
        let (primary, surface, text, text_dim) = match mode {
            egui::Theme::Light => (self.primary_light, &self.surface_light, "#18181b", "#71717a"),
            egui::Theme::Dark => (self.primary_dark, &self.surface_dark, "#fafafa", "#a1a1aa"),
        };
        let primary = hex_to_color32(primary);
        ThemeColors {
            background: hex_to_color32(surface[0]),
            panel_background: hex_to_color32(surface[1]),
            extreme_background: hex_to_color32(surface[2]),
            text: hex_to_color32(text),
            text_dim: hex_to_color32(text_dim),
            primary,
            selection: with_alpha(primary, 96),
            hover: hex_to_color32(surface[3]),
            border: hex_to_color32(surface[4]),
            success: hex_to_color32("#22c55e"),
            info: hex_to_color32("#0ea5e9"),
            warn: hex_to_color32("#f97316"),
            danger: hex_to_color32("#ef4444"),
        }
    }
}

// Emerald on zinc
const AURA: PresetPalette = PresetPalette {
    primary_light: "#10b981",
    primary_dark: "#34d399",
    surface_light: ["#ffffff", "#fafafa", "#f4f4f5", "#e4e4e7", "#d4d4d8"],
    surface_dark: ["#18181b", "#18181b", "#09090b", "#27272a", "#3f3f46"],
};

// Deep purple on neutral
const MATERIAL: PresetPalette = PresetPalette {
    primary_light: "#673ab7",
    primary_dark: "#b39ddb",
    surface_light: ["#ffffff", "#f5f5f5", "#eeeeee", "#e0e0e0", "#bdbdbd"],
    surface_dark: ["#121212", "#1e1e1e", "#0a0a0a", "#2c2c2c", "#424242"],
};

// Blue on slate
const LARA: PresetPalette = PresetPalette {
    primary_light: "#3b82f6",
    primary_dark: "#60a5fa",
    surface_light: ["#ffffff", "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1"],
    surface_dark: ["#0f172a", "#1e293b", "#020617", "#334155", "#475569"],
};

// Indigo on gray
const NORA: PresetPalette = PresetPalette {
    primary_light: "#4f46e5",
    primary_dark: "#818cf8",
    surface_light: ["#ffffff", "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db"],
    surface_dark: ["#111827", "#1f2937", "#030712", "#374151", "#4b5563"],
};

/// Overrides every surface, text and accent color.
fn apply_palette(colors: &ThemeColors, visuals: &mut egui::Visuals) {
    visuals.panel_fill = colors.panel_background;
    visuals.window_fill = colors.background;
    visuals.extreme_bg_color = colors.extreme_background;
    visuals.faint_bg_color = colors.hover;

    visuals.override_text_color = Some(colors.text);

    visuals.widgets.noninteractive.bg_fill = colors.panel_background;
    visuals.widgets.noninteractive.bg_stroke.color = colors.border;
    visuals.widgets.inactive.bg_fill = colors.hover;
    visuals.widgets.hovered.bg_fill = adjust_brightness(colors.hover, 1.1);

    apply_accents(colors, visuals);
}

/// Overrides only the accent layer: selection, active widgets, links and
/// semantic colors.
fn apply_accents(colors: &ThemeColors, visuals: &mut egui::Visuals) {
    visuals.selection.bg_fill = colors.selection;
    visuals.selection.stroke.color = colors.primary;
    visuals.widgets.active.bg_fill = colors.primary;
    visuals.hyperlink_color = colors.primary;
    visuals.error_fg_color = colors.danger;
    visuals.warn_fg_color = colors.warn;
}

/// Converts a hex color string (like "#282a36") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0) // Fallback to black
    }
}

/// Adjusts the brightness of a color by a factor (1.0 = no change, >1.0 = brighter, <1.0 = darker)
pub fn adjust_brightness(color: Color32, factor: f32) -> Color32 {
    let r = (color.r() as f32 * factor).min(255.0) as u8;
    let g = (color.g() as f32 * factor).min(255.0) as u8;
    let b = (color.b() as f32 * factor).min(255.0) as u8;
    Color32::from_rgb(r, g, b)
}

/// Sets the alpha channel of a color
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
