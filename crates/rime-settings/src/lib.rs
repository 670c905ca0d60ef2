//! rime-settings: per-application style settings for an ibus-rime front-end.
//!
//! Settings are merged from three layers: compiled-in defaults, the global
//! `style/*` section of the `ibus_rime` config, and an optional
//! `app_options/<app_id>/style/*` section. Results are cached per app id.
//!
//! This crate knows nothing about where the config lives. Concrete stores
//! implement [`ConfigProvider`]; `rime-settings-yaml` reads YAML files.

pub mod color;
mod current;
mod error;
mod memory;
mod path;
mod resolver;
mod source;

pub use color::ColorSchemeDefinition;
pub use current::{current_settings, deploy, load_settings, CurrentSettings};
pub use error::{SettingsError, SettingsResult};
pub use memory::{ConfigValue, MemoryConfigProvider, MemoryConfigSource, MemoryOpenError};
pub use path::ConfigPath;
pub use resolver::{resolve_from_source, SettingsResolver};
pub use source::{ConfigProvider, ConfigSource};

use serde::{Deserialize, Serialize};

/// Name of the config source holding front-end settings.
pub const DEFAULT_SOURCE_NAME: &str = "ibus_rime";

/// How the preedit (in-progress composition) is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreeditStyle {
    /// Show the raw composition.
    #[default]
    Composition,
    /// Show a preview of the selected candidate.
    Preview,
}

impl PreeditStyle {
    /// Exact match against the config spelling; anything else is `None`.
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "composition" => Some(Self::Composition),
            "preview" => Some(Self::Preview),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Composition => "composition",
            Self::Preview => "preview",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorType {
    #[default]
    Insert,
    Select,
}

impl CursorType {
    /// Exact match against the config spelling; anything else is `None`.
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "insert" => Some(Self::Insert),
            "select" => Some(Self::Select),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Select => "select",
        }
    }
}

/// Candidate list layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupTableOrientation {
    /// Let the input method framework decide.
    #[default]
    SystemDefault,
    Horizontal,
    Vertical,
}

impl LookupTableOrientation {
    /// Mapping for the `style/horizontal` flag. There is no config value that
    /// maps back to `SystemDefault`.
    pub fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

/// Fully resolved front-end settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub embed_preedit_text: bool,
    pub preedit_style: PreeditStyle,
    pub cursor_type: CursorType,
    pub lookup_table_orientation: LookupTableOrientation,
    /// `None` means the UI uses its own default colors.
    pub color_scheme: Option<&'static ColorSchemeDefinition>,
}

impl Settings {
    /// Compiled-in defaults every merge starts from.
    pub const DEFAULT: Settings = Settings {
        embed_preedit_text: true,
        preedit_style: PreeditStyle::Composition,
        cursor_type: CursorType::Insert,
        lookup_table_orientation: LookupTableOrientation::SystemDefault,
        color_scheme: None,
    };

    /// Id of the selected color scheme, if any.
    pub fn color_scheme_id(&self) -> Option<&'static str> {
        self.color_scheme.map(|scheme| scheme.id)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Config source opened on every cache miss.
    pub source_name: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            source_name: DEFAULT_SOURCE_NAME.to_string(),
        }
    }
}
