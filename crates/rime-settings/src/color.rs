//! Preset color schemes.
//!
//! The registry is a fixed table compiled into the binary. Settings refer to
//! entries by `&'static` reference; `None` means the UI should fall back to
//! its own palette (see [`COLOR_LIGHT`], [`COLOR_DARK`], [`COLOR_BLACK`]).

use serde::Serialize;

/// Fallback light color (0xRRGGBB) for UIs without a selected scheme.
pub const COLOR_LIGHT: u32 = 0xd4d4d4;
/// Fallback dark color (0xRRGGBB).
pub const COLOR_DARK: u32 = 0x606060;
/// Fallback black (0xRRGGBB).
pub const COLOR_BLACK: u32 = 0x000000;

/// A named pair of candidate-window colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorSchemeDefinition {
    pub id: &'static str,
    /// Text color, 0xRRGGBB.
    pub text_color: u32,
    /// Background color, 0xRRGGBB.
    pub back_color: u32,
}

impl ColorSchemeDefinition {
    pub const fn new(id: &'static str, text_color: u32, back_color: u32) -> Self {
        Self { id, text_color, back_color }
    }

    /// Text color split into `(r, g, b)`.
    pub fn text_rgb(&self) -> (u8, u8, u8) {
        split_rgb(self.text_color)
    }

    /// Background color split into `(r, g, b)`.
    pub fn back_rgb(&self) -> (u8, u8, u8) {
        split_rgb(self.back_color)
    }
}

static PRESET_COLOR_SCHEMES: [ColorSchemeDefinition; 4] = [
    ColorSchemeDefinition::new("aqua", 0xffffff, 0x0a3dfa),
    ColorSchemeDefinition::new("azure", 0xffffff, 0x0a3dea),
    ColorSchemeDefinition::new("ink", 0xffffff, 0x000000),
    ColorSchemeDefinition::new("luna", 0x000000, 0xffff7f),
];

/// Find a preset scheme by exact (case-sensitive) id.
pub fn lookup(id: &str) -> Option<&'static ColorSchemeDefinition> {
    if id.is_empty() {
        return None;
    }
    PRESET_COLOR_SCHEMES.iter().find(|scheme| scheme.id == id)
}

/// All preset schemes in registry order.
pub fn all() -> &'static [ColorSchemeDefinition] {
    &PRESET_COLOR_SCHEMES
}

/// Ids of all preset schemes in registry order.
pub fn ids() -> impl Iterator<Item = &'static str> {
    PRESET_COLOR_SCHEMES.iter().map(|scheme| scheme.id)
}

/// Split a 0xRRGGBB value into bytes. Bits above 24 are ignored.
pub fn split_rgb(color: u32) -> (u8, u8, u8) {
    (
        ((color >> 16) & 0xff) as u8,
        ((color >> 8) & 0xff) as u8,
        (color & 0xff) as u8,
    )
}

/// Format a 0xRRGGBB value as `#rrggbb`.
pub fn to_hex(color: u32) -> String {
    format!("#{:06x}", color & 0x00ff_ffff)
}
