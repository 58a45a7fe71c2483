//! Container configuration.
//!
//! [`ChipViewConfig`] starts from built-in defaults, can be overridden from a
//! TOML file, and is then adjusted through the container's setters.
//!
//! ```toml
//! chip_spacing = 12.0
//! line_spacing = 6.0
//! chip_text_size = 16.0
//! background_color = "#E0F2F1"
//! background_color_selected = "#009688"
//! tolerates_duplicates = true
//! ```
//!
//! Missing keys keep their defaults. Colors are `#RRGGBB` or `#RRGGBBAA`.

use std::path::Path;

use chipflow_core::logging::targets;
use chipflow_render::Color;
use serde::{Deserialize, Serialize};

use crate::error::{ChipError, Result};
use crate::resources::{DrawableId, LayoutId};

/// Default horizontal gap after each chip.
pub const DEFAULT_CHIP_SPACING: f32 = 8.0;
/// Default vertical gap below each chip.
pub const DEFAULT_LINE_SPACING: f32 = 8.0;
/// Default top and bottom padding inside the built-in pill.
pub const DEFAULT_CHIP_PADDING: f32 = 6.0;
/// Default left and right padding inside the built-in pill.
pub const DEFAULT_CHIP_SIDE_PADDING: f32 = 20.0;
/// Default corner radius of generated backgrounds.
pub const DEFAULT_CHIP_CORNER_RADIUS: f32 = 16.0;

/// Configuration of a [`ChipView`](crate::ChipView).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChipViewConfig {
    /// Horizontal gap after each chip, applied as its right margin.
    pub chip_spacing: f32,
    /// Vertical gap below each chip, applied as its bottom margin.
    pub line_spacing: f32,
    /// Top and bottom padding of the built-in pill.
    pub chip_padding: f32,
    /// Left and right padding of the built-in pill.
    pub chip_side_padding: f32,
    /// Corner radius of generated backgrounds.
    pub chip_corner_radius: f32,
    /// Label font size; `None` inherits the metrics' default size.
    pub chip_text_size: Option<f32>,
    /// Node template used when neither chip nor adapter picks one.
    pub default_layout: Option<LayoutId>,
    /// Background used when neither chip nor adapter picks one.
    pub default_background: Option<DrawableId>,
    /// Normal-state background color.
    #[serde(with = "hex_color")]
    pub background_color: Color,
    /// Pressed and focused background color.
    #[serde(with = "hex_color")]
    pub background_color_selected: Color,
    /// Whether the same chip may be added twice.
    pub tolerates_duplicates: bool,
    /// Whether chip backgrounds are drawn at all.
    pub renders_background: bool,
}

impl Default for ChipViewConfig {
    fn default() -> Self {
        Self {
            chip_spacing: DEFAULT_CHIP_SPACING,
            line_spacing: DEFAULT_LINE_SPACING,
            chip_padding: DEFAULT_CHIP_PADDING,
            chip_side_padding: DEFAULT_CHIP_SIDE_PADDING,
            chip_corner_radius: DEFAULT_CHIP_CORNER_RADIUS,
            chip_text_size: None,
            default_layout: None,
            default_background: None,
            background_color: Color::from_rgb8(0xCC, 0xCC, 0xCC),
            background_color_selected: Color::from_rgb8(0x99, 0x99, 0x99),
            tolerates_duplicates: false,
            renders_background: true,
        }
    }
}

impl ChipViewConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ChipError::config(None, e))
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ChipError::io(path, e))?;
        let config =
            toml::from_str(&content).map_err(|e| ChipError::config(Some(path.to_path_buf()), e))?;
        tracing::debug!(target: targets::VIEW, path = %path.display(), "loaded chip view configuration");
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ChipError::io(path, e))
    }

    /// Whether switching from `self` to `other` changes what gets drawn.
    ///
    /// Only the duplicate policy is excluded; it affects `add`, not output.
    pub fn affects_visuals(&self, other: &ChipViewConfig) -> bool {
        let mut other = other.clone();
        other.tolerates_duplicates = self.tolerates_duplicates;
        *self != other
    }
}

mod hex_color {
    use chipflow_render::Color;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid color '{s}', expected #RRGGBB or #RRGGBBAA")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChipViewConfig::default();
        assert_eq!(config.chip_spacing, 8.0);
        assert_eq!(config.line_spacing, 8.0);
        assert_eq!(config.chip_padding, 6.0);
        assert_eq!(config.chip_side_padding, 20.0);
        assert_eq!(config.chip_corner_radius, 16.0);
        assert_eq!(config.chip_text_size, None);
        assert_eq!(config.background_color.to_hex(), "#CCCCCC");
        assert_eq!(config.background_color_selected.to_hex(), "#999999");
        assert!(!config.tolerates_duplicates);
        assert!(config.renders_background);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ChipViewConfig::from_toml_str(
            r##"
chip_spacing = 12.0
background_color = "#E0F2F1"
default_layout = 3
"##,
        )
        .unwrap();

        assert_eq!(config.chip_spacing, 12.0);
        assert_eq!(config.line_spacing, DEFAULT_LINE_SPACING);
        assert_eq!(config.background_color.to_hex(), "#E0F2F1");
        assert_eq!(config.default_layout, Some(LayoutId(3)));
    }

    #[test]
    fn test_invalid_color_is_config_error() {
        let err = ChipViewConfig::from_toml_str(r#"background_color = "teal""#).unwrap_err();
        assert!(matches!(err, ChipError::Config { path: None, .. }));
        assert!(err.to_string().contains("teal"));
    }

    #[test]
    fn test_toml_text_survives_reparse() {
        let config = ChipViewConfig {
            chip_text_size: Some(18.0),
            default_background: Some(DrawableId(9)),
            background_color: Color::from_rgba8(0x11, 0x22, 0x33, 0x80),
            ..ChipViewConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("#11223380"));
        assert_eq!(ChipViewConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_affects_visuals() {
        let base = ChipViewConfig::default();
        let mut dup = base.clone();
        dup.tolerates_duplicates = true;
        assert!(!base.affects_visuals(&dup));

        let mut spaced = base.clone();
        spaced.chip_spacing = 2.0;
        assert!(base.affects_visuals(&spaced));
    }
}
