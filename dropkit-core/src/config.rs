use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::placement::Placement;
use crate::position::{DEFAULT_OFFSET, VIEWPORT_MARGIN};
use crate::style::{Size, Variant};

fn default_true() -> bool {
    true
}

fn default_offset() -> f64 {
    DEFAULT_OFFSET
}

fn default_margin() -> f64 {
    VIEWPORT_MARGIN
}

/// Behavior and presentation settings for a dropdown.
///
/// Every field has a default, so a YAML document only needs the keys it
/// overrides:
///
/// ```yaml
/// placement: top-end
/// close_on_select: false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownConfig {
    #[serde(default)]
    pub placement: Placement,
    /// Gap between trigger and menu, in pixels
    #[serde(default = "default_offset")]
    pub offset: f64,
    /// Distance kept from the viewport edge when clamping, in pixels
    #[serde(default = "default_margin")]
    pub viewport_margin: f64,
    /// Close the menu after an item activates
    #[serde(default = "default_true")]
    pub close_on_select: bool,
    /// Append a chevron to the trigger
    #[serde(default = "default_true")]
    pub show_chevron: bool,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub variant: Variant,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            offset: DEFAULT_OFFSET,
            viewport_margin: VIEWPORT_MARGIN,
            close_on_select: true,
            show_chevron: true,
            size: Size::default(),
            variant: Variant::default(),
        }
    }
}

impl DropdownConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        info!(placement = %config.placement, "Loaded dropdown config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Err(ConfigError::InvalidOffset(self.offset));
        }
        if !self.viewport_margin.is_finite() || self.viewport_margin < 0.0 {
            return Err(ConfigError::InvalidMargin(self.viewport_margin));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = DropdownConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, DropdownConfig::default());
        assert_eq!(config.placement, Placement::BottomStart);
        assert_eq!(config.offset, 8.0);
        assert!(config.close_on_select);
        assert!(config.show_chevron);
    }

    #[test]
    fn test_overrides() {
        let config = DropdownConfig::from_yaml_str(
            "placement: top-end\nsize: lg\nvariant: ghost\nclose_on_select: false\noffset: 4\n",
        )
        .unwrap();
        assert_eq!(config.placement, Placement::TopEnd);
        assert_eq!(config.size, Size::Lg);
        assert_eq!(config.variant, Variant::Ghost);
        assert!(!config.close_on_select);
        assert_eq!(config.offset, 4.0);
    }

    #[test]
    fn test_unknown_placement_is_yaml_error() {
        let err = DropdownConfig::from_yaml_str("placement: sideways").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let err = DropdownConfig::from_yaml_str("offset: -2").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOffset(v) if v == -2.0));
    }

    #[test]
    fn test_yaml_round_trip_keeps_names() {
        let yaml = DropdownConfig::default().to_yaml_string().unwrap();
        assert!(yaml.contains("placement: bottom-start"));
        assert!(yaml.contains("variant: primary"));
    }
}
