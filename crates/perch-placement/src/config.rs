//! Layered placement configuration
//!
//! Config is loaded with four layers of precedence (highest wins):
//! 1. Environment variables: `PERCH_FREEFORM_DISTANCE`, `PERCH_STAMP_SPACING`, `PERCH_SHOW_OVERLAYS`
//! 2. Project-local: `.perch/config.toml`
//! 3. Global: `~/.perch/config.toml`
//! 4. Built-in defaults

use perch_core::{Color, PerchError, Result};
use perch_tracking::ImageTarget;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file structure. Every field is optional so files can be layered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PlacementConfigFile {
    #[serde(default)]
    placement: PlacementSection,
    #[serde(default)]
    overlay: OverlaySection,
    #[serde(default, rename = "image_target")]
    image_targets: Vec<ImageTarget>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PlacementSection {
    freeform_distance: Option<f32>,
    stamp_spacing: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct OverlaySection {
    visible: Option<bool>,
    color: Option<Color>,
}

/// Resolved placement configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementConfig {
    /// How far in front of the camera freeform placement puts objects
    pub freeform_distance: f32,
    /// Minimum screen distance between stamped clones while dragging
    pub stamp_spacing: f32,
    /// Initial overlay visibility
    pub show_overlays: bool,
    pub overlay_color: Color,
    /// Reference images recognized in image mode
    pub image_targets: Vec<ImageTarget>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            freeform_distance: 0.2,
            stamp_spacing: 80.0,
            show_overlays: true,
            overlay_color: Color::new(0.0, 0.48, 1.0, 0.5),
            image_targets: Vec::new(),
        }
    }
}

impl PlacementConfig {
    /// Load config with layered precedence: defaults < global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Layer 1: Global config (~/.perch/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::load_file(&global_path)?);
            }
        }

        // Layer 2: Project-local config (.perch/config.toml)
        let local_path = PathBuf::from(".perch/config.toml");
        if local_path.exists() {
            config.merge(Self::load_file(&local_path)?);
        }

        // Layer 3: Environment variable overrides
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        log::debug!("Placement config: {:?}", config);
        Ok(config)
    }

    /// Load config from a specific file on top of the defaults, then env vars
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge(Self::load_file(path)?);
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse config text on top of the defaults, without env vars
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: PlacementConfigFile = toml::from_str(content)?;
        let mut config = Self::default();
        config.merge(file);
        config.validate()?;
        Ok(config)
    }

    pub fn with_image_target(mut self, target: ImageTarget) -> Self {
        self.image_targets.push(target);
        self
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".perch").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<PlacementConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            PerchError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge(&mut self, overlay: PlacementConfigFile) {
        if let Some(distance) = overlay.placement.freeform_distance {
            self.freeform_distance = distance;
        }
        if let Some(spacing) = overlay.placement.stamp_spacing {
            self.stamp_spacing = spacing;
        }
        if let Some(visible) = overlay.overlay.visible {
            self.show_overlays = visible;
        }
        if let Some(color) = overlay.overlay.color {
            self.overlay_color = color;
        }
        for target in overlay.image_targets {
            self.image_targets.retain(|t| t != &target);
            self.image_targets.push(target);
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup("PERCH_FREEFORM_DISTANCE") {
            self.freeform_distance = parse_env("PERCH_FREEFORM_DISTANCE", &value)?;
        }
        if let Some(value) = lookup("PERCH_STAMP_SPACING") {
            self.stamp_spacing = parse_env("PERCH_STAMP_SPACING", &value)?;
        }
        if let Some(value) = lookup("PERCH_SHOW_OVERLAYS") {
            self.show_overlays = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(PerchError::ConfigError(format!(
                        "PERCH_SHOW_OVERLAYS: expected a boolean, got '{}'",
                        value
                    )))
                }
            };
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(self.freeform_distance > 0.0) {
            return Err(PerchError::ConfigError(format!(
                "freeform_distance must be positive, got {}",
                self.freeform_distance
            )));
        }
        if !(self.stamp_spacing >= 0.0) {
            return Err(PerchError::ConfigError(format!(
                "stamp_spacing must not be negative, got {}",
                self.stamp_spacing
            )));
        }
        Ok(())
    }
}

fn parse_env(key: &str, value: &str) -> Result<f32> {
    value
        .trim()
        .parse()
        .map_err(|_| PerchError::ConfigError(format!("{}: expected a number, got '{}'", key, value)))
}
