//! Placement mode and the detectors each mode needs

use perch_core::PerchError;
use perch_tracking::{DetectionConfig, ImageTarget, TrackingSession};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How new objects get positioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// In front of the camera, on press
    #[default]
    Freeform,
    /// On detected surfaces under the finger, stamping while dragging
    Surface,
    /// Attached to recognized reference images; gestures do nothing
    Image,
}

impl fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlacementMode::Freeform => "freeform",
            PlacementMode::Surface => "surface",
            PlacementMode::Image => "image",
        };
        f.write_str(name)
    }
}

impl FromStr for PlacementMode {
    type Err = PerchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freeform" => Ok(PlacementMode::Freeform),
            "surface" | "plane" => Ok(PlacementMode::Surface),
            "image" => Ok(PlacementMode::Image),
            other => Err(PerchError::ConfigError(format!(
                "unknown placement mode '{}'; valid values: freeform, surface, image",
                other
            ))),
        }
    }
}

/// Record of an actual mode change
#[derive(Debug, Clone, PartialEq)]
pub struct ModeTransition {
    pub from: PlacementMode,
    pub to: PlacementMode,
    pub detection: DetectionConfig,
}

/// Holds the active mode and keeps the tracking session's detectors in step.
///
/// Surface and image detection are never enabled together.
#[derive(Debug, Clone)]
pub struct ModeController {
    mode: PlacementMode,
    image_targets: Vec<ImageTarget>,
}

impl ModeController {
    pub fn new(image_targets: Vec<ImageTarget>) -> Self {
        Self {
            mode: PlacementMode::default(),
            image_targets,
        }
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    pub fn image_targets(&self) -> &[ImageTarget] {
        &self.image_targets
    }

    /// Detectors a given mode runs
    pub fn detection_for(&self, mode: PlacementMode) -> DetectionConfig {
        match mode {
            PlacementMode::Freeform => DetectionConfig::none(),
            PlacementMode::Surface => DetectionConfig::surfaces(),
            PlacementMode::Image => DetectionConfig::images(self.image_targets.iter().cloned()),
        }
    }

    /// Push the current mode's detectors to the session unconditionally
    pub fn apply<T: TrackingSession + ?Sized>(&self, tracking: &mut T) -> DetectionConfig {
        let detection = self.detection_for(self.mode);
        tracking.configure(detection.clone());
        detection
    }

    /// Switch modes. Reconfigures the session only when the mode changes.
    pub fn set_mode<T: TrackingSession + ?Sized>(
        &mut self,
        mode: PlacementMode,
        tracking: &mut T,
    ) -> Option<ModeTransition> {
        if mode == self.mode {
            log::trace!("Mode already {}, nothing to reconfigure", mode);
            return None;
        }

        let from = self.mode;
        self.mode = mode;
        let detection = self.apply(tracking);
        log::debug!("Placement mode {} -> {}", from, mode);

        Some(ModeTransition {
            from,
            to: mode,
            detection,
        })
    }
}
