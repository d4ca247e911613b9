//! The tracking session contract

use crate::anchor::ImageTarget;
use crate::event::AnchorEvent;
use perch_core::{AnchorId, Pose, ScreenPoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which detectors the session should run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionConfig {
    pub surfaces: bool,
    #[serde(default)]
    pub images: BTreeSet<ImageTarget>,
}

impl DetectionConfig {
    /// Camera tracking only
    pub fn none() -> Self {
        Self::default()
    }

    /// Horizontal surface detection only
    pub fn surfaces() -> Self {
        Self {
            surfaces: true,
            images: BTreeSet::new(),
        }
    }

    /// Image recognition only, for the given targets
    pub fn images(targets: impl IntoIterator<Item = ImageTarget>) -> Self {
        Self {
            surfaces: false,
            images: targets.into_iter().collect(),
        }
    }

    pub fn detects_image(&self, name: &str) -> bool {
        self.images.iter().any(|t| t.name == name)
    }
}

/// A hit-test result against a detected surface
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// World pose of the intersection, oriented like the surface
    pub pose: Pose,
    /// Distance from the camera along the ray
    pub distance: f32,
    pub anchor: Option<AnchorId>,
}

/// A platform tracking session.
///
/// Implementations own their own pipeline; the placement core only calls
/// these methods from its single owner.
pub trait TrackingSession {
    /// Current camera pose, `None` until the first tracked frame
    fn current_camera_pose(&self) -> Option<Pose>;

    /// Hit-test detected surfaces at a screen point, nearest first
    fn hit_test(&self, point: ScreenPoint) -> Vec<Hit>;

    /// Replace the active detector set. Fire-and-forget.
    fn configure(&mut self, config: DetectionConfig);

    /// Anchor events produced since the last call
    fn drain_events(&mut self) -> Vec<AnchorEvent>;
}
