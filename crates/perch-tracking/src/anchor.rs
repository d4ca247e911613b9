//! Anchors reported by a tracking session

use perch_core::{AnchorId, Pose, Vec3};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Which kind of anchor an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    Plane,
    Image,
}

/// A reference image the session can be asked to recognize.
///
/// Targets are identified by name alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageTarget {
    pub name: String,
    /// Printed width of the image in meters
    #[serde(default = "default_physical_width")]
    pub physical_width: f32,
}

fn default_physical_width() -> f32 {
    0.1
}

impl ImageTarget {
    pub fn new(name: impl Into<String>, physical_width: f32) -> Self {
        Self {
            name: name.into(),
            physical_width,
        }
    }
}

impl PartialEq for ImageTarget {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ImageTarget {}

impl Hash for ImageTarget {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for ImageTarget {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ImageTarget {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// A detected horizontal surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneAnchor {
    pub id: AnchorId,
    pub pose: Pose,
    /// Center of the detected extent, in the anchor's local frame
    pub center: Vec3,
    /// Width along local X and depth along local Z
    pub extent: [f32; 2],
}

impl PlaneAnchor {
    pub fn width(&self) -> f32 {
        self.extent[0]
    }

    pub fn depth(&self) -> f32 {
        self.extent[1]
    }

    /// Whether a local-frame point on the plane lies inside the extent
    pub fn contains_local(&self, p: Vec3) -> bool {
        (p.x - self.center.x).abs() <= self.width() * 0.5
            && (p.z - self.center.z).abs() <= self.depth() * 0.5
    }
}

/// A recognized reference image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnchor {
    pub id: AnchorId,
    pub pose: Pose,
    pub target: ImageTarget,
}

/// Any anchor the placement core reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackedAnchor {
    Plane(PlaneAnchor),
    Image(ImageAnchor),
}

impl TrackedAnchor {
    pub fn id(&self) -> AnchorId {
        match self {
            TrackedAnchor::Plane(plane) => plane.id,
            TrackedAnchor::Image(image) => image.id,
        }
    }

    pub fn pose(&self) -> Pose {
        match self {
            TrackedAnchor::Plane(plane) => plane.pose,
            TrackedAnchor::Image(image) => image.pose,
        }
    }

    pub fn kind(&self) -> AnchorKind {
        match self {
            TrackedAnchor::Plane(_) => AnchorKind::Plane,
            TrackedAnchor::Image(_) => AnchorKind::Image,
        }
    }
}
