//! Events the session reports back to its host

use crate::mode::PlacementMode;
use crate::placed::PlacementSource;
use perch_core::{AnchorId, NodeId, Vec3};
use serde::Serialize;

/// Something observable happened to the session's scene or state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    ModeChanged {
        from: PlacementMode,
        to: PlacementMode,
    },
    DetectionReconfigured {
        surfaces: bool,
        images: Vec<String>,
    },
    ObjectPlaced {
        node: NodeId,
        template: String,
        source: PlacementSource,
        position: Vec3,
    },
    ObjectRemoved {
        node: NodeId,
        template: String,
    },
    OverlayAdded {
        anchor: AnchorId,
        node: NodeId,
    },
    OverlayUpdated {
        anchor: AnchorId,
        width: f32,
        depth: f32,
    },
    OverlayRemoved {
        anchor: AnchorId,
        node: NodeId,
    },
    SceneReset {
        objects: usize,
        overlays: usize,
    },
}
