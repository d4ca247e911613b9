//! Anchor-to-node bookkeeping

use perch_core::{AnchorId, NodeId, Result, Transform};
use perch_scene::{NodeDesc, SceneGraph};
use perch_tracking::TrackedAnchor;
use std::collections::HashMap;

/// Maps each tracked anchor to the container node that represents it.
///
/// Containers hang off the scene root and follow their anchor's pose;
/// overlays and image-attached objects are children of a container.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    containers: HashMap<AnchorId, NodeId>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Container for an anchor, created on first sight. Always re-posed to
    /// the anchor's latest pose. Returns the node and whether it is new.
    pub fn attach(&mut self, anchor: &TrackedAnchor, scene: &mut SceneGraph) -> Result<(NodeId, bool)> {
        let transform = Transform::from_pose(&anchor.pose());

        if let Some(&node) = self.containers.get(&anchor.id()) {
            if scene.contains(node) {
                scene.set_transform(node, transform)?;
                return Ok((node, false));
            }
            log::warn!("Container {} for anchor {} vanished, recreating", node, anchor.id());
        }

        let desc = NodeDesc::new(format!("anchor-{}", anchor.id())).with_transform(transform);
        let node = scene.spawn(scene.root(), desc)?;
        self.containers.insert(anchor.id(), node);
        log::debug!("Anchor {} ({:?}) -> container {}", anchor.id(), anchor.kind(), node);
        Ok((node, true))
    }

    /// Move a known anchor's container to the anchor's latest pose
    pub fn follow(&self, anchor: &TrackedAnchor, scene: &mut SceneGraph) -> Option<NodeId> {
        let node = self.container(anchor.id())?;
        match scene.set_transform(node, Transform::from_pose(&anchor.pose())) {
            Ok(()) => Some(node),
            Err(e) => {
                log::warn!("Following anchor {}: {}", anchor.id(), e);
                None
            }
        }
    }

    pub fn container(&self, anchor: AnchorId) -> Option<NodeId> {
        self.containers.get(&anchor).copied()
    }

    /// Forget an anchor and remove its container subtree
    pub fn remove(&mut self, anchor: AnchorId, scene: &mut SceneGraph) -> Option<NodeId> {
        let node = self.containers.remove(&anchor)?;
        if let Err(e) = scene.remove(node) {
            log::warn!("Removing container {} for anchor {}: {}", node, anchor, e);
        }
        Some(node)
    }

    pub fn anchors(&self) -> impl Iterator<Item = AnchorId> + '_ {
        self.containers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}
