//! Plane overlays that follow surface detection

use perch_core::{AnchorId, Color, NodeId, Result, Transform};
use perch_scene::{Geometry, NodeDesc, SceneGraph};
use perch_tracking::PlaneAnchor;
use std::collections::HashMap;

/// Keeps one translucent overlay per detected plane in sync with the
/// plane's reported extent, and applies the shared visibility flag.
#[derive(Debug)]
pub struct OverlaySync {
    overlays: HashMap<AnchorId, NodeId>,
    visible: bool,
    color: Color,
}

/// Overlay planes are cards in local XY; this lays them flat on XZ
fn flat() -> glam::Quat {
    glam::Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)
}

fn overlay_geometry(plane: &PlaneAnchor) -> Geometry {
    Geometry::Plane {
        width: plane.width(),
        height: plane.depth(),
    }
}

impl OverlaySync {
    pub fn new(visible: bool, color: Color) -> Self {
        Self {
            overlays: HashMap::new(),
            visible,
            color,
        }
    }

    /// Create the overlay for a newly detected plane under its container.
    /// A plane that already has an overlay is updated instead.
    pub fn add(&mut self, plane: &PlaneAnchor, container: NodeId, scene: &mut SceneGraph) -> Result<NodeId> {
        if let Some(&existing) = self.overlays.get(&plane.id) {
            if scene.contains(existing) {
                self.update(plane, container, scene);
                return Ok(existing);
            }
        }

        let desc = NodeDesc::new(format!("overlay-{}", plane.id))
            .with_geometry(overlay_geometry(plane))
            .with_color(self.color)
            .with_visible(self.visible)
            .with_transform(Transform::from_position(plane.center).with_rotation(flat()));

        let node = scene.spawn(container, desc)?;
        self.overlays.insert(plane.id, node);
        log::debug!(
            "Overlay {} for plane {} ({} x {})",
            node,
            plane.id,
            plane.width(),
            plane.depth()
        );
        Ok(node)
    }

    /// Resize and recenter the overlay under `container` to match the plane.
    ///
    /// The overlay is expected to be the container's first child with plane
    /// geometry; anything else is left alone and reported as `false`.
    pub fn update(&self, plane: &PlaneAnchor, container: NodeId, scene: &mut SceneGraph) -> bool {
        let Some(child) = scene.first_child(container) else {
            log::trace!("Plane {} has no overlay to update", plane.id);
            return false;
        };
        if !matches!(scene.geometry(child), Some(Geometry::Plane { .. })) {
            log::trace!("First child of container {} is not an overlay", container);
            return false;
        }

        let updated = scene
            .set_geometry(child, overlay_geometry(plane))
            .and_then(|_| scene.set_position(child, plane.center));
        match updated {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Updating overlay {}: {}", child, e);
                false
            }
        }
    }

    /// Forget the overlay of a plane whose container is being removed.
    /// The node itself goes away with its container.
    pub fn forget(&mut self, anchor: AnchorId) -> Option<NodeId> {
        self.overlays.remove(&anchor)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide every overlay, current and future
    pub fn set_visibility(&mut self, visible: bool, scene: &mut SceneGraph) {
        self.visible = visible;
        for node in self.overlays.values() {
            if let Err(e) = scene.set_visible(*node, visible) {
                log::warn!("Setting visibility of overlay {}: {}", node, e);
            }
        }
    }

    /// Remove every overlay node. Returns how many were removed.
    pub fn clear(&mut self, scene: &mut SceneGraph) -> usize {
        let count = self.overlays.len();
        for (_, node) in self.overlays.drain() {
            let _ = scene.remove(node);
        }
        count
    }

    pub fn overlay(&self, anchor: AnchorId) -> Option<NodeId> {
        self.overlays.get(&anchor).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.overlays.values().copied()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perch_core::{Pose, Vec3};

    fn plane(extent: [f32; 2]) -> PlaneAnchor {
        PlaneAnchor {
            id: AnchorId::new(),
            pose: Pose::IDENTITY,
            center: Vec3::new(0.1, 0.0, -0.2),
            extent,
        }
    }

    fn setup() -> (SceneGraph, NodeId) {
        let mut scene = SceneGraph::new();
        let container = scene.spawn_empty(scene.root(), "anchor").unwrap();
        (scene, container)
    }

    #[test]
    fn test_add_lies_flat_with_extent() {
        let (mut scene, container) = setup();
        let mut overlays = OverlaySync::new(true, Color::BLUE.with_alpha(0.5));
        let plane = plane([1.0, 2.0]);

        let node = overlays.add(&plane, container, &mut scene).unwrap();

        assert_eq!(scene.parent(node), Some(container));
        assert_eq!(scene.geometry(node), Some(Geometry::Plane { width: 1.0, height: 2.0 }));
        assert_eq!(scene.color(node).map(|c| c.a), Some(0.5));
        let transform = scene.transform(node).unwrap();
        assert_eq!(transform.position, plane.center);
        let normal: Vec3 = (transform.quat() * glam::Vec3::Z).into();
        assert!((normal - Vec3::UP).length() < 1e-5);
    }

    #[test]
    fn test_duplicate_add_keeps_one_overlay() {
        let (mut scene, container) = setup();
        let mut overlays = OverlaySync::new(true, Color::BLUE);
        let mut plane = plane([1.0, 1.0]);

        let first = overlays.add(&plane, container, &mut scene).unwrap();
        plane.extent = [3.0, 3.0];
        let second = overlays.add(&plane, container, &mut scene).unwrap();

        assert_eq!(first, second);
        assert_eq!(overlays.len(), 1);
        assert_eq!(scene.geometry(first), Some(Geometry::Plane { width: 3.0, height: 3.0 }));
    }

    #[test]
    fn test_update_tracks_center_and_extent() {
        let (mut scene, container) = setup();
        let mut overlays = OverlaySync::new(true, Color::BLUE);
        let mut plane = plane([1.0, 1.0]);
        let node = overlays.add(&plane, container, &mut scene).unwrap();

        plane.center = Vec3::new(0.5, 0.0, 0.5);
        plane.extent = [2.5, 1.5];
        assert!(overlays.update(&plane, container, &mut scene));

        assert_eq!(scene.geometry(node), Some(Geometry::Plane { width: 2.5, height: 1.5 }));
        assert_eq!(scene.transform(node).unwrap().position, Vec3::new(0.5, 0.0, 0.5));
    }

    #[test]
    fn test_update_ignores_malformed_container() {
        let (mut scene, container) = setup();
        let overlays = OverlaySync::new(true, Color::BLUE);
        let plane = plane([1.0, 1.0]);

        // No children at all
        assert!(!overlays.update(&plane, container, &mut scene));

        // First child is not a plane
        let child = scene
            .spawn(container, NodeDesc::new("ball").with_geometry(Geometry::Sphere { radius: 0.1 }))
            .unwrap();
        assert!(!overlays.update(&plane, container, &mut scene));
        assert_eq!(scene.geometry(child), Some(Geometry::Sphere { radius: 0.1 }));
    }

    #[test]
    fn test_visibility_applies_to_existing_and_future() {
        let (mut scene, container) = setup();
        let mut overlays = OverlaySync::new(true, Color::BLUE);
        let before = overlays.add(&plane([1.0, 1.0]), container, &mut scene).unwrap();

        overlays.set_visibility(false, &mut scene);
        let other = scene.spawn_empty(scene.root(), "anchor2").unwrap();
        let after = overlays.add(&plane([1.0, 1.0]), other, &mut scene).unwrap();

        assert_eq!(scene.is_visible(before), Some(false));
        assert_eq!(scene.is_visible(after), Some(false));
        assert!(!overlays.is_visible());
    }

    #[test]
    fn test_clear_removes_nodes() {
        let (mut scene, container) = setup();
        let mut overlays = OverlaySync::new(true, Color::BLUE);
        let node = overlays.add(&plane([1.0, 1.0]), container, &mut scene).unwrap();

        assert_eq!(overlays.clear(&mut scene), 1);
        assert!(overlays.is_empty());
        assert!(!scene.contains(node));
        assert!(scene.contains(container));
    }
}
