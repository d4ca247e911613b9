//! A deterministic, in-process tracking session
//!
//! Stands in for the platform session in tests and scripted replays. The
//! driver moves the camera and reports detected planes and images; the
//! session applies the same gating a real one would (planes only while
//! surface detection is on, images only for configured targets) and turns
//! everything into anchor events.

use crate::anchor::{ImageAnchor, ImageTarget, PlaneAnchor, TrackedAnchor};
use crate::event::{AnchorEvent, EventQueue};
use crate::ray::{Ray, Viewport};
use crate::session::{DetectionConfig, Hit, TrackingSession};
use perch_core::{AnchorId, Pose, ScreenPoint, Vec3};
use std::collections::BTreeMap;

pub struct SimulatedSession {
    viewport: Viewport,
    camera: Option<Pose>,
    config: DetectionConfig,
    planes: BTreeMap<AnchorId, PlaneAnchor>,
    images: BTreeMap<AnchorId, ImageAnchor>,
    events: EventQueue<AnchorEvent>,
    /// Number of `configure` calls received
    reconfigurations: usize,
}

impl Default for SimulatedSession {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl SimulatedSession {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            camera: None,
            config: DetectionConfig::none(),
            planes: BTreeMap::new(),
            images: BTreeMap::new(),
            events: EventQueue::new(),
            reconfigurations: 0,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn detection_config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn reconfigurations(&self) -> usize {
        self.reconfigurations
    }

    /// Report a tracked camera frame
    pub fn set_camera_pose(&mut self, pose: Pose) {
        self.camera = Some(pose);
    }

    /// Simulate tracking loss
    pub fn lose_tracking(&mut self) {
        self.camera = None;
    }

    /// Detect a new horizontal plane. Ignored while surface detection is off.
    pub fn detect_plane(&mut self, pose: Pose, center: Vec3, extent: [f32; 2]) -> Option<AnchorId> {
        if !self.config.surfaces {
            log::trace!("Surface detection disabled, dropping plane at {:?}", pose.position);
            return None;
        }

        let plane = PlaneAnchor {
            id: AnchorId::new(),
            pose,
            center,
            extent,
        };
        let id = plane.id;
        self.events.push(AnchorEvent::Added(TrackedAnchor::Plane(plane.clone())));
        self.planes.insert(id, plane);
        Some(id)
    }

    /// Refine a detected plane's geometry. Returns false for unknown anchors.
    pub fn refine_plane(&mut self, id: AnchorId, center: Vec3, extent: [f32; 2]) -> bool {
        let Some(plane) = self.planes.get_mut(&id) else {
            return false;
        };
        plane.center = center;
        plane.extent = extent;
        self.events.push(AnchorEvent::Updated(TrackedAnchor::Plane(plane.clone())));
        true
    }

    /// Recognize a reference image. Ignored unless the target is configured.
    pub fn detect_image(&mut self, target: &str, pose: Pose) -> Option<AnchorId> {
        let target: ImageTarget = self
            .config
            .images
            .iter()
            .find(|t| t.name == target)
            .cloned()?;

        let image = ImageAnchor {
            id: AnchorId::new(),
            pose,
            target,
        };
        let id = image.id;
        self.events.push(AnchorEvent::Added(TrackedAnchor::Image(image.clone())));
        self.images.insert(id, image);
        Some(id)
    }

    /// Drop an anchor of any kind. Returns false for unknown anchors.
    pub fn remove_anchor(&mut self, id: AnchorId) -> bool {
        let known = self.planes.remove(&id).is_some() || self.images.remove(&id).is_some();
        if known {
            self.events.push(AnchorEvent::Removed(id));
        }
        known
    }

    pub fn planes(&self) -> impl Iterator<Item = &PlaneAnchor> {
        self.planes.values()
    }

    pub fn anchor_count(&self) -> usize {
        self.planes.len() + self.images.len()
    }
}

impl TrackingSession for SimulatedSession {
    fn current_camera_pose(&self) -> Option<Pose> {
        self.camera
    }

    fn hit_test(&self, point: ScreenPoint) -> Vec<Hit> {
        let Some(camera) = self.camera else {
            return Vec::new();
        };

        let ray = Ray::from_screen(point, &self.viewport, &camera);
        let mut hits: Vec<Hit> = self
            .planes
            .values()
            .filter_map(|plane| {
                let (distance, position) = ray.intersect_plane(plane)?;
                Some(Hit {
                    pose: Pose {
                        position,
                        rotation: plane.pose.rotation,
                    },
                    distance,
                    anchor: Some(plane.id),
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn configure(&mut self, config: DetectionConfig) {
        log::debug!(
            "Detection reconfigured: surfaces={}, images={}",
            config.surfaces,
            config.images.len()
        );
        self.config = config;
        self.reconfigurations += 1;
    }

    fn drain_events(&mut self) -> Vec<AnchorEvent> {
        self.events.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_down() -> Pose {
        Pose::from_yaw_pitch(Vec3::new(0.0, 1.0, 0.0), 0.0, -45.0)
    }

    #[test]
    fn test_planes_gated_by_surface_detection() {
        let mut session = SimulatedSession::default();
        assert!(session.detect_plane(Pose::IDENTITY, Vec3::ZERO, [1.0, 1.0]).is_none());
        assert!(session.drain_events().is_empty());

        session.configure(DetectionConfig::surfaces());
        let id = session.detect_plane(Pose::IDENTITY, Vec3::ZERO, [1.0, 1.0]).unwrap();

        let events = session.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], AnchorEvent::Added(a) if a.id() == id));
    }

    #[test]
    fn test_images_gated_by_target_set() {
        let mut session = SimulatedSession::default();
        session.configure(DetectionConfig::images([ImageTarget::new("poster", 0.3)]));

        assert!(session.detect_image("menu", Pose::IDENTITY).is_none());
        let id = session.detect_image("poster", Pose::IDENTITY).unwrap();

        let events = session.drain_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            AnchorEvent::Added(TrackedAnchor::Image(image)) => {
                assert_eq!(image.id, id);
                assert_eq!(image.target.physical_width, 0.3);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_refine_and_remove_emit_events() {
        let mut session = SimulatedSession::default();
        session.configure(DetectionConfig::surfaces());
        let id = session.detect_plane(Pose::IDENTITY, Vec3::ZERO, [1.0, 1.0]).unwrap();
        session.drain_events();

        assert!(session.refine_plane(id, Vec3::new(0.1, 0.0, 0.0), [2.0, 1.5]));
        assert!(session.remove_anchor(id));
        assert!(!session.remove_anchor(id));
        assert!(!session.refine_plane(id, Vec3::ZERO, [1.0, 1.0]));

        let events = session.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], AnchorEvent::Updated(TrackedAnchor::Plane(p)) if p.extent == [2.0, 1.5]));
        assert_eq!(events[1], AnchorEvent::Removed(id));
    }

    #[test]
    fn test_hit_test_requires_camera() {
        let mut session = SimulatedSession::default();
        session.configure(DetectionConfig::surfaces());
        session.detect_plane(Pose::IDENTITY, Vec3::ZERO, [4.0, 4.0]);

        let center = session.viewport().center();
        assert!(session.hit_test(center).is_empty());

        session.set_camera_pose(looking_down());
        let hits = session.hit_test(center);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].pose.position - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    }

    #[test]
    fn test_hit_test_orders_nearest_first() {
        let mut session = SimulatedSession::default();
        session.configure(DetectionConfig::surfaces());
        let floor = session
            .detect_plane(Pose::IDENTITY, Vec3::ZERO, [4.0, 4.0])
            .unwrap();
        let table = session
            .detect_plane(Pose::from_position(Vec3::new(0.0, 0.5, 0.0)), Vec3::ZERO, [4.0, 4.0])
            .unwrap();
        session.set_camera_pose(looking_down());

        let hits = session.hit_test(session.viewport().center());
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].anchor, Some(table));
        assert_eq!(hits[1].anchor, Some(floor));
        assert!(hits[0].distance < hits[1].distance);
    }
}
