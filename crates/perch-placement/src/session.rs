//! ArSession - the placement core's single owner of session state

use crate::config::PlacementConfig;
use crate::event::SessionEvent;
use crate::mode::{ModeController, PlacementMode};
use crate::overlay::OverlaySync;
use crate::placed::{PlacedObject, PlacedObjects, PlacementSource};
use crate::placement::{Placement, PlacementEngine};
use crate::registry::AnchorRegistry;
use perch_core::{AnchorId, NodeId, ScreenPoint, Transform, Vec3};
use perch_scene::{NodeDesc, ObjectTemplate, SceneGraph};
use perch_tracking::{AnchorEvent, DetectionConfig, EventQueue, TrackedAnchor, TrackingSession};
use std::sync::Arc;

/// One AR session: the tracking session, the scene, and everything the
/// user has selected and placed.
///
/// Every gesture and anchor callback takes `&mut self`, so all scene and
/// sequence mutation is serialized through this owner. Hosts that receive
/// tracking callbacks on another thread wrap the session in a mutex.
///
/// None of the callbacks fail. Missing template, missing camera frame, an
/// empty hit-test or an unexpected node layout all resolve to a no-op.
pub struct ArSession<T: TrackingSession> {
    tracking: T,
    scene: SceneGraph,
    config: PlacementConfig,
    modes: ModeController,
    engine: PlacementEngine,
    anchors: AnchorRegistry,
    overlays: OverlaySync,
    placed: PlacedObjects,
    selected: Option<Arc<dyn ObjectTemplate>>,
    events: EventQueue<SessionEvent>,
}

fn reconfigured(detection: &DetectionConfig) -> SessionEvent {
    SessionEvent::DetectionReconfigured {
        surfaces: detection.surfaces,
        images: detection.images.iter().map(|t| t.name.clone()).collect(),
    }
}

impl<T: TrackingSession> ArSession<T> {
    /// Start a session in freeform mode and push its detector set to the tracker
    pub fn new(tracking: T, config: PlacementConfig) -> Self {
        let mut session = Self {
            tracking,
            scene: SceneGraph::new(),
            modes: ModeController::new(config.image_targets.clone()),
            engine: PlacementEngine::new(&config),
            anchors: AnchorRegistry::new(),
            overlays: OverlaySync::new(config.show_overlays, config.overlay_color),
            placed: PlacedObjects::new(),
            selected: None,
            events: EventQueue::new(),
            config,
        };

        let detection = session.modes.apply(&mut session.tracking);
        session.events.push(reconfigured(&detection));
        session
    }

    pub fn tracking(&self) -> &T {
        &self.tracking
    }

    pub fn tracking_mut(&mut self) -> &mut T {
        &mut self.tracking
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn mode(&self) -> PlacementMode {
        self.modes.mode()
    }

    pub fn selected_template(&self) -> Option<&Arc<dyn ObjectTemplate>> {
        self.selected.as_ref()
    }

    /// Placed objects, oldest first
    pub fn placed(&self) -> &[PlacedObject] {
        self.placed.as_slice()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn overlay_node(&self, anchor: AnchorId) -> Option<NodeId> {
        self.overlays.overlay(anchor)
    }

    pub fn overlay_nodes(&self) -> Vec<NodeId> {
        self.overlays.nodes().collect()
    }

    pub fn overlays_visible(&self) -> bool {
        self.overlays.is_visible()
    }

    pub fn container_node(&self, anchor: AnchorId) -> Option<NodeId> {
        self.anchors.container(anchor)
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    /// Choose what the next placement clones. `None` disables placement.
    pub fn select_template(&mut self, template: Option<Arc<dyn ObjectTemplate>>) {
        match &template {
            Some(t) => log::debug!("Selected template '{}'", t.name()),
            None => log::debug!("Template selection cleared"),
        }
        self.selected = template;
    }

    /// Switch placement mode. Returns whether the mode actually changed.
    pub fn set_mode(&mut self, mode: PlacementMode) -> bool {
        let Some(transition) = self.modes.set_mode(mode, &mut self.tracking) else {
            return false;
        };

        self.engine.on_interaction_end();
        self.events.push(SessionEvent::ModeChanged {
            from: transition.from,
            to: transition.to,
        });
        self.events.push(reconfigured(&transition.detection));
        true
    }

    /// Show or hide all plane overlays, including ones detected later
    pub fn set_overlay_visibility(&mut self, visible: bool) {
        self.overlays.set_visibility(visible, &mut self.scene);
    }

    /// Press at a screen point
    pub fn on_interaction_start(&mut self, point: ScreenPoint) -> Option<NodeId> {
        if self.selected.is_none() {
            log::trace!("No template selected, ignoring press");
            return None;
        }
        let placement = self
            .engine
            .on_interaction_start(point, self.modes.mode(), &self.tracking)?;
        self.commit(placement)
    }

    /// Drag to a screen point
    pub fn on_interaction_move(&mut self, point: ScreenPoint) -> Option<NodeId> {
        if self.selected.is_none() {
            return None;
        }
        let placement = self
            .engine
            .on_interaction_move(point, self.modes.mode(), &self.tracking)?;
        self.commit(placement)
    }

    /// Release
    pub fn on_interaction_end(&mut self) {
        self.engine.on_interaction_end();
    }

    fn commit(&mut self, placement: Placement) -> Option<NodeId> {
        let template = self.selected.clone()?;
        let mut desc = template.instantiate();
        desc.transform =
            Transform::from_matrix(&(placement.pose.to_matrix() * desc.transform.to_matrix()));

        if let Some(anchor) = placement.anchor {
            log::trace!("Placement landed on surface {}", anchor);
        }
        let root = self.scene.root();
        self.place(root, desc, template.name(), placement.source, None)
    }

    fn place(
        &mut self,
        parent: NodeId,
        desc: NodeDesc,
        template: &str,
        source: PlacementSource,
        anchor: Option<AnchorId>,
    ) -> Option<NodeId> {
        let node = match self.scene.spawn(parent, desc) {
            Ok(node) => node,
            Err(e) => {
                log::warn!("Placing '{}' under {}: {}", template, parent, e);
                return None;
            }
        };

        let position = self.scene.world_position(node).unwrap_or(Vec3::ZERO);
        log::debug!(
            "Placed '{}' as {} at ({:.3}, {:.3}, {:.3}) [{:?}]",
            template,
            node,
            position.x,
            position.y,
            position.z,
            source
        );

        self.placed.push(PlacedObject {
            node,
            template: template.to_string(),
            source,
            anchor,
        });
        self.events.push(SessionEvent::ObjectPlaced {
            node,
            template: template.to_string(),
            source,
            position,
        });
        Some(node)
    }

    /// A tracking anchor appeared. Planes get an overlay; images get a clone
    /// of the selected template. Returns the anchor's container node.
    pub fn on_anchor_added(&mut self, anchor: &TrackedAnchor) -> Option<NodeId> {
        let (container, created) = match self.anchors.attach(anchor, &mut self.scene) {
            Ok(attached) => attached,
            Err(e) => {
                log::warn!("Attaching anchor {}: {}", anchor.id(), e);
                return None;
            }
        };

        match anchor {
            TrackedAnchor::Plane(plane) => {
                let known = self.overlays.overlay(plane.id).is_some();
                match self.overlays.add(plane, container, &mut self.scene) {
                    Ok(node) if !known => self.events.push(SessionEvent::OverlayAdded {
                        anchor: plane.id,
                        node,
                    }),
                    Ok(_) => self.events.push(SessionEvent::OverlayUpdated {
                        anchor: plane.id,
                        width: plane.width(),
                        depth: plane.depth(),
                    }),
                    Err(e) => log::warn!("Overlay for plane {}: {}", plane.id, e),
                }
            }
            TrackedAnchor::Image(image) => {
                if !created {
                    log::trace!("Image {} already attached", image.id);
                } else if let Some(template) = self.selected.clone() {
                    log::debug!("Recognized image '{}'", image.target.name);
                    self.place(
                        container,
                        template.instantiate(),
                        template.name(),
                        PlacementSource::Image,
                        Some(image.id),
                    );
                } else {
                    log::trace!("Image '{}' recognized with no template selected", image.target.name);
                }
            }
        }

        Some(container)
    }

    /// A tracked anchor moved or was refined
    pub fn on_anchor_updated(&mut self, anchor: &TrackedAnchor) {
        let Some(container) = self.anchors.follow(anchor, &mut self.scene) else {
            log::trace!("Update for unknown anchor {}", anchor.id());
            return;
        };

        if let TrackedAnchor::Plane(plane) = anchor {
            if self.overlays.update(plane, container, &mut self.scene) {
                self.events.push(SessionEvent::OverlayUpdated {
                    anchor: plane.id,
                    width: plane.width(),
                    depth: plane.depth(),
                });
            }
        }
    }

    /// A tracked anchor is gone; its overlay and attached objects go with it
    pub fn on_anchor_removed(&mut self, anchor: AnchorId) {
        if self.anchors.container(anchor).is_none() {
            log::trace!("Removal of unknown anchor {}", anchor);
            return;
        }

        if let Some(node) = self.overlays.forget(anchor) {
            self.events.push(SessionEvent::OverlayRemoved { anchor, node });
        }
        for object in self.placed.take_anchored(anchor) {
            self.events.push(SessionEvent::ObjectRemoved {
                node: object.node,
                template: object.template,
            });
        }
        self.anchors.remove(anchor, &mut self.scene);
    }

    /// Dispatch every pending anchor event from the tracking session.
    /// Returns how many were handled.
    pub fn pump_tracking(&mut self) -> usize {
        let events = self.tracking.drain_events();
        let count = events.len();
        for event in events {
            match event {
                AnchorEvent::Added(anchor) => {
                    self.on_anchor_added(&anchor);
                }
                AnchorEvent::Updated(anchor) => self.on_anchor_updated(&anchor),
                AnchorEvent::Removed(id) => self.on_anchor_removed(id),
            }
        }
        count
    }

    /// Remove the most recently placed object, if any
    pub fn undo_last_object(&mut self) -> Option<PlacedObject> {
        let object = self.placed.pop()?;
        if let Err(e) = self.scene.remove(object.node) {
            log::warn!("Undo of {}: {}", object.node, e);
        }
        self.events.push(SessionEvent::ObjectRemoved {
            node: object.node,
            template: object.template.clone(),
        });
        Some(object)
    }

    /// Remove every placed object and overlay. Tracking keeps running and
    /// anchors stay registered.
    pub fn reset_scene(&mut self) {
        let objects = self.placed.take_all();
        for object in objects.iter().rev() {
            let _ = self.scene.remove(object.node);
        }
        let overlays = self.overlays.clear(&mut self.scene);
        self.engine.on_interaction_end();

        log::info!("Scene reset: {} objects, {} overlays removed", objects.len(), overlays);
        self.events.push(SessionEvent::SceneReset {
            objects: objects.len(),
            overlays,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubTracking;
    use perch_core::Pose;
    use perch_scene::{Geometry, ModelTemplate};
    use perch_tracking::{ImageAnchor, ImageTarget, PlaneAnchor, SimulatedSession};

    fn template(name: &str) -> Arc<dyn ObjectTemplate> {
        Arc::new(ModelTemplate::new(name, Geometry::Sphere { radius: 0.05 }))
    }

    fn plane(extent: [f32; 2]) -> PlaneAnchor {
        PlaneAnchor {
            id: AnchorId::new(),
            pose: Pose::IDENTITY,
            center: Vec3::ZERO,
            extent,
        }
    }

    fn image() -> ImageAnchor {
        ImageAnchor {
            id: AnchorId::new(),
            pose: Pose::from_position(Vec3::new(0.0, 1.0, -1.0)),
            target: ImageTarget::new("poster", 0.3),
        }
    }

    fn position_of(session: &ArSession<StubTracking>, node: NodeId) -> Vec3 {
        session.scene().transform(node).unwrap().position
    }

    #[test]
    fn test_initial_detection_applied_once() {
        let session = ArSession::new(StubTracking::new(), PlacementConfig::default());
        assert_eq!(session.mode(), PlacementMode::Freeform);
        assert_eq!(session.tracking().configs, vec![DetectionConfig::none()]);
    }

    #[test]
    fn test_surface_stamp_scenario() {
        let tracking = StubTracking::new().with_hit_at(Vec3::new(1.0, 0.0, 2.0));
        let mut session = ArSession::new(tracking, PlacementConfig::default());
        assert!(session.set_mode(PlacementMode::Surface));
        session.select_template(Some(template("A")));

        let first = session.on_interaction_start(ScreenPoint::new(100.0, 100.0)).unwrap();
        assert_eq!(session.placed().len(), 1);
        assert_eq!(position_of(&session, first), Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(session.placed()[0].template, "A");

        // 90 away from the last stamp
        assert!(session.on_interaction_move(ScreenPoint::new(100.0, 190.0)).is_some());
        assert_eq!(session.placed().len(), 2);

        // 5 away from the last stamp
        assert!(session.on_interaction_move(ScreenPoint::new(100.0, 195.0)).is_none());
        assert_eq!(session.placed().len(), 2);
        assert!(session.placed().iter().all(|p| p.source == PlacementSource::Surface));
    }

    #[test]
    fn test_no_template_places_nothing() {
        let tracking = StubTracking::new()
            .with_camera(Pose::IDENTITY)
            .with_hit_at(Vec3::ZERO);
        let mut session = ArSession::new(tracking, PlacementConfig::default());
        let nodes_before = session.scene().node_count();

        for i in 0..5 {
            assert!(session
                .on_interaction_start(ScreenPoint::new(i as f32 * 100.0, 0.0))
                .is_none());
        }

        assert_eq!(session.scene().node_count(), nodes_before);
        assert!(session.placed().is_empty());
    }

    #[test]
    fn test_freeform_places_clone_in_front_of_camera() {
        let camera = Pose::from_yaw_pitch(Vec3::new(0.0, 1.5, 0.0), 0.0, 0.0);
        let mut session = ArSession::new(
            StubTracking::new().with_camera(camera),
            PlacementConfig::default(),
        );
        session.select_template(Some(template("cup")));

        let node = session.on_interaction_start(ScreenPoint::new(0.0, 0.0)).unwrap();
        assert!((position_of(&session, node) - Vec3::new(0.0, 1.5, -0.2)).length() < 1e-5);
        assert_eq!(session.scene().parent(node), Some(session.scene().root()));
    }

    #[test]
    fn test_clones_are_independent_nodes() {
        let tracking = StubTracking::new().with_hit_at(Vec3::ZERO);
        let mut session = ArSession::new(tracking, PlacementConfig::default());
        session.set_mode(PlacementMode::Surface);
        session.select_template(Some(template("A")));

        let a = session.on_interaction_start(ScreenPoint::new(0.0, 0.0)).unwrap();
        session.on_interaction_end();
        let b = session.on_interaction_start(ScreenPoint::new(0.0, 0.0)).unwrap();

        assert_ne!(a, b);
        assert_ne!(session.scene().first_child(a), session.scene().first_child(b));
    }

    #[test]
    fn test_distinct_planes_get_one_overlay_each() {
        let mut session = ArSession::new(StubTracking::new(), PlacementConfig::default());
        let planes: Vec<PlaneAnchor> = (0..4).map(|_| plane([1.0, 1.0])).collect();

        for (i, p) in planes.iter().enumerate() {
            session.on_anchor_added(&TrackedAnchor::Plane(p.clone()));
            assert_eq!(session.overlay_count(), i + 1);
        }

        // Re-adding a known plane does not duplicate its overlay
        session.on_anchor_added(&TrackedAnchor::Plane(planes[0].clone()));
        assert_eq!(session.overlay_count(), 4);
    }

    #[test]
    fn test_overlay_visibility_applies_before_and_after() {
        let mut session = ArSession::new(StubTracking::new(), PlacementConfig::default());
        let early = plane([1.0, 1.0]);
        session.on_anchor_added(&TrackedAnchor::Plane(early.clone()));

        session.set_overlay_visibility(false);
        let late = plane([2.0, 2.0]);
        session.on_anchor_added(&TrackedAnchor::Plane(late.clone()));

        for anchor in [early.id, late.id] {
            let node = session.overlay_node(anchor).unwrap();
            assert_eq!(session.scene().is_visible(node), Some(false));
        }

        session.set_overlay_visibility(true);
        for node in session.overlay_nodes() {
            assert_eq!(session.scene().is_visible(node), Some(true));
        }
    }

    #[test]
    fn test_plane_update_resizes_overlay() {
        let mut session = ArSession::new(StubTracking::new(), PlacementConfig::default());
        let mut p = plane([1.0, 1.0]);
        session.on_anchor_added(&TrackedAnchor::Plane(p.clone()));

        p.extent = [2.0, 3.0];
        p.center = Vec3::new(0.5, 0.0, 0.0);
        p.pose = Pose::from_position(Vec3::new(0.0, 0.1, 0.0));
        session.on_anchor_updated(&TrackedAnchor::Plane(p.clone()));

        let overlay = session.overlay_node(p.id).unwrap();
        assert_eq!(
            session.scene().geometry(overlay),
            Some(Geometry::Plane { width: 2.0, height: 3.0 })
        );
        let container = session.container_node(p.id).unwrap();
        assert_eq!(
            session.scene().transform(container).unwrap().position,
            Vec3::new(0.0, 0.1, 0.0)
        );
    }

    #[test]
    fn test_update_for_unknown_anchor_is_ignored() {
        let mut session = ArSession::new(StubTracking::new(), PlacementConfig::default());
        session.on_anchor_updated(&TrackedAnchor::Plane(plane([1.0, 1.0])));
        assert_eq!(session.scene().node_count(), 1);
    }

    #[test]
    fn test_image_anchor_attaches_selected_template() {
        let mut session = ArSession::new(StubTracking::new(), PlacementConfig::default());
        session.select_template(Some(template("cup")));
        let image = image();

        let container = session
            .on_anchor_added(&TrackedAnchor::Image(image.clone()))
            .unwrap();

        let placed = &session.placed()[0];
        assert_eq!(placed.source, PlacementSource::Image);
        assert_eq!(placed.anchor, Some(image.id));
        assert_eq!(session.scene().parent(placed.node), Some(container));
        let world = session.scene().world_position(placed.node).unwrap();
        assert!((world - Vec3::new(0.0, 1.0, -1.0)).length() < 1e-5);

        // A repeated add for the same image does not stamp again
        session.on_anchor_added(&TrackedAnchor::Image(image));
        assert_eq!(session.placed().len(), 1);
    }

    #[test]
    fn test_image_anchor_without_template_places_nothing() {
        let mut session = ArSession::new(StubTracking::new(), PlacementConfig::default());
        session.on_anchor_added(&TrackedAnchor::Image(image()));
        assert!(session.placed().is_empty());
    }

    #[test]
    fn test_image_mode_ignores_touches() {
        let tracking = StubTracking::new()
            .with_camera(Pose::IDENTITY)
            .with_hit_at(Vec3::ZERO);
        let mut session = ArSession::new(tracking, PlacementConfig::default());
        session.select_template(Some(template("cup")));
        session.set_mode(PlacementMode::Image);

        assert!(session.on_interaction_start(ScreenPoint::new(1.0, 1.0)).is_none());
        assert!(session.on_interaction_move(ScreenPoint::new(300.0, 300.0)).is_none());
        assert!(session.placed().is_empty());
    }

    #[test]
    fn test_anchor_removal_takes_attached_objects() {
        let mut session = ArSession::new(StubTracking::new(), PlacementConfig::default());
        session.select_template(Some(template("cup")));
        let image = image();
        let p = plane([1.0, 1.0]);
        session.on_anchor_added(&TrackedAnchor::Image(image.clone()));
        session.on_anchor_added(&TrackedAnchor::Plane(p.clone()));

        session.on_anchor_removed(image.id);
        session.on_anchor_removed(p.id);

        assert!(session.placed().is_empty());
        assert_eq!(session.overlay_count(), 0);
        assert_eq!(session.container_node(image.id), None);
        assert_eq!(session.scene().node_count(), 1);
    }

    #[test]
    fn test_undo() {
        let tracking = StubTracking::new().with_hit_at(Vec3::ZERO);
        let mut session = ArSession::new(tracking, PlacementConfig::default());
        assert!(session.undo_last_object().is_none());

        session.set_mode(PlacementMode::Surface);
        session.select_template(Some(template("A")));
        let first = session.on_interaction_start(ScreenPoint::new(0.0, 0.0)).unwrap();
        let second = session.on_interaction_move(ScreenPoint::new(200.0, 0.0)).unwrap();

        let undone = session.undo_last_object().unwrap();
        assert_eq!(undone.node, second);
        assert!(!session.scene().contains(second));
        assert!(session.scene().contains(first));
        assert_eq!(session.placed().len(), 1);
    }

    #[test]
    fn test_reset_clears_objects_and_overlays() {
        let tracking = StubTracking::new().with_hit_at(Vec3::ZERO);
        let mut session = ArSession::new(tracking, PlacementConfig::default());
        session.set_mode(PlacementMode::Surface);
        session.select_template(Some(template("A")));
        session.on_interaction_start(ScreenPoint::new(0.0, 0.0));
        let p = plane([1.0, 1.0]);
        session.on_anchor_added(&TrackedAnchor::Plane(p.clone()));
        session.on_anchor_added(&TrackedAnchor::Image(image()));

        session.reset_scene();

        assert!(session.placed().is_empty());
        assert_eq!(session.overlay_count(), 0);
        // Anchors stay registered
        let container = session.container_node(p.id).unwrap();
        assert!(session.scene().children(container).is_empty());

        // Updates after a reset find no overlay and change nothing
        session.on_anchor_updated(&TrackedAnchor::Plane(p));
        assert_eq!(session.overlay_count(), 0);

        session.reset_scene();
        assert!(session.placed().is_empty());
    }

    #[test]
    fn test_events_report_changes() {
        let tracking = StubTracking::new().with_hit_at(Vec3::ZERO);
        let mut session = ArSession::new(tracking, PlacementConfig::default());
        session.drain_events();

        session.set_mode(PlacementMode::Surface);
        session.set_mode(PlacementMode::Surface);
        session.select_template(Some(template("A")));
        let node = session.on_interaction_start(ScreenPoint::new(0.0, 0.0)).unwrap();
        session.undo_last_object();

        let events = session.drain_events();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            SessionEvent::ModeChanged {
                from: PlacementMode::Freeform,
                to: PlacementMode::Surface
            }
        );
        assert!(matches!(events[1], SessionEvent::DetectionReconfigured { surfaces: true, .. }));
        assert!(matches!(&events[2], SessionEvent::ObjectPlaced { node: n, .. } if *n == node));
        assert!(matches!(&events[3], SessionEvent::ObjectRemoved { node: n, .. } if *n == node));
    }

    #[test]
    fn test_simulated_session_end_to_end() {
        let config = PlacementConfig::default().with_image_target(ImageTarget::new("poster", 0.3));
        let mut session = ArSession::new(SimulatedSession::default(), config);
        session.select_template(Some(template("cup")));
        session.set_mode(PlacementMode::Surface);

        let camera = Pose::from_yaw_pitch(Vec3::new(0.0, 1.0, 0.0), 0.0, -45.0);
        session.tracking_mut().set_camera_pose(camera);
        let floor = session
            .tracking_mut()
            .detect_plane(Pose::IDENTITY, Vec3::ZERO, [4.0, 4.0])
            .unwrap();
        assert_eq!(session.pump_tracking(), 1);
        assert!(session.overlay_node(floor).is_some());

        let center = session.tracking().viewport().center();
        let node = session.on_interaction_start(center).unwrap();
        let position = session.scene().world_position(node).unwrap();
        assert!((position - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);

        // Image mode turns surface detection off and image detection on
        session.set_mode(PlacementMode::Image);
        assert!(!session.tracking().detection_config().surfaces);
        assert!(session
            .tracking_mut()
            .detect_plane(Pose::IDENTITY, Vec3::ZERO, [1.0, 1.0])
            .is_none());
        session
            .tracking_mut()
            .detect_image("poster", Pose::from_position(Vec3::new(0.0, 1.0, -2.0)))
            .unwrap();
        session.pump_tracking();
        assert_eq!(session.placed().len(), 2);
        assert_eq!(session.placed()[1].source, PlacementSource::Image);

        session.tracking_mut().remove_anchor(floor);
        session.pump_tracking();
        assert_eq!(session.overlay_count(), 0);
        assert_eq!(session.placed().len(), 2);
    }
}
