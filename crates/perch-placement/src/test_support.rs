//! Scripted tracking session for unit tests

use perch_core::{AnchorId, Pose, ScreenPoint, Vec3};
use perch_tracking::{AnchorEvent, DetectionConfig, EventQueue, Hit, TrackingSession};
use std::cell::RefCell;

/// Returns a fixed camera pose and fixed hit list, and records every call
pub struct StubTracking {
    pub camera: Option<Pose>,
    pub hits: Vec<Hit>,
    pub configs: Vec<DetectionConfig>,
    pub events: EventQueue<AnchorEvent>,
    pub queries: RefCell<Vec<ScreenPoint>>,
}

impl StubTracking {
    pub fn new() -> Self {
        Self {
            camera: None,
            hits: Vec::new(),
            configs: Vec::new(),
            events: EventQueue::new(),
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn with_camera(mut self, pose: Pose) -> Self {
        self.camera = Some(pose);
        self
    }

    /// Every hit-test returns a single hit at `position`
    pub fn with_hit_at(mut self, position: Vec3) -> Self {
        self.hits = vec![Hit {
            pose: Pose::from_yaw_pitch(position, 0.0, 20.0),
            distance: 1.0,
            anchor: Some(AnchorId::new()),
        }];
        self
    }
}

impl TrackingSession for StubTracking {
    fn current_camera_pose(&self) -> Option<Pose> {
        self.camera
    }

    fn hit_test(&self, point: ScreenPoint) -> Vec<Hit> {
        self.queries.borrow_mut().push(point);
        self.hits.clone()
    }

    fn configure(&mut self, config: DetectionConfig) {
        self.configs.push(config);
    }

    fn drain_events(&mut self) -> Vec<AnchorEvent> {
        self.events.drain()
    }
}
