//! Gesture-driven placement decisions

use crate::config::PlacementConfig;
use crate::mode::PlacementMode;
use crate::placed::PlacementSource;
use perch_core::{AnchorId, Pose, ScreenPoint, Vec3};
use perch_tracking::TrackingSession;

/// Where a gesture wants a new clone to go
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// World pose for the new object
    pub pose: Pose,
    pub source: PlacementSource,
    /// Surface anchor the hit landed on, if any
    pub anchor: Option<AnchorId>,
}

/// Turns press / drag / release into placements.
///
/// The engine never touches the scene; it only decides poses and tracks
/// the last point a surface clone was stamped at.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    freeform_distance: f32,
    stamp_spacing: f32,
    last_placed_point: Option<ScreenPoint>,
}

impl PlacementEngine {
    pub fn new(config: &PlacementConfig) -> Self {
        Self {
            freeform_distance: config.freeform_distance,
            stamp_spacing: config.stamp_spacing,
            last_placed_point: None,
        }
    }

    pub fn last_placed_point(&self) -> Option<ScreenPoint> {
        self.last_placed_point
    }

    /// Press. Freeform places in front of the camera, surface places at the hit.
    pub fn on_interaction_start<T: TrackingSession + ?Sized>(
        &mut self,
        point: ScreenPoint,
        mode: PlacementMode,
        tracking: &T,
    ) -> Option<Placement> {
        match mode {
            PlacementMode::Freeform => self.place_in_front(tracking),
            PlacementMode::Surface => self.place_on_surface(point, tracking),
            PlacementMode::Image => None,
        }
    }

    /// Drag. Only surface mode reacts, stamping a new clone once the finger
    /// has moved more than the stamp spacing from the last stamp.
    pub fn on_interaction_move<T: TrackingSession + ?Sized>(
        &mut self,
        point: ScreenPoint,
        mode: PlacementMode,
        tracking: &T,
    ) -> Option<Placement> {
        if mode != PlacementMode::Surface {
            return None;
        }

        if let Some(last) = self.last_placed_point {
            let spacing_sq = self.stamp_spacing * self.stamp_spacing;
            if point.distance_squared(&last) <= spacing_sq {
                return None;
            }
        }

        self.place_on_surface(point, tracking)
    }

    /// Release. The next drag starts a fresh trail.
    pub fn on_interaction_end(&mut self) {
        self.last_placed_point = None;
    }

    fn place_in_front<T: TrackingSession + ?Sized>(&self, tracking: &T) -> Option<Placement> {
        let Some(camera) = tracking.current_camera_pose() else {
            log::trace!("No camera frame yet, skipping freeform placement");
            return None;
        };

        Some(Placement {
            pose: camera.translated_local(Vec3::FORWARD * self.freeform_distance),
            source: PlacementSource::Freeform,
            anchor: None,
        })
    }

    fn place_on_surface<T: TrackingSession + ?Sized>(
        &mut self,
        point: ScreenPoint,
        tracking: &T,
    ) -> Option<Placement> {
        let Some(hit) = tracking.hit_test(point).into_iter().next() else {
            log::trace!("No surface under ({}, {})", point.x, point.y);
            return None;
        };

        self.last_placed_point = Some(point);

        // Keep objects upright regardless of the surface orientation
        Some(Placement {
            pose: hit.pose.position_only(),
            source: PlacementSource::Surface,
            anchor: hit.anchor,
        })
    }
}
