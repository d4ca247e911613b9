//! Screen-point unprojection and ray/surface intersection

use crate::anchor::PlaneAnchor;
use perch_core::{Pose, ScreenPoint, Vec3};
use serde::{Deserialize, Serialize};

/// Interaction surface size and camera field of view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Vertical field of view in degrees
    pub fov_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
            fov_y: 60.0,
        }
    }
}

impl Viewport {
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width * 0.5, self.height * 0.5)
    }
}

/// A ray in 3D space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a world ray through a screen point for a camera looking down its local -Z.
    pub fn from_screen(point: ScreenPoint, viewport: &Viewport, camera: &Pose) -> Self {
        // Convert to NDC [-1, 1]
        let ndc_x = 2.0 * point.x / viewport.width - 1.0;
        let ndc_y = 1.0 - 2.0 * point.y / viewport.height; // Y flipped

        let tan_half = (viewport.fov_y.to_radians() * 0.5).tan();
        let aspect = viewport.width / viewport.height;
        let local = Vec3::new(ndc_x * tan_half * aspect, ndc_y * tan_half, -1.0);

        let direction = camera.rotate(local).normalized();
        let direction = if direction.length() > 1e-8 {
            direction
        } else {
            camera.forward()
        };

        Self {
            origin: camera.position,
            direction,
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersect with a plane anchor's extent rectangle.
    /// Returns the distance along the ray and the world-space hit point.
    pub fn intersect_plane(&self, plane: &PlaneAnchor) -> Option<(f32, Vec3)> {
        let inv = plane.pose.quat().inverse();
        let local_origin: Vec3 = (inv * glam::Vec3::from(self.origin - plane.pose.position)).into();
        let local_dir: Vec3 = (inv * glam::Vec3::from(self.direction)).into();

        // Ray is parallel to the surface
        if local_dir.y.abs() < 1e-8 {
            return None;
        }

        let t = -local_origin.y / local_dir.y;
        if t < 0.0 {
            return None;
        }

        let local_hit = local_origin + local_dir * t;
        if !plane.contains_local(local_hit) {
            return None;
        }

        Some((t, self.at(t)))
    }
}
