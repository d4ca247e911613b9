//! Spatial and common types

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// Camera-style forward: tracking sessions look down local -Z
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            *self * (1.0 / len)
        } else {
            Self::ZERO
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<glam::Vec3> for Vec3 {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for glam::Vec3 {
    fn from(v: Vec3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

/// A point on the interaction surface, in device-independent units.
///
/// Origin is the top-left corner, +y points down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance, for threshold checks without a sqrt
    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A rigid pose: position plus unit quaternion rotation `[x, y, z, w]`.
///
/// Camera and anchor poses reported by tracking sessions use this type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    #[serde(default = "identity_quat")]
    pub rotation: [f32; 4],
}

fn identity_quat() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: [0.0, 0.0, 0.0, 1.0],
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn from_quat(position: Vec3, rotation: glam::Quat) -> Self {
        Self {
            position,
            rotation: rotation.normalize().to_array(),
        }
    }

    /// Build a pose from yaw (around +Y) then pitch (around local +X), in degrees
    pub fn from_yaw_pitch(position: Vec3, yaw_deg: f32, pitch_deg: f32) -> Self {
        let rotation = glam::Quat::from_euler(
            glam::EulerRot::YXZ,
            yaw_deg.to_radians(),
            pitch_deg.to_radians(),
            0.0,
        );
        Self::from_quat(position, rotation)
    }

    pub fn quat(&self) -> glam::Quat {
        let [x, y, z, w] = self.rotation;
        glam::Quat::from_xyzw(x, y, z, w)
    }

    /// Rotate a local-space direction into world space
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        (self.quat() * glam::Vec3::from(v)).into()
    }

    /// The local -Z axis in world space
    pub fn forward(&self) -> Vec3 {
        self.rotate(Vec3::FORWARD)
    }

    /// Compose a translation expressed in this pose's local frame.
    ///
    /// Equivalent to `self * translation(offset)`: the result keeps this
    /// pose's rotation.
    pub fn translated_local(&self, offset: Vec3) -> Self {
        Self {
            position: self.position + self.rotate(offset),
            rotation: self.rotation,
        }
    }

    /// Same position with the rotation discarded
    pub fn position_only(&self) -> Self {
        Self::from_position(self.position)
    }

    /// Transform a local-space point into world space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.position + self.rotate(p)
    }

    pub fn to_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_rotation_translation(self.quat(), self.position.into())
    }
}

/// A 3D transform with position, rotation and scale, used by scene nodes
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Quaternion rotation [x, y, z, w]
    #[serde(default = "identity_quat")]
    pub rotation: [f32; 4],
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: [0.0, 0.0, 0.0, 1.0],
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn from_pose(pose: &Pose) -> Self {
        Self {
            position: pose.position,
            rotation: pose.rotation,
            scale: Vec3::ONE,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: glam::Quat) -> Self {
        self.rotation = rotation.normalize().to_array();
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn quat(&self) -> glam::Quat {
        let [x, y, z, w] = self.rotation;
        glam::Quat::from_xyzw(x, y, z, w)
    }

    /// Convert to a 4x4 transformation matrix
    pub fn to_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_scale_rotation_translation(
            self.scale.into(),
            self.quat(),
            self.position.into(),
        )
    }

    /// Decompose an affine matrix back into a transform
    pub fn from_matrix(mat: &glam::Mat4) -> Self {
        let (scale, rotation, translation) = mat.to_scale_rotation_translation();
        Self {
            position: translation.into(),
            rotation: rotation.to_array(),
            scale: scale.into(),
        }
    }
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLUE: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 1.0,
        a: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a.clamp(0.0, 1.0);
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_vec3_operations() {
        let v1 = Vec3::new(1.0, 2.0, 3.0);
        let v2 = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(v1 + v2, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(v2 - v1, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(v1 * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-v1, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_screen_point_distance_squared() {
        let p = ScreenPoint::new(100.0, 100.0);
        let q = ScreenPoint::new(100.0, 190.0);
        assert_eq!(p.distance_squared(&q), 8100.0);
    }

    #[test]
    fn test_identity_pose_forward() {
        assert!(approx(Pose::IDENTITY.forward(), Vec3::FORWARD));
    }

    #[test]
    fn test_translated_local_follows_rotation() {
        // Yaw 90 degrees left: forward becomes -X
        let camera = Pose::from_yaw_pitch(Vec3::new(1.0, 1.5, 0.0), 90.0, 0.0);
        let placed = camera.translated_local(Vec3::new(0.0, 0.0, -0.2));

        assert!(approx(placed.position, Vec3::new(0.8, 1.5, 0.0)));
        assert_eq!(placed.rotation, camera.rotation);
    }

    #[test]
    fn test_position_only_drops_rotation() {
        let pose = Pose::from_yaw_pitch(Vec3::new(1.0, 0.0, 2.0), 30.0, -10.0);
        let upright = pose.position_only();
        assert_eq!(upright.position, pose.position);
        assert_eq!(upright.rotation, Pose::IDENTITY.rotation);
    }

    #[test]
    fn test_transform_matrix_roundtrip() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(glam::Quat::from_rotation_y(0.5))
            .with_scale(Vec3::new(2.0, 2.0, 2.0));
        let back = Transform::from_matrix(&t.to_matrix());
        assert!(approx(back.position, t.position));
        assert!(approx(back.scale, t.scale));
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0xFF8844).with_alpha(0.5);
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.533).abs() < 0.01);
        assert!((c.b - 0.267).abs() < 0.01);
        assert_eq!(c.a, 0.5);
    }
}
