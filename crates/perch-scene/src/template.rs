//! Object templates: the prototypes placed objects are cloned from

use crate::node::{Geometry, NodeDesc};
use perch_core::{Color, Transform, Vec3};
use serde::{Deserialize, Serialize};

/// A prototype that can produce fresh, detached copies of an object.
///
/// Each call to `instantiate` returns a new tree that the caller owns;
/// spawning it hands ownership to the scene graph.
pub trait ObjectTemplate: Send + Sync {
    fn name(&self) -> &str;

    fn instantiate(&self) -> NodeDesc;
}

/// A sub-part of a model, positioned relative to the model's origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDef {
    pub name: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub offset: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// A data-driven template, typically loaded from a catalog file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub geometry: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Offset applied to the geometry so the model's origin sits at its base
    #[serde(default)]
    pub pivot: Vec3,
    #[serde(default, rename = "part", skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<PartDef>,
}

fn default_scale() -> f32 {
    1.0
}

impl ModelTemplate {
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            description: None,
            geometry,
            color: None,
            scale: default_scale(),
            pivot: Vec3::ZERO,
            parts: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_pivot(mut self, pivot: Vec3) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_part(mut self, part: PartDef) -> Self {
        self.parts.push(part);
        self
    }
}

impl ObjectTemplate for ModelTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn instantiate(&self) -> NodeDesc {
        let mut body = NodeDesc::new(format!("{}.body", self.name))
            .with_geometry(self.geometry.clone())
            .with_transform(Transform::from_position(self.pivot));
        if let Some(color) = self.color {
            body = body.with_color(color);
        }

        let mut root = NodeDesc::new(self.name.clone())
            .with_transform(Transform::IDENTITY.with_scale(Vec3::ONE * self.scale))
            .with_child(body);

        for part in &self.parts {
            let mut node = NodeDesc::new(format!("{}.{}", self.name, part.name))
                .with_geometry(part.geometry.clone())
                .with_transform(Transform::from_position(self.pivot + part.offset));
            if let Some(color) = part.color.or(self.color) {
                node = node.with_color(color);
            }
            root = root.with_child(node);
        }

        root
    }
}
