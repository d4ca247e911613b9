//! Node descriptions and geometry

use perch_core::{Color, NodeId, Transform, Vec3};
use serde::{Deserialize, Serialize};

/// Renderable shape attached to a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Geometry {
    Box { width: f32, height: f32, length: f32 },
    Sphere { radius: f32 },
    /// A flat card in the node's local XY plane
    Plane { width: f32, height: f32 },
    /// Externally loaded mesh, referenced by asset name
    Mesh { asset: String },
}

/// A detached node tree, not yet part of any scene.
///
/// Spawning a `NodeDesc` moves it into the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDesc {
    pub name: String,
    pub transform: Transform,
    pub geometry: Option<Geometry>,
    pub color: Option<Color>,
    pub visible: bool,
    pub children: Vec<NodeDesc>,
}

impl NodeDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            geometry: None,
            color: None,
            visible: true,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_child(mut self, child: NodeDesc) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this tree, including itself
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NodeDesc::node_count).sum::<usize>()
    }
}

/// Snapshot of a live node, for reporting
#[derive(Debug, Clone, Serialize)]
pub struct NodeInfo {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
    pub geometry: Option<Geometry>,
    pub visible: bool,
    pub world_position: Vec3,
}
