//! SceneGraph - node arena with stable ids and an ordered hierarchy

use crate::node::{Geometry, NodeDesc, NodeInfo};
use bimap::BiMap;
use perch_core::{Color, NodeId, PerchError, Result, Transform, Vec3};
use std::collections::HashMap;

/// Node display name
struct NodeName(String);

/// Visibility flag
struct Visible(bool);

/// The scene graph that placed objects and overlays live in
///
/// Wraps hecs::World with:
/// - Stable NodeId mapping
/// - A root node that always exists
/// - Parent links and insertion-ordered child lists
pub struct SceneGraph {
    /// The underlying hecs world
    world: hecs::World,
    /// Bidirectional mapping: NodeId <-> hecs::Entity
    id_map: BiMap<NodeId, hecs::Entity>,
    /// child -> parent
    parents: HashMap<NodeId, NodeId>,
    /// parent -> children, in insertion order
    children: HashMap<NodeId, Vec<NodeId>>,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a scene containing only the root node
    pub fn new() -> Self {
        let mut scene = Self {
            world: hecs::World::new(),
            id_map: BiMap::new(),
            parents: HashMap::new(),
            children: HashMap::new(),
            root: NodeId::from_raw(0),
        };
        scene.root = scene.insert_node(NodeDesc::new("root"));
        scene
    }

    /// The root node. It cannot be removed.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Move a detached node tree into the scene under `parent`
    pub fn spawn(&mut self, parent: NodeId, desc: NodeDesc) -> Result<NodeId> {
        if !self.contains(parent) {
            return Err(PerchError::NodeNotFound(parent.to_string()));
        }
        Ok(self.spawn_unchecked(parent, desc))
    }

    /// Spawn an empty grouping node
    pub fn spawn_empty(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId> {
        self.spawn(parent, NodeDesc::new(name))
    }

    fn spawn_unchecked(&mut self, parent: NodeId, mut desc: NodeDesc) -> NodeId {
        let children = std::mem::take(&mut desc.children);
        let id = self.insert_node(desc);
        self.parents.insert(id, parent);
        self.children.entry(parent).or_default().push(id);

        for child in children {
            self.spawn_unchecked(id, child);
        }
        id
    }

    fn insert_node(&mut self, desc: NodeDesc) -> NodeId {
        let NodeDesc {
            name,
            transform,
            geometry,
            color,
            visible,
            ..
        } = desc;

        let mut builder = hecs::EntityBuilder::new();
        builder.add(NodeName(name)).add(transform).add(Visible(visible));
        if let Some(geometry) = geometry {
            builder.add(geometry);
        }
        if let Some(color) = color {
            builder.add(color);
        }

        let entity = self.world.spawn(builder.build());
        let id = NodeId::new();
        self.id_map.insert(id, entity);
        id
    }

    /// Remove a node and its whole subtree
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(PerchError::InvalidHierarchy(
                "the root node cannot be removed".to_string(),
            ));
        }
        if !self.contains(id) {
            return Err(PerchError::NodeNotFound(id.to_string()));
        }

        if let Some(parent) = self.parents.remove(&id) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|c| *c != id);
            }
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(kids) = self.children.remove(&current) {
                stack.extend(kids);
            }
            self.parents.remove(&current);
            if let Some((_, entity)) = self.id_map.remove_by_left(&current) {
                let _ = self.world.despawn(entity);
            }
        }

        Ok(())
    }

    /// Remove everything except the root
    pub fn clear(&mut self) {
        let top_level = self.children(self.root).to_vec();
        for id in top_level {
            let _ = self.remove(id);
        }
    }

    /// Check if a node exists
    pub fn contains(&self, id: NodeId) -> bool {
        self.id_map.contains_left(&id)
    }

    /// Number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.id_map.len()
    }

    /// Get parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }

    /// Children of a node, in insertion order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    fn entity(&self, id: NodeId) -> Result<hecs::Entity> {
        self.id_map
            .get_by_left(&id)
            .copied()
            .ok_or_else(|| PerchError::NodeNotFound(id.to_string()))
    }

    pub fn name(&self, id: NodeId) -> Option<String> {
        let entity = self.entity(id).ok()?;
        let name = self.world.get::<&NodeName>(entity).ok()?;
        Some(name.0.clone())
    }

    pub fn transform(&self, id: NodeId) -> Option<Transform> {
        let entity = self.entity(id).ok()?;
        self.world.get::<&Transform>(entity).ok().map(|t| *t)
    }

    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> Result<()> {
        let entity = self.entity(id)?;
        let slot = self
            .world
            .query_one_mut::<&mut Transform>(entity)
            .map_err(|_| PerchError::NodeNotFound(id.to_string()))?;
        *slot = transform;
        Ok(())
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> Result<()> {
        let transform = self
            .transform(id)
            .ok_or_else(|| PerchError::NodeNotFound(id.to_string()))?;
        self.set_transform(id, transform.with_position(position))
    }

    pub fn geometry(&self, id: NodeId) -> Option<Geometry> {
        let entity = self.entity(id).ok()?;
        self.world.get::<&Geometry>(entity).ok().map(|g| (*g).clone())
    }

    /// Attach or replace a node's geometry
    pub fn set_geometry(&mut self, id: NodeId, geometry: Geometry) -> Result<()> {
        let entity = self.entity(id)?;
        self.world
            .insert_one(entity, geometry)
            .map_err(|_| PerchError::NodeNotFound(id.to_string()))
    }

    pub fn color(&self, id: NodeId) -> Option<Color> {
        let entity = self.entity(id).ok()?;
        self.world.get::<&Color>(entity).ok().map(|c| *c)
    }

    pub fn is_visible(&self, id: NodeId) -> Option<bool> {
        let entity = self.entity(id).ok()?;
        self.world.get::<&Visible>(entity).ok().map(|v| v.0)
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        let entity = self.entity(id)?;
        let slot = self
            .world
            .query_one_mut::<&mut Visible>(entity)
            .map_err(|_| PerchError::NodeNotFound(id.to_string()))?;
        slot.0 = visible;
        Ok(())
    }

    /// World-space matrix of a node, walking the parent chain
    pub fn world_matrix(&self, id: NodeId) -> Option<glam::Mat4> {
        let local = self.transform(id)?.to_matrix();
        match self.parents.get(&id) {
            Some(parent) => Some(self.world_matrix(*parent)? * local),
            None => Some(local),
        }
    }

    pub fn world_transform(&self, id: NodeId) -> Option<Transform> {
        self.world_matrix(id).map(|m| Transform::from_matrix(&m))
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        let mat = self.world_matrix(id)?;
        Some(mat.w_axis.truncate().into())
    }

    /// Snapshot of every node, depth-first from the root
    pub fn nodes(&self) -> Vec<NodeInfo> {
        let mut out = Vec::with_capacity(self.node_count());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(NodeInfo {
                id,
                name: self.name(id).unwrap_or_default(),
                parent: self.parent(id),
                geometry: self.geometry(id),
                visible: self.is_visible(id).unwrap_or(false),
                world_position: self.world_position(id).unwrap_or(Vec3::ZERO),
            });
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }
}
