//! The ordered record of placed objects

use perch_core::{AnchorId, NodeId};
use serde::Serialize;

/// What triggered a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementSource {
    Freeform,
    Surface,
    Image,
}

/// A clone that was put into the scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedObject {
    pub node: NodeId,
    pub template: String,
    pub source: PlacementSource,
    /// Image anchor the object is attached to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AnchorId>,
}

/// Placed objects in insertion order; the tail is what undo removes
#[derive(Debug, Default)]
pub struct PlacedObjects {
    objects: Vec<PlacedObject>,
}

impl PlacedObjects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: PlacedObject) {
        self.objects.push(object);
    }

    /// Remove and return the most recent placement
    pub fn pop(&mut self) -> Option<PlacedObject> {
        self.objects.pop()
    }

    /// Remove every placement attached to an anchor, keeping the rest in order
    pub fn take_anchored(&mut self, anchor: AnchorId) -> Vec<PlacedObject> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.objects)
            .into_iter()
            .partition(|o| o.anchor == Some(anchor));
        self.objects = kept;
        taken
    }

    /// Remove everything, returning it in insertion order
    pub fn take_all(&mut self) -> Vec<PlacedObject> {
        std::mem::take(&mut self.objects)
    }

    pub fn last(&self) -> Option<&PlacedObject> {
        self.objects.last()
    }

    pub fn as_slice(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
