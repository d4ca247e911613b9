//! Perch Scene - Scene graph with stable node ids
//!
//! This crate wraps hecs with stable node identifiers and an ordered
//! parent/child hierarchy, and provides the prototype interface that
//! placed objects are instantiated from.

mod catalog;
mod graph;
mod node;
mod template;

pub use catalog::TemplateCatalog;
pub use graph::SceneGraph;
pub use node::{Geometry, NodeDesc, NodeInfo};
pub use template::{ModelTemplate, ObjectTemplate, PartDef};
