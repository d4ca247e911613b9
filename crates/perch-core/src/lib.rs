//! Perch Core - Foundational types for the Perch placement engine
//!
//! This crate provides the core types that all other Perch crates depend on:
//! - `NodeId` - Stable scene node identifiers
//! - `AnchorId` - Opaque tracking anchor identifiers
//! - `Vec3`, `ScreenPoint`, `Pose`, `Transform`, `Color` - Spatial types
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{PerchError, Result};
pub use id::{AnchorId, NodeId};
pub use types::{Color, Pose, ScreenPoint, Transform, Vec3};
