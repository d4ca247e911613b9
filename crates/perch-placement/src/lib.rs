//! Perch Placement - anchor-driven object placement
//!
//! The host feeds gestures and tracking-session anchor events into an
//! [`ArSession`], which owns the scene graph and all session state:
//! - `ModeController` - freeform / surface / image mode and detector config
//! - `PlacementEngine` - where a gesture places a clone of the selected template
//! - `AnchorRegistry` - one container node per tracked anchor
//! - `OverlaySync` - translucent overlays that follow detected planes
//! - `PlacementConfig` - layered TOML + environment configuration

mod config;
mod event;
mod mode;
mod overlay;
mod placed;
mod placement;
mod registry;
mod session;

#[cfg(test)]
mod test_support;

pub use config::PlacementConfig;
pub use event::SessionEvent;
pub use mode::{ModeController, ModeTransition, PlacementMode};
pub use overlay::OverlaySync;
pub use placed::{PlacedObject, PlacedObjects, PlacementSource};
pub use placement::{Placement, PlacementEngine};
pub use registry::AnchorRegistry;
pub use session::ArSession;
