//! Perch Tracking - the boundary to the platform's tracking session
//!
//! Camera tracking, surface detection and image recognition are done by the
//! host platform. This crate describes what the placement core consumes
//! from it:
//! - `TrackedAnchor` - plane and image anchors as a tagged union
//! - `TrackingSession` - camera pose, hit-testing, detection config, anchor events
//! - `EventQueue` - the drain-style queue anchor and session events travel through
//! - `SimulatedSession` - a deterministic in-process session for tests and replays

mod anchor;
mod event;
mod ray;
mod session;
mod simulated;

pub use anchor::{AnchorKind, ImageAnchor, ImageTarget, PlaneAnchor, TrackedAnchor};
pub use event::{AnchorEvent, EventQueue};
pub use ray::{Ray, Viewport};
pub use session::{DetectionConfig, Hit, TrackingSession};
pub use simulated::SimulatedSession;
