//! Drain-style event queue and anchor lifecycle events

use crate::anchor::TrackedAnchor;
use perch_core::AnchorId;

/// Anchor lifecycle notifications from a tracking session
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorEvent {
    Added(TrackedAnchor),
    Updated(TrackedAnchor),
    Removed(AnchorId),
}

/// A simple event queue that producers push to and consumers drain
#[derive(Debug)]
pub struct EventQueue<E> {
    events: Vec<E>,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the queue
    pub fn push(&mut self, event: E) {
        self.events.push(event);
    }

    /// Drain all events from the queue, returning them in push order
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }

    /// Pending events, without draining
    pub fn pending(&self) -> &[E] {
        &self.events
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
