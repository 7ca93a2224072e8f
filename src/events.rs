//! Progress events published while a word is being analyzed.
//!
//! The engine emits via [`EventBus::emit`]; anything interested (the
//! spinner, tests) subscribes via [`EventBus::subscribe`]. Built on
//! [`tokio::sync::broadcast`] so listeners are independent and optional.

use tokio::sync::broadcast;

use crate::analysis::Task;

/// Events that flow out of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A task's partial result was merged.
    Reported { task: Task, remaining: usize },
    /// All tasks reported and the result was finalized.
    Finished { word: String },
}

/// A broadcast channel that any component can emit to or subscribe from.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to future events (past ones are not replayed).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}
