//! Dispatch context.
//!
//! One [`Context`] is created per incoming event and shared as an
//! `Arc<Context>` with every predicate and handler consulted during that
//! dispatch cycle. The context is read-only; handlers that need to talk back
//! to the platform do so through their own client, not through this type.

use crate::event::MessengerEvent;

/// The read-only context handed to predicates and handlers.
#[derive(Debug, Clone, Default)]
pub struct Context {
    event: MessengerEvent,
}

impl Context {
    /// Creates a context wrapping the given event.
    pub fn new(event: MessengerEvent) -> Self {
        Self { event }
    }

    /// Returns the event carried by this context.
    pub fn event(&self) -> &MessengerEvent {
        &self.event
    }
}

impl From<MessengerEvent> for Context {
    fn from(event: MessengerEvent) -> Self {
        Self::new(event)
    }
}
