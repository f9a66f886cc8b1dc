//! Ordered handler registry and dispatch.
//!
//! A [`HandlerRegistry`] holds an ordered list of predicate/handler entries
//! plus an optional guarded fallback. Dispatch scans the list in
//! registration order, runs the **first** entry whose predicate passes, and
//! stops. The fallback is consulted only when no ordered entry matched, and
//! only if its own guard predicate passes.
//!
//! Registration happens during setup, before dispatch begins, so the entry
//! list needs no locking.
//!
//! ```rust,ignore
//! use toolbot_framework::HandlerRegistry;
//!
//! let registry = HandlerRegistry::new()
//!     .on(|ctx| ctx.event().is_postback(), menu_handler)
//!     .on(|ctx| ctx.event().is_message(), message_handler)
//!     .fallback(|_| true, unhandled_handler);
//!
//! registry.dispatch(ctx).await;
//! ```

use std::sync::Arc;

use tracing::{Level, debug, span, trace};

use toolbot_core::Context;

use crate::handler::{BoxedHandler, into_handler};

/// A type-erased predicate over the dispatch context.
pub type Predicate = Arc<dyn Fn(&Context) -> bool + Send + Sync>;

/// One registered predicate/handler pair.
///
/// Immutable once stored; owned exclusively by the registry's ordered list.
struct HandlerEntry {
    predicate: Predicate,
    handler: BoxedHandler,
}

/// An ordered collection of handler entries with a guarded fallback.
///
/// Registration order is dispatch precedence: the first entry whose
/// predicate returns `true` wins and no later entry is consulted.
#[derive(Default)]
pub struct HandlerRegistry {
    entries: Vec<HandlerEntry>,
    fallback: Option<HandlerEntry>,
}

impl HandlerRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: None,
        }
    }

    /// Appends a predicate/handler entry.
    ///
    /// The handler is normalized before storage. No validation is performed
    /// on the predicate; a predicate that never returns `true` simply never
    /// fires.
    pub fn on<P, F, Fut>(mut self, predicate: P, handler: F) -> Self
    where
        P: Fn(&Context) -> bool + Send + Sync + 'static,
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.entries.push(HandlerEntry {
            predicate: Arc::new(predicate),
            handler: into_handler(handler),
        });
        self
    }

    /// Sets the guarded fallback entry, replacing any previous one.
    ///
    /// The fallback runs only when no ordered entry matched **and** the
    /// guard predicate passes for the context.
    pub fn fallback<P, F, Fut>(mut self, guard: P, handler: F) -> Self
    where
        P: Fn(&Context) -> bool + Send + Sync + 'static,
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.fallback = Some(HandlerEntry {
            predicate: Arc::new(guard),
            handler: into_handler(handler),
        });
        self
    }

    /// Returns the number of ordered entries.
    pub fn handler_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if a fallback entry is set.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Dispatches a context to the registered entries.
    ///
    /// Scans entries in registration order, invokes the first whose
    /// predicate returns `true`, and stops. When nothing matched, the
    /// fallback is invoked if its guard passes. Unmatched events are a
    /// no-op; dispatch never fails.
    ///
    /// Returns `true` if any handler ran.
    pub async fn dispatch(&self, ctx: Arc<Context>) -> bool {
        let span = span!(Level::DEBUG, "dispatch");
        let _enter = span.enter();

        for (index, entry) in self.entries.iter().enumerate() {
            if (entry.predicate)(&ctx) {
                debug!(entry = index, "predicate matched, invoking handler");
                (entry.handler)(Arc::clone(&ctx)).await;
                return true;
            }
        }

        if let Some(fallback) = &self.fallback {
            if (fallback.predicate)(&ctx) {
                debug!("no entry matched, invoking fallback handler");
                (fallback.handler)(Arc::clone(&ctx)).await;
                return true;
            }
        }

        trace!("no handler matched");
        false
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &self.entries.len())
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}
