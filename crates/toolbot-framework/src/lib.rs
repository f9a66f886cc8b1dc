//! # Toolbot Framework
//!
//! Handler registration and dispatch for the Toolbot Messenger framework.
//!
//! This layer provides:
//! - An ordered predicate/handler registry with first-match-wins dispatch
//!   and a guarded fallback ([`HandlerRegistry`])
//! - The Messenger convenience registrants (`on_text`, `on_payload`,
//!   `on_get_started`, …) layered on top ([`MessengerHandlerBuilder`])
//! - Pattern matching for text and payload registrants ([`Pattern`])
//! - Handler normalization into a uniform boxed shape ([`into_handler`])
//!
//! Dispatch is synchronous per context: exactly one handler (or the
//! fallback, or nothing) runs for each incoming event, and the registry
//! never raises an error for unmatched events.

pub mod builder;
pub mod handler;
pub mod pattern;
pub mod registry;

pub use builder::MessengerHandlerBuilder;
pub use handler::{BoxedHandler, into_handler};
pub use pattern::Pattern;
pub use registry::{HandlerRegistry, Predicate};
