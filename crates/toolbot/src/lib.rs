//! # Toolbot
//!
//! A Messenger bot handler registry and database resolver for Rust.
//!
//! ## Overview
//!
//! Toolbot gives a bot process its two leaf utilities: classifying incoming
//! Messenger events into the right handler, and resolving a process-wide
//! database handle that degrades gracefully when no server is reachable.
//!
//! ## Architecture
//!
//! Events flow through an ordered registry, first match wins:
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────────┐     ┌───────────────────┐
//! │   Webhook    │────▶│ MessengerHandler-    │────▶│ first matching    │
//! │   receiver   │     │ Builder (registry)   │     │ handler, or the   │
//! └──────────────┘     └──────────────────────┘     │ guarded fallback  │
//!                                                   └───────────────────┘
//! ```
//!
//! - **toolbot-core**: Messenger event model, context, payload constants
//! - **toolbot-framework**: pattern matching, handler registry, builder
//! - **toolbot-store**: database handle trait, live/mock adapters, resolver
//! - **toolbot-runtime**: configuration loading and logging setup
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use toolbot::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = load_config().expect("config");
//!     init_from_config(&config.logging);
//!
//!     let resolver = Arc::new(config.database.resolver());
//!
//!     let builder = MessengerHandlerBuilder::new()
//!         .on_get_started(|_ctx| async { /* welcome */ })
//!         .on_text("hello", |_ctx| async { /* greet */ })
//!         .on_unhandled(|_ctx| async { /* help */ });
//!
//!     // For each webhook entry parsed by the receiving layer:
//!     let ctx = Arc::new(Context::new(event));
//!     builder.dispatch(ctx).await;
//! }
//! ```

pub use toolbot_core as core;
pub use toolbot_framework as framework;
pub use toolbot_runtime as runtime;
pub use toolbot_store as store;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use toolbot::prelude::*;
/// ```
pub mod prelude {
    // Event model and context
    pub use toolbot_core::{Context, MessengerEvent, payload};

    // Handler registration and dispatch
    pub use toolbot_framework::{HandlerRegistry, MessengerHandlerBuilder, Pattern, into_handler};

    // Database resolution
    pub use toolbot_store::{
        CollectionHandle, DEFAULT_MONGO_URL, DatabaseHandle, DatabaseResolver,
    };

    // Process setup
    pub use toolbot_runtime::{ToolbotConfig, init_from_config, load_config};
}
