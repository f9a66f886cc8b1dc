//! # Toolbot Store
//!
//! Database layer for the Toolbot framework: a lazy, process-wide
//! connection resolver with a no-op fallback.
//!
//! The design is a single trait with three implementations:
//!
//! - [`DatabaseHandle`] — the operation surface (collection access,
//!   collection lifecycle, index management)
//! - [`MongoHandle`] — the live adapter over the official driver
//! - [`MockHandle`] — the no-op stand-in substituted when the connection
//!   attempt fails
//! - [`ScopedHandle`] — a pass-through view qualifying collection names
//!   with a scope prefix
//!
//! [`DatabaseResolver`] ties them together: connect once, memoize the
//! outcome (including the in-flight attempt, so concurrent first callers
//! share one connection attempt), absorb failure by substituting the mock.
//! `resolve()` is total — callers always get a usable handle.

pub mod error;
pub mod handle;
pub mod live;
pub mod mock;
pub mod resolver;
pub mod scoped;

pub use error::{StoreError, StoreResult};
pub use handle::{CollectionHandle, DatabaseHandle};
pub use live::{DEFAULT_DATABASE, MongoHandle};
pub use mock::{MockCollection, MockHandle};
pub use resolver::{DEFAULT_MONGO_URL, DatabaseResolver, MONGO_URL_ENV};
pub use scoped::ScopedHandle;
