//! Lazy connection resolver with mock fallback.
//!
//! [`DatabaseResolver`] establishes the process's database connection
//! exactly once. The first call to [`resolve`](DatabaseResolver::resolve)
//! attempts to connect using the configured URL (explicit override, then
//! the `MONGO_URL` environment variable, then the local default); every
//! later call — and every caller racing the first — observes the same
//! memoized handle. The in-flight attempt itself is memoized, so concurrent
//! first callers share a single connection attempt rather than each opening
//! their own.
//!
//! Connection failure is fully absorbed: the resolver logs a warning and
//! memoizes a [`MockHandle`] with the same operation surface. Callers never
//! observe an error from `resolve()`, and once resolved — live or mock —
//! the resolver never re-attempts the connection.
//!
//! # Example
//!
//! ```rust,ignore
//! use toolbot_store::DatabaseResolver;
//!
//! let resolver = DatabaseResolver::new();
//! let db = resolver.resolve().await;
//! db.collection("users").await?.insert(doc! { "id": "1234" }).await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::handle::DatabaseHandle;
use crate::live::MongoHandle;
use crate::mock::MockHandle;
use crate::scoped::ScopedHandle;

/// Connection string used when `MONGO_URL` is absent or empty.
pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017/toolbot";

/// Environment variable consulted for the connection string.
pub const MONGO_URL_ENV: &str = "MONGO_URL";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Lazily resolves a process-wide database handle, falling back to a mock.
pub struct DatabaseResolver {
    url: Option<String>,
    connect_timeout: Duration,
    handle: OnceCell<Arc<dyn DatabaseHandle>>,
}

impl Default for DatabaseResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseResolver {
    /// Creates a resolver that reads its URL from the environment.
    pub fn new() -> Self {
        Self {
            url: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            handle: OnceCell::new(),
        }
    }

    /// Creates a resolver with an explicit connection string, bypassing the
    /// environment lookup.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            handle: OnceCell::new(),
        }
    }

    /// Sets the bound on the connection attempt.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Returns the connection string this resolver will attempt.
    pub fn url(&self) -> String {
        match &self.url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => url_from_env(),
        }
    }

    /// Resolves the database handle, connecting on first call.
    ///
    /// Always returns a usable handle: the live adapter when the connection
    /// succeeds, the mock otherwise. There is no retry, reconnect, or
    /// invalidation path — the first outcome is the process's outcome.
    pub async fn resolve(&self) -> Arc<dyn DatabaseHandle> {
        self.handle
            .get_or_init(|| async {
                let url = self.url();
                match MongoHandle::connect(&url, self.connect_timeout).await {
                    Ok(handle) => {
                        debug!(database = handle.name(), "connected to mongodb");
                        Arc::new(handle) as Arc<dyn DatabaseHandle>
                    }
                    Err(error) => {
                        warn!(
                            %url,
                            %error,
                            "failed to connect to mongodb, falling back to mock handle"
                        );
                        Arc::new(MockHandle::new())
                    }
                }
            })
            .await
            .clone()
    }

    /// Resolves the handle and narrows it to a scope-qualified view.
    pub async fn resolve_scoped(&self, scope: &str) -> Arc<dyn DatabaseHandle> {
        Arc::new(ScopedHandle::new(self.resolve().await, scope))
    }
}

/// Reads the connection string from the environment, defaulting when the
/// variable is absent or empty.
fn url_from_env() -> String {
    effective_url(std::env::var(MONGO_URL_ENV).ok())
}

/// URL selection rule: a set, non-empty value is used verbatim; anything
/// else yields [`DEFAULT_MONGO_URL`].
fn effective_url(value: Option<String>) -> String {
    match value {
        Some(url) if !url.is_empty() => url,
        _ => DEFAULT_MONGO_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 1 is never a mongod; connection attempts fail fast.
    const UNREACHABLE_URL: &str = "mongodb://127.0.0.1:1/toolbot";

    fn failing_resolver() -> DatabaseResolver {
        DatabaseResolver::with_url(UNREACHABLE_URL).connect_timeout(Duration::from_millis(200))
    }

    #[test]
    fn unset_or_empty_env_value_yields_the_default_url() {
        assert_eq!(effective_url(None), DEFAULT_MONGO_URL);
        assert_eq!(effective_url(Some(String::new())), DEFAULT_MONGO_URL);
    }

    #[test]
    fn set_env_value_is_used_verbatim() {
        assert_eq!(
            effective_url(Some("mongodb://db.internal:27017/bot".to_string())),
            "mongodb://db.internal:27017/bot"
        );
    }

    #[test]
    fn explicit_url_bypasses_the_environment() {
        let resolver = DatabaseResolver::with_url(UNREACHABLE_URL);
        assert_eq!(resolver.url(), UNREACHABLE_URL);
    }

    #[tokio::test]
    async fn connection_failure_falls_back_to_the_mock() {
        let resolver = failing_resolver();
        let handle = resolver.resolve().await;
        assert!(handle.is_mock());

        // The mock still exposes the full operation surface.
        let collection = handle.collection("users").await.unwrap();
        assert_eq!(collection.name(), "users");
    }

    #[tokio::test]
    async fn unparseable_url_falls_back_to_the_mock() {
        let resolver = DatabaseResolver::with_url("not a connection string");
        let handle = resolver.resolve().await;
        assert!(handle.is_mock());
    }

    #[tokio::test]
    async fn resolve_memoizes_the_handle() {
        let resolver = failing_resolver();
        let first = resolver.resolve().await;
        let second = resolver.resolve().await;
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn concurrent_first_callers_observe_the_same_handle() {
        let resolver = Arc::new(failing_resolver());
        let (a, b, c) = tokio::join!(resolver.resolve(), resolver.resolve(), resolver.resolve());
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&b, &c));
    }

    #[tokio::test]
    async fn resolve_scoped_wraps_the_memoized_handle() {
        let resolver = failing_resolver();
        let scoped = resolver.resolve_scoped("sessions").await;
        assert!(scoped.is_mock());

        let collection = scoped.collection("users").await.unwrap();
        assert_eq!(collection.name(), "sessions.users");
    }
}
