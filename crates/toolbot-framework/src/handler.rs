//! Handler normalization.
//!
//! Handlers are plain async functions over an `Arc<Context>`. Before they
//! are stored in a registry they are normalized into a [`BoxedHandler`] — a
//! type-erased closure that can be invoked uniformly regardless of the
//! concrete function or future type behind it.
//!
//! # Example
//!
//! ```rust,ignore
//! use toolbot_framework::into_handler;
//!
//! let handler = into_handler(|ctx| async move {
//!     println!("got: {:?}", ctx.event().text());
//! });
//! handler(ctx).await;
//! ```

use std::sync::Arc;

use futures::future::BoxFuture;

use toolbot_core::Context;

/// A type-erased handler that can be stored in collections.
///
/// Internally a closure that captures the original handler and boxes the
/// future it produces on each invocation.
pub type BoxedHandler = Arc<dyn Fn(Arc<Context>) -> BoxFuture<'static, ()> + Send + Sync>;

/// Normalizes an async handler function into a [`BoxedHandler`].
pub fn into_handler<F, Fut>(f: F) -> BoxedHandler
where
    F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move |ctx| -> BoxFuture<'static, ()> { Box::pin(f(ctx)) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn normalized_handler_is_invocable() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let handler = into_handler(move |_ctx| {
            let c = Arc::clone(&counter_clone);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        });

        let ctx = Arc::new(Context::default());
        handler(Arc::clone(&ctx)).await;
        handler(ctx).await;

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
