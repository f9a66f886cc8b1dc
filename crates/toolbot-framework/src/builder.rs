//! Messenger handler builder.
//!
//! [`MessengerHandlerBuilder`] wraps a [`HandlerRegistry`] and layers the
//! Messenger-specific convenience registrants on top. Each registrant builds
//! a composite predicate — a conjunction of an event-category check and the
//! caller's predicate or pattern — and appends it through
//! [`on`](MessengerHandlerBuilder::on). All registrants are chainable.
//!
//! # Example
//!
//! ```rust,ignore
//! use toolbot_framework::MessengerHandlerBuilder;
//!
//! let builder = MessengerHandlerBuilder::new()
//!     .on_get_started(welcome)
//!     .on_text("price", price_handler)
//!     .on_payload("BUY", buy_handler)
//!     .on_unhandled(help_handler);
//!
//! builder.dispatch(ctx).await;
//! ```

use std::sync::Arc;

use toolbot_core::{Context, payload};

use crate::pattern::Pattern;
use crate::registry::HandlerRegistry;

/// Builder registering Messenger event handlers onto a [`HandlerRegistry`].
#[derive(Debug, Default)]
pub struct MessengerHandlerBuilder {
    registry: HandlerRegistry,
}

impl MessengerHandlerBuilder {
    /// Creates a new builder with an empty registry.
    pub fn new() -> Self {
        Self {
            registry: HandlerRegistry::new(),
        }
    }

    /// Registers a raw predicate/handler pair.
    pub fn on<P, F, Fut>(mut self, predicate: P, handler: F) -> Self
    where
        P: Fn(&Context) -> bool + Send + Sync + 'static,
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.registry = self.registry.on(predicate, handler);
        self
    }

    /// Registers a handler for non-echo message events passing `predicate`.
    pub fn on_message<P, F, Fut>(self, predicate: P, handler: F) -> Self
    where
        P: Fn(&Context) -> bool + Send + Sync + 'static,
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on(
            move |ctx| ctx.event().is_message() && !ctx.event().is_echo() && predicate(ctx),
            handler,
        )
    }

    /// Registers a handler for text messages whose text matches `pattern`.
    ///
    /// Echoed messages never match, even with matching text.
    pub fn on_text<F, Fut>(self, pattern: impl Into<Pattern>, handler: F) -> Self
    where
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let pattern = pattern.into();
        self.on_message(
            move |ctx| {
                let event = ctx.event();
                event.is_text_message()
                    && !event.is_echo()
                    && pattern.matches_opt(event.text())
            },
            handler,
        )
    }

    /// Registers a handler for postback events passing `predicate`.
    pub fn on_postback<P, F, Fut>(self, predicate: P, handler: F) -> Self
    where
        P: Fn(&Context) -> bool + Send + Sync + 'static,
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on(
            move |ctx| ctx.event().is_postback() && predicate(ctx),
            handler,
        )
    }

    /// Registers a handler for a developer payload matching `pattern`.
    ///
    /// Matches either a postback payload or, on a message event, the payload
    /// of a tapped quick reply — whichever applies to the incoming event.
    pub fn on_payload<F, Fut>(self, pattern: impl Into<Pattern>, handler: F) -> Self
    where
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let pattern = pattern.into();
        self.on(
            move |ctx| {
                let event = ctx.event();
                if event.is_postback() && pattern.matches_opt(event.postback_payload()) {
                    return true;
                }
                event.is_message() && pattern.matches_opt(event.quick_reply_payload())
            },
            handler,
        )
    }

    /// Registers a handler for the Get Started button.
    ///
    /// Sugar for [`on_payload`](Self::on_payload) against
    /// [`payload::GET_STARTED`].
    pub fn on_get_started<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_payload(payload::GET_STARTED, handler)
    }

    /// Registers a handler for quick-reply messages passing `predicate`.
    pub fn on_quick_reply<P, F, Fut>(self, predicate: P, handler: F) -> Self
    where
        P: Fn(&Context) -> bool + Send + Sync + 'static,
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_message(
            move |ctx| ctx.event().quick_reply_payload().is_some() && predicate(ctx),
            handler,
        )
    }

    /// Registers a handler for echoed messages passing `predicate`.
    pub fn on_echo<P, F, Fut>(self, predicate: P, handler: F) -> Self
    where
        P: Fn(&Context) -> bool + Send + Sync + 'static,
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on(move |ctx| ctx.event().is_echo() && predicate(ctx), handler)
    }

    /// Registers a handler for echoed messages whose text matches `pattern`.
    pub fn on_echo_text<F, Fut>(self, pattern: impl Into<Pattern>, handler: F) -> Self
    where
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let pattern = pattern.into();
        self.on(
            // FIXME: duplicates the echo guard instead of going through on_echo
            move |ctx| ctx.event().is_echo() && pattern.matches_opt(ctx.event().text()),
            handler,
        )
    }

    /// Registers a handler for read receipts passing `predicate`.
    pub fn on_read<P, F, Fut>(self, predicate: P, handler: F) -> Self
    where
        P: Fn(&Context) -> bool + Send + Sync + 'static,
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on(move |ctx| ctx.event().is_read() && predicate(ctx), handler)
    }

    /// Registers a handler for delivery receipts passing `predicate`.
    pub fn on_delivery<P, F, Fut>(self, predicate: P, handler: F) -> Self
    where
        P: Fn(&Context) -> bool + Send + Sync + 'static,
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on(
            move |ctx| ctx.event().is_delivery() && predicate(ctx),
            handler,
        )
    }

    /// Sets the fallback handler for otherwise unmatched events.
    ///
    /// The fallback never intercepts echo, read-receipt, or delivery-receipt
    /// events, even when nothing else matched them.
    pub fn on_unhandled<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(Arc<Context>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.registry = self.registry.fallback(
            |ctx| {
                let event = ctx.event();
                !event.is_echo() && !event.is_read() && !event.is_delivery()
            },
            handler,
        );
        self
    }

    /// Dispatches a context through the underlying registry.
    ///
    /// Returns `true` if any handler ran.
    pub async fn dispatch(&self, ctx: Arc<Context>) -> bool {
        self.registry.dispatch(ctx).await
    }

    /// Returns a reference to the underlying registry.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Consumes the builder, returning the underlying registry.
    pub fn into_registry(self) -> HandlerRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use toolbot_core::MessengerEvent;

    fn ctx(value: serde_json::Value) -> Arc<Context> {
        Arc::new(Context::new(MessengerEvent::from_json(value).unwrap()))
    }

    fn text_message(text: &str) -> Arc<Context> {
        ctx(json!({ "message": { "mid": "mid.1", "text": text } }))
    }

    fn echo_message(text: &str) -> Arc<Context> {
        ctx(json!({ "message": { "mid": "mid.1", "text": text, "is_echo": true } }))
    }

    fn postback(payload: &str) -> Arc<Context> {
        ctx(json!({ "postback": { "payload": payload } }))
    }

    fn quick_reply(payload: &str) -> Arc<Context> {
        ctx(json!({ "message": { "mid": "mid.1", "text": "picked", "quick_reply": { "payload": payload } } }))
    }

    fn read_receipt() -> Arc<Context> {
        ctx(json!({ "read": { "watermark": 1 } }))
    }

    fn delivery_receipt() -> Arc<Context> {
        ctx(json!({ "delivery": { "mids": [], "watermark": 1 } }))
    }

    fn counting_handler(
        counter: &Arc<AtomicUsize>,
    ) -> impl Fn(Arc<Context>) -> futures::future::Ready<()> + Send + Sync + 'static {
        let counter = Arc::clone(counter);
        move |_ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
            futures::future::ready(())
        }
    }

    #[tokio::test]
    async fn on_text_fires_on_exact_match_only() {
        let counter = Arc::new(AtomicUsize::new(0));
        let builder = MessengerHandlerBuilder::new().on_text("hello", counting_handler(&counter));

        assert!(builder.dispatch(text_message("hello")).await);
        assert!(!builder.dispatch(text_message("hello world")).await);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn on_text_ignores_echoes_with_matching_text() {
        let counter = Arc::new(AtomicUsize::new(0));
        let builder = MessengerHandlerBuilder::new().on_text("hello", counting_handler(&counter));

        assert!(!builder.dispatch(echo_message("hello")).await);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn on_text_accepts_regex_patterns() {
        let counter = Arc::new(AtomicUsize::new(0));
        let builder = MessengerHandlerBuilder::new().on_text(
            Regex::new(r"^order \d+$").unwrap(),
            counting_handler(&counter),
        );

        assert!(builder.dispatch(text_message("order 42")).await);
        assert!(!builder.dispatch(text_message("order forty-two")).await);
    }

    #[tokio::test]
    async fn on_payload_matches_postback_and_quick_reply() {
        let counter = Arc::new(AtomicUsize::new(0));
        let builder =
            MessengerHandlerBuilder::new().on_payload("PAYLOAD_X", counting_handler(&counter));

        assert!(builder.dispatch(postback("PAYLOAD_X")).await);
        assert!(builder.dispatch(quick_reply("PAYLOAD_X")).await);
        assert!(!builder.dispatch(postback("PAYLOAD_Y")).await);
        assert!(!builder.dispatch(text_message("PAYLOAD_X")).await);

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn on_get_started_matches_the_fixed_payload() {
        let counter = Arc::new(AtomicUsize::new(0));
        let builder = MessengerHandlerBuilder::new().on_get_started(counting_handler(&counter));

        assert!(builder.dispatch(postback(payload::GET_STARTED)).await);
        assert!(!builder.dispatch(postback("SOMETHING_ELSE")).await);
    }

    #[tokio::test]
    async fn on_quick_reply_requires_a_quick_reply() {
        let counter = Arc::new(AtomicUsize::new(0));
        let builder =
            MessengerHandlerBuilder::new().on_quick_reply(|_| true, counting_handler(&counter));

        assert!(builder.dispatch(quick_reply("ANY")).await);
        assert!(!builder.dispatch(text_message("no quick reply")).await);
    }

    #[tokio::test]
    async fn on_echo_text_matches_only_echoes() {
        let counter = Arc::new(AtomicUsize::new(0));
        let builder =
            MessengerHandlerBuilder::new().on_echo_text("hello", counting_handler(&counter));

        assert!(builder.dispatch(echo_message("hello")).await);
        assert!(!builder.dispatch(text_message("hello")).await);
    }

    #[tokio::test]
    async fn on_read_and_on_delivery_gate_on_category() {
        let reads = Arc::new(AtomicUsize::new(0));
        let deliveries = Arc::new(AtomicUsize::new(0));
        let builder = MessengerHandlerBuilder::new()
            .on_read(|_| true, counting_handler(&reads))
            .on_delivery(|_| true, counting_handler(&deliveries));

        builder.dispatch(read_receipt()).await;
        builder.dispatch(delivery_receipt()).await;
        builder.dispatch(text_message("hi")).await;

        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert_eq!(deliveries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn on_unhandled_skips_echo_read_and_delivery() {
        let counter = Arc::new(AtomicUsize::new(0));
        let builder = MessengerHandlerBuilder::new().on_unhandled(counting_handler(&counter));

        assert!(!builder.dispatch(echo_message("hello")).await);
        assert!(!builder.dispatch(read_receipt()).await);
        assert!(!builder.dispatch(delivery_receipt()).await);
        assert!(builder.dispatch(text_message("hello")).await);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn first_registered_entry_wins() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let builder = MessengerHandlerBuilder::new()
            .on_text("hello", counting_handler(&first))
            .on_message(|_| true, counting_handler(&second));

        builder.dispatch(text_message("hello")).await;

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unsupported_dynamic_pattern_never_fires() {
        let counter = Arc::new(AtomicUsize::new(0));
        let builder = MessengerHandlerBuilder::new()
            .on_text(Pattern::from_value(&json!(42)), counting_handler(&counter));

        assert!(!builder.dispatch(text_message("42")).await);
        assert_eq!(builder.registry().handler_count(), 1);
    }

    #[tokio::test]
    async fn registrants_are_chainable() {
        let counter = Arc::new(AtomicUsize::new(0));
        let builder = MessengerHandlerBuilder::new()
            .on_get_started(counting_handler(&counter))
            .on_text("a", counting_handler(&counter))
            .on_payload("B", counting_handler(&counter))
            .on_unhandled(counting_handler(&counter));

        assert_eq!(builder.registry().handler_count(), 3);
        assert!(builder.registry().has_fallback());
    }
}
