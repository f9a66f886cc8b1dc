//! # Toolbot Core
//!
//! Foundation types for the Toolbot Messenger framework.
//!
//! This crate provides the pieces every other layer builds on:
//!
//! - **Event model**: serde types for a Messenger webhook messaging entry
//!   ([`MessengerEvent`]) plus the classification flags and payload accessors
//!   handler predicates branch on
//! - **Context**: the read-only per-dispatch object shared with predicates
//!   and handlers ([`Context`])
//! - **Payload constants**: well-known developer payloads ([`payload`])
//!
//! Dispatch itself lives in `toolbot-framework`; persistence lives in
//! `toolbot-store`. Core has no opinion about either.

pub mod context;
pub mod error;
pub mod event;
pub mod payload;

pub use context::Context;
pub use error::{EventError, EventResult};
pub use event::{
    DeliveryReceipt, Message, MessengerEvent, Participant, Postback, QuickReply, ReadReceipt,
};
