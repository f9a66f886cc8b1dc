//! Messenger webhook event model.
//!
//! A [`MessengerEvent`] is one messaging entry from a webhook callback,
//! already split out of the page-level envelope by the receiving layer.
//! Exactly one of the payload fields (`message`, `postback`, `read`,
//! `delivery`) is populated for a well-formed entry; the classification
//! methods ([`is_message`](MessengerEvent::is_message) and friends) are what
//! handler predicates branch on.
//!
//! # Example
//!
//! ```rust,ignore
//! use toolbot_core::MessengerEvent;
//!
//! let event = MessengerEvent::from_json(serde_json::json!({
//!     "sender": { "id": "1234" },
//!     "message": { "mid": "mid.1", "text": "hello" },
//! }))?;
//!
//! assert!(event.is_message());
//! assert!(event.is_text_message());
//! assert_eq!(event.text(), Some("hello"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EventError, EventResult};

// ============================================================================
// Shared Types
// ============================================================================

/// A conversation participant (sender or recipient).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Participant {
    /// Page-scoped user ID.
    pub id: String,
}

/// A quick-reply selection attached to an incoming message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickReply {
    /// Developer-defined payload of the tapped quick reply.
    pub payload: String,
}

/// An incoming (or echoed) message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    /// Message ID.
    #[serde(default)]
    pub mid: Option<String>,
    /// Plain text content, absent for attachment-only messages.
    #[serde(default)]
    pub text: Option<String>,
    /// Set when the message is an echo of something the page itself sent.
    #[serde(default)]
    pub is_echo: bool,
    /// ID of the app the echoed message was sent from.
    #[serde(default)]
    pub app_id: Option<i64>,
    /// Quick-reply selection, when the message was produced by tapping one.
    #[serde(default)]
    pub quick_reply: Option<QuickReply>,
    /// Sticker ID for sticker messages.
    #[serde(default)]
    pub sticker_id: Option<i64>,
    /// Raw attachment objects, kept unparsed.
    #[serde(default)]
    pub attachments: Vec<Value>,
}

/// A postback raised by a button or persistent-menu tap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Postback {
    /// Button title, when the platform supplies one.
    #[serde(default)]
    pub title: Option<String>,
    /// Developer-defined payload of the tapped button.
    pub payload: String,
}

/// A read receipt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadReceipt {
    /// All messages up to this timestamp were read.
    #[serde(default)]
    pub watermark: i64,
    /// Legacy sequence number.
    #[serde(default)]
    pub seq: Option<i64>,
}

/// A delivery receipt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// IDs of the delivered messages.
    #[serde(default)]
    pub mids: Vec<String>,
    /// All messages up to this timestamp were delivered.
    #[serde(default)]
    pub watermark: i64,
    /// Legacy sequence number.
    #[serde(default)]
    pub seq: Option<i64>,
}

// ============================================================================
// MessengerEvent
// ============================================================================

/// A single messaging entry from a Messenger webhook callback.
///
/// The payload fields are mutually exclusive in practice; the model does not
/// enforce that so malformed entries still deserialize and simply fail every
/// classification check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessengerEvent {
    /// Sending participant.
    #[serde(default)]
    pub sender: Option<Participant>,
    /// Receiving participant (the page).
    #[serde(default)]
    pub recipient: Option<Participant>,
    /// Entry timestamp in epoch milliseconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Message payload.
    #[serde(default)]
    pub message: Option<Message>,
    /// Postback payload.
    #[serde(default)]
    pub postback: Option<Postback>,
    /// Read-receipt payload.
    #[serde(default)]
    pub read: Option<ReadReceipt>,
    /// Delivery-receipt payload.
    #[serde(default)]
    pub delivery: Option<DeliveryReceipt>,
}

impl MessengerEvent {
    /// Deserializes an event from a raw webhook JSON value.
    pub fn from_json(value: Value) -> EventResult<Self> {
        serde_json::from_value(value).map_err(|e| EventError::Parse {
            reason: e.to_string(),
        })
    }

    // ─── Classification ──────────────────────────────────────────────────────

    /// Returns `true` if this entry carries a message payload.
    ///
    /// Echoed messages also count as messages; registrants that should skip
    /// them combine this with [`is_echo`](Self::is_echo).
    pub fn is_message(&self) -> bool {
        self.message.is_some()
    }

    /// Returns `true` if the message is an echo of something the page sent.
    pub fn is_echo(&self) -> bool {
        self.message.as_ref().is_some_and(|m| m.is_echo)
    }

    /// Returns `true` if the entry carries a message with text content.
    pub fn is_text_message(&self) -> bool {
        self.message.as_ref().is_some_and(|m| m.text.is_some())
    }

    /// Returns `true` if this entry carries a postback payload.
    pub fn is_postback(&self) -> bool {
        self.postback.is_some()
    }

    /// Returns `true` if this entry is a read receipt.
    pub fn is_read(&self) -> bool {
        self.read.is_some()
    }

    /// Returns `true` if this entry is a delivery receipt.
    pub fn is_delivery(&self) -> bool {
        self.delivery.is_some()
    }

    // ─── Payload accessors ───────────────────────────────────────────────────

    /// Text content of the message, if any.
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref()?.text.as_deref()
    }

    /// Payload of the tapped quick reply, if any.
    pub fn quick_reply_payload(&self) -> Option<&str> {
        Some(self.message.as_ref()?.quick_reply.as_ref()?.payload.as_str())
    }

    /// Payload of the tapped postback button, if any.
    pub fn postback_payload(&self) -> Option<&str> {
        Some(self.postback.as_ref()?.payload.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_text_message() {
        let event = MessengerEvent::from_json(json!({
            "sender": { "id": "1234" },
            "recipient": { "id": "5678" },
            "timestamp": 1458692752478_i64,
            "message": { "mid": "mid.1457764197618:41d102a3e1ae206a38", "text": "hello" },
        }))
        .unwrap();

        assert!(event.is_message());
        assert!(event.is_text_message());
        assert!(!event.is_echo());
        assert!(!event.is_postback());
        assert_eq!(event.text(), Some("hello"));
        assert_eq!(event.quick_reply_payload(), None);
    }

    #[test]
    fn parses_echo_message() {
        let event = MessengerEvent::from_json(json!({
            "message": { "is_echo": true, "app_id": 1517776481860111_i64, "text": "hello" },
        }))
        .unwrap();

        assert!(event.is_message());
        assert!(event.is_echo());
        assert!(event.is_text_message());
    }

    #[test]
    fn parses_quick_reply() {
        let event = MessengerEvent::from_json(json!({
            "message": {
                "mid": "mid.2",
                "text": "Red",
                "quick_reply": { "payload": "PICK_RED" },
            },
        }))
        .unwrap();

        assert_eq!(event.quick_reply_payload(), Some("PICK_RED"));
    }

    #[test]
    fn parses_postback() {
        let event = MessengerEvent::from_json(json!({
            "postback": { "title": "Get Started", "payload": "__GET_STARTED__" },
        }))
        .unwrap();

        assert!(event.is_postback());
        assert!(!event.is_message());
        assert_eq!(event.postback_payload(), Some("__GET_STARTED__"));
    }

    #[test]
    fn parses_read_and_delivery_receipts() {
        let read = MessengerEvent::from_json(json!({
            "read": { "watermark": 1458668856253_i64, "seq": 38 },
        }))
        .unwrap();
        assert!(read.is_read());
        assert!(!read.is_delivery());

        let delivery = MessengerEvent::from_json(json!({
            "delivery": { "mids": ["mid.3"], "watermark": 1458668856253_i64 },
        }))
        .unwrap();
        assert!(delivery.is_delivery());
        assert!(!delivery.is_read());
    }

    #[test]
    fn attachment_message_is_not_text() {
        let event = MessengerEvent::from_json(json!({
            "message": { "mid": "mid.4", "attachments": [{ "type": "image" }] },
        }))
        .unwrap();

        assert!(event.is_message());
        assert!(!event.is_text_message());
        assert_eq!(event.text(), None);
    }

    #[test]
    fn rejects_malformed_entry() {
        let err = MessengerEvent::from_json(json!({ "postback": { "payload": 42 } }));
        assert!(err.is_err());
    }
}
