// SPDX-License-Identifier: GPL-3.0-only

//! Cross-frame message protocol.
//!
//! The embedded frame talks to the widget through `postMessage`. Everything
//! arriving here is untrusted: messages from a foreign origin, bodies that
//! are not JSON and unknown topics are discarded without any side effect.
//!
//! # Protocol
//!
//! Inbound (frame -> widget):
//! - `{"topic": "exitCE"}`: the user left the remote experience
//! - `{"topic": "event", "payload": {"eventType": "..."}}`: analytics event
//! - `{"topic": "hideCloseButton"}`: the frame finished initializing and
//!   listens for messages
//!
//! Outbound (widget -> frame):
//! - `{"topic": "ce_login_redirect", "payload": "<path>"}`: sent in reply to
//!   `hideCloseButton`, which is the first point at which the frame is known
//!   to be listening

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::app_settings::UTM_MEDIUM;

/// Messages accepted from the embedded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Close the widget.
    ExitExperience,
    /// Forward an event to `onMessage`.
    Event { event_type: String },
    /// The frame is ready to receive the login redirect.
    HideCloseButton,
}

/// Messages sent into the embedded frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "topic", content = "payload")]
pub enum OutboundMessage {
    /// Path the frame should continue to after login.
    #[serde(rename = "ce_login_redirect")]
    LoginRedirect(String),
}

impl OutboundMessage {
    /// Builds the login redirect for a receive country and app.
    pub fn login_redirect(default_receive_country: &str, app_id: &str) -> Self {
        Self::LoginRedirect(format!(
            "{}/{}?utm_medium={}&utm_source={}",
            default_receive_country, app_id, UTM_MEDIUM, app_id
        ))
    }
}

/// Why an inbound message was dropped.
#[derive(Debug)]
pub enum Discard {
    /// The sender's origin is not part of the frame address.
    ForeignOrigin(String),
    /// The body is not a JSON envelope.
    Malformed(serde_json::Error),
    /// The payload does not fit the topic.
    InvalidPayload {
        topic: String,
        source: serde_json::Error,
    },
    /// The topic is not part of the protocol.
    UnknownTopic(String),
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discard::ForeignOrigin(origin) => write!(f, "message from foreign origin '{}'", origin),
            Discard::Malformed(e) => write!(f, "malformed message body: {}", e),
            Discard::InvalidPayload { topic, source } => {
                write!(f, "invalid payload for topic '{}': {}", topic, source)
            }
            Discard::UnknownTopic(topic) => write!(f, "unknown topic '{}'", topic),
        }
    }
}

impl std::error::Error for Discard {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Discard::Malformed(e) => Some(e),
            Discard::InvalidPayload { source, .. } => Some(source),
            Discard::ForeignOrigin(_) | Discard::UnknownTopic(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    topic: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct EventPayload {
    #[serde(rename = "eventType")]
    event_type: String,
}

/// Returns true when `origin` may talk to a frame loaded from `target_url`.
///
/// The origin must occur in the frame address. An empty origin never matches.
#[must_use]
pub fn origin_allowed(target_url: &str, origin: &str) -> bool {
    !origin.is_empty() && target_url.contains(origin)
}

/// Validates and parses one inbound message.
pub fn decode(target_url: &str, origin: &str, data: &str) -> Result<InboundMessage, Discard> {
    if !origin_allowed(target_url, origin) {
        return Err(Discard::ForeignOrigin(origin.to_string()));
    }

    let envelope: Envelope = serde_json::from_str(data).map_err(Discard::Malformed)?;

    match envelope.topic.as_str() {
        "exitCE" => Ok(InboundMessage::ExitExperience),
        "hideCloseButton" => Ok(InboundMessage::HideCloseButton),
        "event" => {
            let payload: EventPayload =
                serde_json::from_value(envelope.payload).map_err(|source| Discard::InvalidPayload {
                    topic: envelope.topic.clone(),
                    source,
                })?;
            Ok(InboundMessage::Event {
                event_type: payload.event_type,
            })
        }
        _ => Err(Discard::UnknownTopic(envelope.topic)),
    }
}
