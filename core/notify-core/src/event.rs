//! Host event envelope and the typed event union.
//!
//! The host delivers events as `{"type": "...", "properties": {...}}`. The
//! envelope is parsed permissively (any kind, any property bag) and then
//! mapped to the closed [`Event`] union the router dispatches on.

use serde::Deserialize;

/// Raw event payload as delivered by the host runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub properties: EventProperties,
}

/// Kind-specific property bag. Only the fields this plugin reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventProperties {
    #[serde(default, rename = "sessionID")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The host events this plugin reacts to.
///
/// Event kinds the policy does not cover land in `Unknown` so the router can
/// ignore them explicitly rather than by omission.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SessionIdle {
        session_id: String,
    },
    SessionError {
        session_id: String,
        error: Option<String>,
    },
    PermissionUpdated,
    Unknown {
        event_type: String,
    },
}

impl EventEnvelope {
    /// Maps the raw envelope to a typed event.
    ///
    /// Idle and error events carry a session correlation id; an envelope
    /// missing it maps to `None` and is dropped by the caller.
    pub fn to_event(&self) -> Option<Event> {
        match self.event_type.as_str() {
            "session.idle" => self
                .properties
                .session_id
                .clone()
                .map(|session_id| Event::SessionIdle { session_id }),
            "session.error" => {
                self.properties
                    .session_id
                    .clone()
                    .map(|session_id| Event::SessionError {
                        session_id,
                        error: self.properties.error.clone(),
                    })
            }
            "permission.updated" => Some(Event::PermissionUpdated),
            other => Some(Event::Unknown {
                event_type: other.to_string(),
            }),
        }
    }
}
