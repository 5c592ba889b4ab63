//! Event routing: demultiplexes host events and applies notification policy.
//!
//! ```text
//! session.idle        -> parent gate -> quiet gate -> "Ready for review"
//! session.error       -> parent gate -> quiet gate -> "Something went wrong"
//! permission.updated  ->                quiet gate -> "Waiting for you"
//! anything else       -> ignored
//! ```
//!
//! The router is stateless across events: each one is evaluated independently
//! against the immutable config, with no memory of prior notifications.

use crate::config::NotifyConfig;
use crate::event::{Event, EventEnvelope};
use crate::notify::{Notification, Notifier};
use crate::quiet_hours;
use crate::session::{is_parent_session, SessionSource};

pub const IDLE_TITLE: &str = "Ready for review";
pub const ERROR_TITLE: &str = "Something went wrong";
pub const PERMISSION_TITLE: &str = "Waiting for you";
pub const PERMISSION_MESSAGE: &str = "OpenCode needs your input";

/// Fallback message when the session title cannot be fetched or is empty.
const FALLBACK_SESSION_TITLE: &str = "Task";

const SESSION_TITLE_MAX_CHARS: usize = 50;
const ERROR_MESSAGE_MAX_CHARS: usize = 100;

pub struct Router<S, N> {
    config: NotifyConfig,
    sessions: S,
    notifier: N,
}

impl<S: SessionSource, N: Notifier> Router<S, N> {
    pub fn new(config: NotifyConfig, sessions: S, notifier: N) -> Self {
        Self {
            config,
            sessions,
            notifier,
        }
    }

    /// Entry point for one host event.
    pub fn handle(&self, envelope: &EventEnvelope) {
        let event = match envelope.to_event() {
            Some(event) => event,
            None => {
                tracing::debug!(
                    event = %envelope.event_type,
                    "Dropping event (missing sessionID)"
                );
                return;
            }
        };
        self.handle_at(event, quiet_hours::local_minute_of_day());
    }

    /// Routes with an explicit clock so the gating is deterministic in tests.
    fn handle_at(&self, event: Event, minute_of_day: u32) {
        match event {
            Event::SessionIdle { session_id } => self.on_idle(&session_id, minute_of_day),
            Event::SessionError { session_id, error } => {
                self.on_error(&session_id, error.as_deref(), minute_of_day)
            }
            Event::PermissionUpdated => self.on_permission(minute_of_day),
            Event::Unknown { event_type } => {
                tracing::debug!(event = %event_type, "Unhandled event");
            }
        }
    }

    /// Parent/child gate: child sessions are suppressed unless the user
    /// opted in. The opt-in short-circuits before any lookup happens.
    fn session_gate(&self, session_id: &str) -> bool {
        self.config.notify_child_sessions || is_parent_session(&self.sessions, session_id)
    }

    fn quiet(&self, minute_of_day: u32) -> bool {
        quiet_hours::quiet_at(&self.config.quiet_hours, minute_of_day)
    }

    fn on_idle(&self, session_id: &str, minute_of_day: u32) {
        if !self.session_gate(session_id) {
            return;
        }
        if self.quiet(minute_of_day) {
            return;
        }

        // The title is context only. A failed fetch must not abort the
        // notification, so the error branch falls back rather than returns.
        let message = match self.sessions.get(session_id) {
            Ok(session) => session
                .title
                .filter(|title| !title.is_empty())
                .map(|title| truncate_chars(&title, SESSION_TITLE_MAX_CHARS))
                .unwrap_or_else(|| FALLBACK_SESSION_TITLE.to_string()),
            Err(_) => FALLBACK_SESSION_TITLE.to_string(),
        };

        self.notifier.notify(Notification {
            title: IDLE_TITLE.to_string(),
            message,
            sound: self.config.sounds.idle.clone(),
        });
    }

    fn on_error(&self, session_id: &str, error: Option<&str>, minute_of_day: u32) {
        if !self.session_gate(session_id) {
            return;
        }
        if self.quiet(minute_of_day) {
            return;
        }

        let message = error
            .filter(|text| !text.is_empty())
            .map(|text| truncate_chars(text, ERROR_MESSAGE_MAX_CHARS))
            .unwrap_or_else(|| ERROR_TITLE.to_string());

        self.notifier.notify(Notification {
            title: ERROR_TITLE.to_string(),
            message,
            sound: self.config.sounds.error.clone(),
        });
    }

    /// Permission requests always need a human, so there is no parent gate.
    fn on_permission(&self, minute_of_day: u32) {
        if self.quiet(minute_of_day) {
            return;
        }

        self.notifier.notify(Notification {
            title: PERMISSION_TITLE.to_string(),
            message: PERMISSION_MESSAGE.to_string(),
            sound: self.config.sounds.permission.clone(),
        });
    }
}

/// Truncates on a character boundary.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
