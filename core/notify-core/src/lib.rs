//! # notify-core
//!
//! Decision logic for kdco-notify, the native desktop notifier for OpenCode.
//!
//! Philosophy: notify the human when the AI needs them back, not for every
//! micro-event.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. The host delivers one
//!   event at a time; the handler runs to completion.
//! - **Best effort**: Every failure path degrades to "do nothing" or a safe
//!   default. Nothing in this crate can crash the host.
//! - **Seamed at the collaborators**: Session lookups ([`SessionSource`]) and
//!   delivery ([`Notifier`]) are traits so the routing policy is testable
//!   without a host or a desktop.

pub mod config;
pub mod event;
pub mod notify;
pub mod quiet_hours;
pub mod router;
pub mod session;

pub use config::{load_config, NotifyConfig};
pub use event::{Event, EventEnvelope};
pub use notify::{Notification, Notifier};
pub use router::Router;
pub use session::{LookupError, Session, SessionSource};
