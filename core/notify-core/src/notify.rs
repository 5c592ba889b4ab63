//! Notification payloads and the delivery seam.

/// One desktop notification. Built per event, discarded after dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    /// Sound identifier understood by the platform notifier.
    pub sound: String,
}

/// Fire-and-forget delivery of native desktop notifications.
///
/// Implementations must not block on user interaction and must not report
/// delivery failures to the caller (a warn log is the ceiling).
pub trait Notifier {
    fn notify(&self, notification: Notification);
}
