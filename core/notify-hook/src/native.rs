//! Native desktop notification delivery.
//!
//! - **macOS**: `terminal-notifier` when installed, else `osascript`
//!   AppleScript `display notification`
//! - **Linux / Windows**: the `notify_rust` crate
//!
//! All paths are fire-and-forget: failures are logged as warnings and never
//! reach the caller.

use notify_core::{Notification, Notifier};

#[derive(Default)]
pub struct NativeNotifier;

impl NativeNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for NativeNotifier {
    fn notify(&self, notification: Notification) {
        deliver(
            &notification.title,
            &notification.message,
            &notification.sound,
        );
    }
}

#[cfg(target_os = "macos")]
fn deliver(title: &str, message: &str, sound: &str) {
    use std::process::Command;

    // terminal-notifier posts through the notification center with sound
    // support and is the better UX when installed.
    let sent = Command::new("terminal-notifier")
        .args(["-title", title, "-message", message, "-sound", sound])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if sent {
        return;
    }

    let script = format!(
        r#"display notification "{}" with title "{}" sound name "{}""#,
        escape_for_applescript(message),
        escape_for_applescript(title),
        escape_for_applescript(sound),
    );
    let sent = Command::new("osascript")
        .args(["-e", &script])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if !sent {
        tracing::warn!(title = %title, "Failed to deliver desktop notification");
    }
}

#[cfg(not(target_os = "macos"))]
fn deliver(title: &str, message: &str, sound: &str) {
    if let Err(e) = notify_rust::Notification::new()
        .summary(title)
        .body(message)
        .sound_name(sound)
        .show()
    {
        tracing::warn!(title = %title, error = %e, "Failed to deliver desktop notification");
    }
}

/// Escapes a string for embedding inside an AppleScript double-quoted
/// string. Backslashes must be escaped first so later replacements do not
/// double-escape them.
#[cfg(any(target_os = "macos", test))]
fn escape_for_applescript(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applescript_escaping_handles_quotes_and_backslashes() {
        assert_eq!(escape_for_applescript(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_for_applescript(r"a\b"), r"a\\b");
        assert_eq!(escape_for_applescript("line\nbreak"), "line\\nbreak");
        assert_eq!(escape_for_applescript("plain"), "plain");
    }
}
