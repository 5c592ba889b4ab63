//! Quiet-hours window evaluation.
//!
//! Windows are local-time "HH:MM" pairs. A window whose start is later than
//! its end wraps past midnight (22:00-08:00 covers the night). A window with
//! start equal to end is empty, never quiet.

use chrono::{Local, Timelike};

use crate::config::{NotifyConfig, QuietHours};

/// Parses an "HH:MM" clock string into minute-of-day. Rejects values outside
/// the 00:00-23:59 clock face.
fn parse_minutes(clock: &str) -> Option<u32> {
    let (hour, minute) = clock.split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// True when `minute_of_day` falls inside the configured window.
///
/// A window that fails to parse evaluates to not-quiet, so a typo in the
/// config degrades to "always notify" rather than "never notify".
pub fn quiet_at(window: &QuietHours, minute_of_day: u32) -> bool {
    if !window.enabled {
        return false;
    }

    let (start, end) = match (parse_minutes(&window.start), parse_minutes(&window.end)) {
        (Some(start), Some(end)) => (start, end),
        _ => return false,
    };

    // Overnight window, e.g. 22:00-08:00
    if start > end {
        return minute_of_day >= start || minute_of_day < end;
    }

    minute_of_day >= start && minute_of_day < end
}

/// Quiet-hours check against the local wall clock at call time.
pub fn is_quiet_hours(config: &NotifyConfig) -> bool {
    quiet_at(&config.quiet_hours, local_minute_of_day())
}

/// Current local time as minute-of-day.
pub fn local_minute_of_day() -> u32 {
    let now = Local::now();
    now.hour() * 60 + now.minute()
}
