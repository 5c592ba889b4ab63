//! File logging for the hook binary.
//!
//! Hooks must keep stdout/stderr clean for the host, so diagnostics go to a
//! daily-rolling file under `~/.config/opencode/log/`. Returns a guard that
//! flushes the non-blocking writer on drop.

use std::env;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEBUG_ENV: &str = "KDCO_NOTIFY_DEBUG";
const LOG_FILE_PREFIX: &str = "kdco-notify.log";

pub fn init() -> Option<WorkerGuard> {
    let home = dirs::home_dir()?;
    let log_dir = home.join(".config").join("opencode").join("log");

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let debug_enabled = env::var(DEBUG_ENV)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
