//! Event handler: reads one host event from stdin and routes it.
//!
//! The host discards hook exit codes, so errors here only reach the log
//! file. An empty stdin is a no-op, not an error.

use std::io::{self, Read};

use notify_core::{load_config, EventEnvelope, Router};

use crate::native::NativeNotifier;
use crate::session_client::OpencodeClient;

pub fn run() -> Result<(), String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;

    if input.trim().is_empty() {
        return Ok(());
    }

    let envelope: EventEnvelope =
        serde_json::from_str(&input).map_err(|e| format!("Failed to parse event: {}", e))?;

    let config = load_config();
    let router = Router::new(config, OpencodeClient::from_env(), NativeNotifier::new());
    router.handle(&envelope);
    Ok(())
}
