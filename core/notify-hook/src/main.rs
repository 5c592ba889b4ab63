//! notify-hook: event callback binary for the kdco-notify OpenCode plugin.
//!
//! The host invokes `notify-hook handle` once per lifecycle event with the
//! event JSON on stdin. The binary loads the user config, applies the
//! notification policy and, when the policy allows, emits one native desktop
//! notification.
//!
//! ## Subcommands
//!
//! - `handle`: Main event handler, reads JSON from stdin
//! - `test`: Send a test notification using the effective configuration
//! - `config`: Print the effective merged configuration as JSON

mod handle;
mod logging;
mod native;
mod session_client;

use clap::{Parser, Subcommand};
use notify_core::{Notification, Notifier};

#[derive(Parser)]
#[command(name = "notify-hook")]
#[command(about = "Native desktop notifications for OpenCode")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle a host event (reads JSON from stdin)
    Handle,

    /// Send a test notification to verify the install
    Test,

    /// Print the effective configuration as JSON
    Config,
}

fn main() {
    let _logging_guard = logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Handle => {
            if let Err(e) = handle::run() {
                tracing::error!(error = %e, "notify-hook handle failed");
                std::process::exit(1);
            }
        }
        Commands::Test => {
            let config = notify_core::load_config();
            native::NativeNotifier::new().notify(Notification {
                title: "kdco-notify".to_string(),
                message: "Test notification".to_string(),
                sound: config.sounds.permission,
            });
        }
        Commands::Config => {
            let config = notify_core::load_config();
            match serde_json::to_string_pretty(&config) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize config");
                    std::process::exit(1);
                }
            }
        }
    }
}
