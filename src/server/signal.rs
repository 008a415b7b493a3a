// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

/// Signal handler state
pub struct SignalHandler {
    /// Shutdown signal (SIGTERM, SIGINT)
    pub shutdown: Arc<Notify>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
        }
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix only)
///
/// Spawns a background task that listens for Unix signals and triggers
/// graceful shutdown.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                return;
            }
        };
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGINT handler: {e}"));
                return;
            }
        };

        println!("[SIGNAL] Signal handlers registered:");
        println!("  - SIGTERM (kill <pid>)  : Graceful shutdown");
        println!("  - SIGINT  (Ctrl+C)      : Graceful shutdown");
        println!("[SIGNAL] Process ID: {}", std::process::id());

        tokio::select! {
            _ = sigterm.recv() => {
                println!("\n[SIGNAL] SIGTERM received, initiating graceful shutdown...");
            }
            _ = sigint.recv() => {
                println!("\n[SIGNAL] SIGINT received, initiating graceful shutdown...");
            }
        }

        // notify_one stores a permit, so the shutdown is not lost if the
        // server loop is busy accepting when the signal arrives
        handler.shutdown.notify_one();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    tokio::spawn(async move {
        println!("[SIGNAL] Windows mode: Only Ctrl+C is supported");

        if let Ok(()) = tokio::signal::ctrl_c().await {
            println!("\n[SIGNAL] Ctrl+C received, initiating shutdown...");
            handler.shutdown.notify_one();
        }
    });
}
