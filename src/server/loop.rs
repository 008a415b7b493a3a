// Server loop module
// Accept loop with graceful shutdown

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config;
use crate::logger;

/// How long to wait for in-flight connections after the accept loop stops
const SHUTDOWN_GRACE: std::time::Duration = std::time::Duration::from_secs(5);

/// Accept connections until a shutdown signal arrives
///
/// On shutdown the listener is closed first, then in-flight connections
/// get a grace period to finish before the loop returns.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => {
                logger::log_shutdown(active_connections.load(Ordering::SeqCst));
                break;
            }
        }
    }

    // Closing the listener rejects new connections while in-flight
    // requests keep running in their tasks
    drop(listener);

    wait_for_drain(&active_connections).await;
    logger::log_shutdown_complete();

    Ok(())
}

/// Wait until active connections finish or the grace period expires
async fn wait_for_drain(active_connections: &Arc<AtomicUsize>) {
    let deadline = tokio::time::Instant::now() + SHUTDOWN_GRACE;

    while active_connections.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period expired with {} connections still active",
                active_connections.load(Ordering::SeqCst)
            ));
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
}
