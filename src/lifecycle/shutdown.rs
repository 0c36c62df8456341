//! Shutdown coordination for `remix run`.
//!
//! The first trigger broadcasts to every subscriber and is logged with its
//! reason. Later triggers are no-ops, so a second SIGINT during draining does
//! not re-signal tasks already stopping.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown of the app server.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    triggered: AtomicBool,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            triggered: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop. Returns `false` when shutdown was
    /// already under way.
    pub fn trigger(&self, reason: &str) -> bool {
        if self.triggered.swap(true, Ordering::SeqCst) {
            tracing::debug!(reason = %reason, "Shutdown already in progress");
            return false;
        }

        // Send only fails when nobody is listening.
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::info!(reason = %reason, subscribers = notified, "Shutdown triggered");
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Number of tasks still listening for shutdown.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
