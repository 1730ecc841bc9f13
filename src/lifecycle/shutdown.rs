//! Shutdown coordination for the server.

use tokio::sync::broadcast;

/// Broadcasts a single stop message to the HTTP server and its drain timer.
///
/// Clones share the same channel.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop. Returns how many were listening.
    ///
    /// Triggering before the server subscribed reaches nobody.
    pub fn trigger(&self) -> usize {
        match self.tx.send(()) {
            Ok(listeners) => {
                tracing::info!(listeners, "Shutdown triggered");
                listeners
            }
            Err(_) => {
                tracing::warn!("Shutdown triggered with no listeners");
                0
            }
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_every_subscriber() {
        let shutdown = Shutdown::new();
        let mut a = shutdown.subscribe();
        let mut b = shutdown.clone().subscribe();

        assert_eq!(shutdown.trigger(), 2);
        assert!(a.recv().await.is_ok());
        assert!(b.recv().await.is_ok());
    }

    #[test]
    fn test_trigger_without_subscribers() {
        let shutdown = Shutdown::new();
        assert_eq!(shutdown.trigger(), 0);

        drop(shutdown.subscribe());
        assert_eq!(shutdown.trigger(), 0);
    }
}
