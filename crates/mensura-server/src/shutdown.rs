//! Graceful shutdown.
//!
//! Both types are thin wrappers over a [`watch`] channel: [`ShutdownSignal`]
//! publishes a flag that flips once, [`ConnectionTracker`] publishes the
//! number of open connections so the server can wait for it to reach zero.

use std::sync::Arc;

use tokio::sync::watch;

/// A cloneable shutdown flag that can be raised once.
///
/// ```
/// use mensura_server::ShutdownSignal;
///
/// let shutdown = ShutdownSignal::new();
/// let copy = shutdown.clone();
/// shutdown.trigger();
/// assert!(copy.is_shutdown());
/// ```
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    flag: Arc<watch::Sender<bool>>,
}

impl ShutdownSignal {
    /// Creates a lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(watch::Sender::new(false)),
        }
    }

    /// Raises the flag. Later calls do nothing.
    pub fn trigger(&self) {
        if !self.flag.send_replace(true) {
            tracing::debug!("Shutdown triggered");
        }
    }

    /// Whether the flag is raised.
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        *self.flag.borrow()
    }

    /// Completes once the flag is raised, at once if it already is.
    pub async fn triggered(&self) {
        let mut rx = self.flag.subscribe();
        // the sender lives in `self`, so this only ends when the flag is up
        let _ = rx.wait_for(|raised| *raised).await;
    }

    /// A flag raised by SIGTERM or SIGINT (Ctrl+C off Unix).
    ///
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn with_os_signals() -> Self {
        let signal = Self::new();
        let raise = signal.clone();

        tokio::spawn(async move {
            match os_signal().await {
                Some(name) => {
                    tracing::info!(signal = name, "Stopping on signal");
                    raise.trigger();
                }
                None => tracing::error!("No signal handler available; stop the server explicitly"),
            }
        });

        signal
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits for a termination signal and returns its name, or `None` when no
/// handler can be installed.
async fn os_signal() -> Option<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        if let (Ok(mut term), Ok(mut int)) =
            (signal(SignalKind::terminate()), signal(SignalKind::interrupt()))
        {
            return tokio::select! {
                _ = term.recv() => Some("SIGTERM"),
                _ = int.recv() => Some("SIGINT"),
            };
        }
        tracing::warn!("Unix signal handlers unavailable, using Ctrl+C");
    }

    tokio::signal::ctrl_c().await.ok().map(|()| "Ctrl+C")
}

/// Counts open connections.
///
/// ```
/// use mensura_server::ConnectionTracker;
///
/// let tracker = ConnectionTracker::new();
/// let guard = tracker.open();
/// assert_eq!(tracker.open_count(), 1);
/// drop(guard);
/// assert_eq!(tracker.open_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionTracker {
    count: Arc<watch::Sender<usize>>,
}

impl ConnectionTracker {
    /// Creates a tracker with nothing open.
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: Arc::new(watch::Sender::new(0)),
        }
    }

    /// Counts one connection until the returned guard is dropped.
    #[must_use]
    pub fn open(&self) -> ConnectionGuard {
        self.count.send_modify(|n| *n += 1);
        ConnectionGuard {
            count: Arc::clone(&self.count),
        }
    }

    /// Number of open connections.
    #[must_use]
    pub fn open_count(&self) -> usize {
        *self.count.borrow()
    }

    /// Completes once nothing is open.
    pub async fn drained(&self) {
        let mut rx = self.count.subscribe();
        let _ = rx.wait_for(|n| *n == 0).await;
    }
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// One open connection, see [`ConnectionTracker::open`].
#[derive(Debug)]
pub struct ConnectionGuard {
    count: Arc<watch::Sender<usize>>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.count.send_modify(|n| *n = n.saturating_sub(1));
    }
}
