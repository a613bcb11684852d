//! `Shutdown` is used by the insert loops to listen for the stop signal.
//!
//! The signal is sent by whoever owns the `Sender` half of a broadcast channel, usually
//! the Ctrl+C listener spawned by `listen_for_ctrl_c`.

use tokio::sync::broadcast;
use tracing::info;

#[derive(Debug)]
pub struct Shutdown {
    // true if the shutdown notification has been received.
    shutdown: bool,
    // Receiver half of a broadcast channel used to listen for the notification.
    notify: broadcast::Receiver<()>,
}

impl Shutdown {
    /// Create a new `Shutdown` backed by the given `broadcast::Receiver`.
    pub fn new(notify: broadcast::Receiver<()>) -> Shutdown {
        Shutdown {
            shutdown: false,
            notify,
        }
    }

    /// Returns `true` if the shutdown signal has been received.
    ///
    /// Checks the channel without waiting.
    pub fn is_shutdown(&mut self) -> bool {
        if !self.shutdown {
            match self.notify.try_recv() {
                Err(broadcast::error::TryRecvError::Empty) => {}
                // A message, a lagged receiver or a dropped sender all mean stop.
                _ => self.shutdown = true,
            }
        }
        self.shutdown
    }

    /// Receive the shutdown notice, waiting if necessary.
    pub async fn recv(&mut self) {
        // Check if already received
        if self.shutdown {
            return;
        }

        let _ = self.notify.recv().await;

        self.shutdown = true;
    }
}

/// Spawn a task that broadcasts on `notify` when Ctrl+C is pressed.
pub fn listen_for_ctrl_c(notify: broadcast::Sender<()>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping");
            let _ = notify.send(());
        }
    });
}
