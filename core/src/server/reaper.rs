//! Collection of finished connection handlers.
//!
//! Every handler task posts a [`HandlerExit`] through an [`ExitNotifier`] as its last act.
//! The [`Reaper`] wakes on the first pending notice, drains whatever else is already
//! queued without waiting, and updates the shared [`HandlerTally`].

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use knock_common::error::SendError;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, trace};

/// Termination notice of one handler.
#[derive(Debug)]
pub struct HandlerExit {
    pub peer: SocketAddr,
    pub outcome: Result<(), SendError>,
}

#[derive(Debug, Default)]
pub struct HandlerTally {
    dispatched: AtomicUsize,
    active: AtomicUsize,
    reclaimed: AtomicUsize,
    failed: AtomicUsize,
}

impl HandlerTally {
    pub fn dispatched(&self) -> usize {
        self.dispatched.load(Ordering::Relaxed)
    }

    /// Handlers dispatched and not yet reclaimed.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }

    pub fn reclaimed(&self) -> usize {
        self.reclaimed.load(Ordering::Relaxed)
    }

    /// Reclaimed handlers that failed to send the greeting.
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    pub(crate) fn record_dispatch(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
        self.active.fetch_add(1, Ordering::Relaxed);
    }

    fn record_exit(&self, failed: bool) {
        self.active.fetch_sub(1, Ordering::Relaxed);
        self.reclaimed.fetch_add(1, Ordering::Relaxed);
        if failed {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Handler side of the notice channel. Posting never blocks.
#[derive(Debug, Clone)]
pub struct ExitNotifier {
    tx: UnboundedSender<HandlerExit>,
}

impl ExitNotifier {
    pub fn notify(&self, exit: HandlerExit) {
        let _ = self.tx.send(exit);
    }
}

pub struct Reaper {
    rx: UnboundedReceiver<HandlerExit>,
    tally: Arc<HandlerTally>,
}

impl Reaper {
    pub fn new(tally: Arc<HandlerTally>) -> (Self, ExitNotifier) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx, tally }, ExitNotifier { tx })
    }

    /// Runs until every [`ExitNotifier`] has been dropped and all notices are drained.
    pub async fn run(mut self) {
        while let Some(exit) = self.rx.recv().await {
            let reclaimed = self.drain(exit);
            trace!("reaper: reclaimed {reclaimed} handler(s)");
        }
    }

    fn drain(&mut self, first: HandlerExit) -> usize {
        self.reclaim(first);
        let mut reclaimed = 1;
        while let Ok(exit) = self.rx.try_recv() {
            self.reclaim(exit);
            reclaimed += 1;
        }
        reclaimed
    }

    fn reclaim(&self, exit: HandlerExit) {
        if let Err(err) = &exit.outcome {
            error!("server: {}: {err}", exit.peer.ip());
        }
        self.tally.record_exit(exit.outcome.is_err());
    }
}
