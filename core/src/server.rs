//! The greeting server.
//!
//! [`Server::bind`] resolves and binds the configured address. [`Server::serve`] then
//! accepts forever: each connection is handed to its own task running
//! [`handler::greet`], and a [`reaper::Reaper`] task collects the finished handlers so
//! they never pile up. Neither the handlers nor the reaper can stall the accept loop.

use std::future::{self, Future};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use knock_common::config::ServerConfig;
use knock_common::error::KnockError;
use knock_common::{kprint, success};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, warn};

use crate::network::{listener, resolver};
use handler::greet;
use reaper::{ExitNotifier, HandlerExit, HandlerTally, Reaper};

pub mod handler;
pub mod reaper;

pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    greeting: Arc<[u8]>,
    tally: Arc<HandlerTally>,
}

impl Server {
    /// Resolves the bind target, binds the first usable candidate and starts listening.
    pub async fn bind(cfg: &ServerConfig) -> Result<Self, KnockError> {
        let target = cfg.bind.with_port(cfg.port);
        let candidates = resolver::resolve(&cfg.bind, cfg.port, cfg.family).await?;

        kprint!("server: candidate addresses are:");
        let bound = listener::bind(&target, candidates, cfg.backlog).await?;
        let local_addr = bound.local_addr().map_err(KnockError::Listen)?;
        success!("server: listening on {local_addr}");
        debug!("server: backlog {}", cfg.backlog);

        Ok(Self {
            listener: bound.listener,
            local_addr,
            greeting: Arc::from(cfg.greeting.as_bytes()),
            tally: Arc::new(HandlerTally::default()),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handler counters, shared with the accept loop and the reaper.
    pub fn tally(&self) -> Arc<HandlerTally> {
        Arc::clone(&self.tally)
    }

    /// Accepts connections until the process is killed.
    pub async fn serve(self) {
        self.serve_until(future::pending()).await
    }

    /// Accepts connections until `shutdown` completes.
    ///
    /// Handlers already running are left to finish, and the call returns once the reaper
    /// has collected all of them.
    pub async fn serve_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let (reaper, notifier) = Reaper::new(Arc::clone(&self.tally));
        let reaping = tokio::spawn(reaper.run());

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => self.on_accept(accepted, &notifier),
            }
        }

        drop(notifier);
        if let Err(err) = reaping.await {
            error!("server: reaper stopped abnormally: {err}");
        }
    }

    fn on_accept(&self, accepted: io::Result<(TcpStream, SocketAddr)>, notifier: &ExitNotifier) {
        match accepted {
            Ok((stream, peer)) => {
                kprint!("server: got connection from {}", peer.ip());
                self.dispatch(stream, peer, notifier);
            }
            Err(err) => warn!("server: accept: {err}"),
        }
    }

    /// Moves the stream into a new handler task. The accept loop keeps nothing of it.
    fn dispatch(&self, stream: TcpStream, peer: SocketAddr, notifier: &ExitNotifier) {
        self.tally.record_dispatch();
        let greeting = Arc::clone(&self.greeting);
        let notifier = notifier.clone();

        tokio::spawn(async move {
            let outcome = greet(stream, &greeting).await;
            notifier.notify(HandlerExit { peer, outcome });
        });
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
