use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use knock_common::config::ServerConfig;
use knock_common::network::target::Target;
use knock_core::server::Server;
use knock_core::server::reaper::HandlerTally;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct RunningServer {
    pub addr: SocketAddr,
    pub tally: Arc<HandlerTally>,
    stop: oneshot::Sender<()>,
    serving: JoinHandle<()>,
}

impl RunningServer {
    /// Stops accepting and waits until every handler has been reclaimed.
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        self.serving.await.expect("server task panicked");
    }
}

pub fn loopback_config(port: u16) -> ServerConfig {
    ServerConfig {
        bind: Target::Address {
            addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
        },
        port,
        ..ServerConfig::default()
    }
}

pub async fn spawn_server(cfg: ServerConfig) -> anyhow::Result<RunningServer> {
    let server = Server::bind(&cfg).await?;
    let addr = server.local_addr();
    let tally = server.tally();
    let (stop, stopped) = oneshot::channel::<()>();

    let serving = tokio::spawn(server.serve_until(async {
        let _ = stopped.await;
    }));

    Ok(RunningServer {
        addr,
        tally,
        stop,
        serving,
    })
}

/// Polls `condition` until it holds or `limit` elapses.
pub async fn wait_until<F>(limit: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    tokio::time::timeout(limit, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .is_ok()
}
