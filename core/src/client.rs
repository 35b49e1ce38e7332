use knock_common::config::ClientConfig;
use knock_common::error::KnockError;
use knock_common::kprint;
use knock_common::network::candidate::Candidate;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::network::connector::{self, Connection};
use crate::network::resolver;

/// What the server said, and who said it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub peer: Candidate,
    pub message: String,
}

/// Resolves the configured server, connects, and reads its greeting.
pub async fn fetch_greeting(cfg: &ClientConfig) -> Result<Reply, KnockError> {
    let target = cfg.target.with_port(cfg.port);
    let candidates = resolver::resolve(&cfg.target, cfg.port, cfg.family).await?;

    kprint!("client: candidate addresses are:");
    let Connection { stream, peer } = connector::connect(&target, candidates).await?;
    kprint!("client: connecting to server {}", peer.ip());

    let message = receive(stream, cfg.max_data_size).await?;
    Ok(Reply { peer, message })
}

/// Performs one read of at most `max_data_size - 1` bytes and returns exactly what arrived.
///
/// Whatever a single read yields is the whole message, even if the peer sent more.
pub async fn receive<R>(mut stream: R, max_data_size: usize) -> Result<String, KnockError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer: Vec<u8> = vec![0u8; max_data_size];
    let limit: usize = max_data_size.saturating_sub(1);

    let received: usize = stream
        .read(&mut buffer[..limit])
        .await
        .map_err(KnockError::Receive)?;

    Ok(String::from_utf8_lossy(&buffer[..received]).into_owned())
}
