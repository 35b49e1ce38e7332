use knock_common::error::{AttemptError, KnockError};
use knock_common::network::candidate::{Candidate, Candidates};
use tokio::net::TcpStream;

use crate::network::{open_socket, try_candidates};

/// A stream connected to the first reachable candidate.
#[derive(Debug)]
pub struct Connection {
    pub stream: TcpStream,
    pub peer: Candidate,
}

/// Connects to the first candidate that accepts, in resolution order.
///
/// `target` only names the destination in the error when every candidate fails.
pub async fn connect(target: &str, candidates: Candidates) -> Result<Connection, KnockError> {
    match try_candidates("client", candidates, attempt_connect).await {
        Ok(Some((stream, peer))) => Ok(Connection { stream, peer }),
        Ok(None) | Err(_) => Err(KnockError::Connect {
            target: target.to_string(),
        }),
    }
}

/// Socket creation, then connection. The socket is closed if either step fails.
pub async fn attempt_connect(candidate: Candidate) -> Result<TcpStream, AttemptError> {
    let socket = open_socket(candidate).map_err(AttemptError::SocketCreation)?;
    socket
        .connect(candidate.addr())
        .await
        .map_err(AttemptError::Connect)
}
