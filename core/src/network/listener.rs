use std::io;
use std::net::SocketAddr;

use knock_common::error::{AttemptError, KnockError};
use knock_common::network::candidate::{Candidate, Candidates};
use tokio::net::{TcpListener, TcpSocket};

use crate::network::{open_socket, try_candidates};

/// A listening socket on the first bindable candidate.
#[derive(Debug)]
pub struct Bound {
    pub listener: TcpListener,
    pub candidate: Candidate,
}

impl Bound {
    /// The address actually bound, with the kernel-assigned port when port 0 was asked for.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Binds the first candidate that allows it, then starts listening with `backlog`.
///
/// A failure to enable address reuse aborts immediately instead of trying further
/// candidates.
pub async fn bind(target: &str, candidates: Candidates, backlog: u32) -> Result<Bound, KnockError> {
    let bound = try_candidates("server", candidates, |candidate| {
        std::future::ready(attempt_bind(candidate))
    })
    .await;

    let (socket, candidate) = settle(target, bound)?;
    let listener = start_listening(socket, backlog)?;
    Ok(Bound { listener, candidate })
}

/// Maps the outcome of the candidate loop onto the listener's errors.
fn settle(
    target: &str,
    bound: Result<Option<(TcpSocket, Candidate)>, AttemptError>,
) -> Result<(TcpSocket, Candidate), KnockError> {
    match bound {
        Ok(Some(bound)) => Ok(bound),
        Err(AttemptError::Configuration(err)) => Err(KnockError::Configuration(err)),
        Ok(None) | Err(_) => Err(KnockError::Bind {
            target: target.to_string(),
        }),
    }
}

fn start_listening(socket: TcpSocket, backlog: u32) -> Result<TcpListener, KnockError> {
    socket.listen(backlog).map_err(KnockError::Listen)
}

/// Socket creation, address reuse, then bind.
pub fn attempt_bind(candidate: Candidate) -> Result<TcpSocket, AttemptError> {
    let socket = open_socket(candidate).map_err(AttemptError::SocketCreation)?;
    socket
        .set_reuseaddr(true)
        .map_err(AttemptError::Configuration)?;
    socket
        .bind(candidate.addr())
        .map_err(AttemptError::Bind)?;
    Ok(socket)
}
