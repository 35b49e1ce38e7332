//! Address-family-agnostic connection setup.
//!
//! Resolution produces an ordered list of candidates. Both roles walk that list the same
//! way through [`try_candidates`]: print the candidate, run the role's attempt, stop at the
//! first success. Only the attempt differs between the [`connector`] and the [`listener`].

use std::future::Future;
use std::io;

use knock_common::error::AttemptError;
use knock_common::kprint;
use knock_common::network::candidate::{AddressFamily, Candidate, Candidates};
use tokio::net::TcpSocket;
use tracing::warn;

pub mod connector;
pub mod listener;
pub mod resolver;

/// Runs `attempt` against each candidate in order until one succeeds.
///
/// Returns `Ok(None)` when every candidate failed, and `Err` as soon as an attempt fails
/// fatally. Non-fatal failures are logged under `role` and skipped.
pub async fn try_candidates<T, F, Fut>(
    role: &str,
    candidates: Candidates,
    mut attempt: F,
) -> Result<Option<(T, Candidate)>, AttemptError>
where
    F: FnMut(Candidate) -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    for candidate in candidates {
        kprint!("    {candidate}");
        match attempt(candidate).await {
            Ok(established) => return Ok(Some((established, candidate))),
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => warn!("{role}: {}: {err}", candidate.ip()),
        }
    }
    Ok(None)
}

/// Creates an unconnected stream socket matching the candidate's family.
pub(crate) fn open_socket(candidate: Candidate) -> io::Result<TcpSocket> {
    match candidate.family() {
        AddressFamily::Ipv4 => TcpSocket::new_v4(),
        AddressFamily::Ipv6 => TcpSocket::new_v6(),
    }
}
