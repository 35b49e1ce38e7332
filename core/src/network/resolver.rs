use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use knock_common::error::KnockError;
use knock_common::network::candidate::{Candidate, Candidates, FamilyHint};
use knock_common::network::target::Target;
use tokio::net;
use tracing::debug;

/// Resolves `target` and `port` into stream endpoint candidates.
///
/// The order handed back by the system resolver is kept. The wildcard yields the
/// unspecified addresses and "this host" yields loopback, in the order the system
/// resolver uses for a null host.
pub async fn resolve(target: &Target, port: u16, hint: FamilyHint) -> Result<Candidates, KnockError> {
    let addrs: Vec<SocketAddr> = match target {
        // The wildcard and this host never reach the system resolver. Their order is
        // fixed here to the one glibc's getaddrinfo gives for a null node.
        Target::Wildcard => vec![
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, port)),
        ],
        Target::ThisHost => vec![
            SocketAddr::from((Ipv6Addr::LOCALHOST, port)),
            SocketAddr::from((Ipv4Addr::LOCALHOST, port)),
        ],
        Target::Address { addr } => vec![SocketAddr::new(*addr, port)],
        Target::Name { hostname } => net::lookup_host((hostname.as_str(), port))
            .await
            .map_err(|err| KnockError::Resolution {
                target: target.with_port(port),
                reason: err.to_string(),
            })?
            .collect(),
    };

    let candidates: Vec<Candidate> = addrs
        .into_iter()
        .map(Candidate::new)
        .filter(|candidate| hint.admits(candidate.family()))
        .collect();

    if candidates.is_empty() {
        return Err(KnockError::Resolution {
            target: target.with_port(port),
            reason: no_match_reason(hint).to_string(),
        });
    }

    debug!("{} resolved to {} candidate(s)", target.with_port(port), candidates.len());
    Ok(Candidates::new(candidates))
}

fn no_match_reason(hint: FamilyHint) -> &'static str {
    match hint {
        FamilyHint::Unspecified => "no addresses found",
        FamilyHint::Ipv4 => "no IPv4 address found",
        FamilyHint::Ipv6 => "no IPv6 address found",
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
