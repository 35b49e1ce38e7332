//! Endpoints produced by resolution.
//!
//! Every [`Candidate`] describes a TCP stream endpoint. A resolution yields an ordered
//! [`Candidates`] sequence which is walked once, front to back, and then dropped.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Native sizes of `sockaddr_in` and `sockaddr_in6`.
const SOCKADDR_IN_LEN: usize = 16;
const SOCKADDR_IN6_LEN: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    pub fn of(addr: &SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(_) => AddressFamily::Ipv4,
            SocketAddr::V6(_) => AddressFamily::Ipv6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AddressFamily::Ipv4 => "IPv4",
            AddressFamily::Ipv6 => "IPv6",
        }
    }

    /// Byte length of the socket address structure for this family.
    pub fn sockaddr_len(self) -> usize {
        match self {
            AddressFamily::Ipv4 => SOCKADDR_IN_LEN,
            AddressFamily::Ipv6 => SOCKADDR_IN6_LEN,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Restricts which families a resolution may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FamilyHint {
    #[default]
    Unspecified,
    Ipv4,
    Ipv6,
}

impl FamilyHint {
    pub fn admits(self, family: AddressFamily) -> bool {
        match self {
            FamilyHint::Unspecified => true,
            FamilyHint::Ipv4 => family == AddressFamily::Ipv4,
            FamilyHint::Ipv6 => family == AddressFamily::Ipv6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    family: AddressFamily,
    addr: SocketAddr,
}

impl Candidate {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            family: AddressFamily::of(&addr),
            addr,
        }
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn ip(&self) -> IpAddr {
        self.addr.ip()
    }

    pub fn addr_len(&self) -> usize {
        self.family.sockaddr_len()
    }
}

impl From<SocketAddr> for Candidate {
    fn from(addr: SocketAddr) -> Self {
        Candidate::new(addr)
    }
}

/// Prints as `IPv4: 127.0.0.1`.
impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.family, self.addr.ip())
    }
}

/// The ordered result of one resolution. Consumed by iteration and not restartable.
#[derive(Debug)]
pub struct Candidates {
    inner: std::vec::IntoIter<Candidate>,
}

impl Candidates {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            inner: candidates.into_iter(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }
}

impl FromIterator<SocketAddr> for Candidates {
    fn from_iter<I: IntoIterator<Item = SocketAddr>>(iter: I) -> Self {
        Candidates::new(iter.into_iter().map(Candidate::new).collect())
    }
}

impl Iterator for Candidates {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Candidates {}
