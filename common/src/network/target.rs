//! # Resolution Target Model
//!
//! Defines what a role asks the resolver for.
//!
//! A target can be:
//! * Every local address (the passive wildcard a server binds to).
//! * This host (no name given; resolves to loopback).
//! * An IPv4 or IPv6 literal (e.g. `127.0.0.1`, `::1`, `[::1]`).
//! * A hostname (e.g. `localhost`, `example.org`).

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// All local addresses, for binding.
    Wildcard,
    /// The local host, used when no name was supplied.
    ThisHost,
    /// A numeric address, used as-is.
    Address { addr: IpAddr },
    /// A name handed to the system resolver.
    Name { hostname: String },
}

impl FromStr for Target {
    type Err = String;

    /// Parses a string into a `Target`.
    ///
    /// Supported formats:
    /// * **Keywords**: "*", "any" (case-insensitive) for the wildcard.
    /// * **Address**: IPv4/IPv6 literal, IPv6 optionally in brackets.
    /// * **Name**: dot-separated labels of letters, digits, '-' and '_'.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(target) = parse_keyword(&trimmed.to_ascii_lowercase()) {
            return Ok(target);
        }

        Target::parse_remote(trimmed)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Wildcard => write!(f, "*"),
            Target::ThisHost => write!(f, "this host"),
            Target::Address { addr: IpAddr::V6(v6) } => write!(f, "[{v6}]"),
            Target::Address { addr: IpAddr::V4(v4) } => write!(f, "{v4}"),
            Target::Name { hostname } => write!(f, "{hostname}"),
        }
    }
}

impl Target {
    /// Parses a peer to connect to: an address literal or a hostname, never the wildcard.
    ///
    /// "any" is taken as a hostname here, and "*" is rejected.
    pub fn parse_remote(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("target cannot be empty".to_string());
        }

        if let Some(target) = parse_address(trimmed) {
            return Ok(target);
        }

        parse_hostname(trimmed)
    }

    /// Renders the target together with a port, e.g. `localhost:666` or `[::1]:666`.
    pub fn with_port(&self, port: u16) -> String {
        format!("{self}:{port}")
    }
}

fn parse_keyword(s_lower: &str) -> Option<Target> {
    match s_lower {
        "*" | "any" => Some(Target::Wildcard),
        _ => None,
    }
}

fn parse_address(s: &str) -> Option<Target> {
    let unbracketed = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(s);

    unbracketed
        .parse::<IpAddr>()
        .ok()
        .map(|addr| Target::Address { addr })
}

fn parse_hostname(s: &str) -> Result<Target, String> {
    if s.len() > MAX_HOSTNAME_LEN {
        return Err(format!("hostname longer than {MAX_HOSTNAME_LEN} characters"));
    }

    let name = s.strip_suffix('.').unwrap_or(s);
    for label in name.split('.') {
        validate_label(label).map_err(|reason| format!("invalid hostname '{s}': {reason}"))?;
    }

    Ok(Target::Name {
        hostname: s.to_string(),
    })
}

fn validate_label(label: &str) -> Result<(), String> {
    if label.is_empty() {
        return Err("empty label".to_string());
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(format!("label '{label}' longer than {MAX_LABEL_LEN} characters"));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(format!("label '{label}' starts or ends with '-'"));
    }
    if let Some(bad) = label
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(format!("unexpected character '{bad}'"));
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
