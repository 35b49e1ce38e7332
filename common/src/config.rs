use crate::network::candidate::FamilyHint;
use crate::network::target::Target;

pub const DEFAULT_PORT: u16 = 666;
pub const DEFAULT_BACKLOG: u32 = 10;
pub const DEFAULT_GREETING: &str = "Hello, from the other side!";

/// Size of the client's receive buffer. One byte is kept back, so at most
/// `MAX_DATA_SIZE - 1` bytes are read.
pub const MAX_DATA_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Where to listen. [`Target::Wildcard`] binds every local address.
    pub bind: Target,
    pub port: u16,
    pub family: FamilyHint,
    /// Depth of the kernel's queue of established, not yet accepted connections.
    pub backlog: u32,
    /// Sent to every client, then the connection is closed.
    pub greeting: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: Target::Wildcard,
            port: DEFAULT_PORT,
            family: FamilyHint::Unspecified,
            backlog: DEFAULT_BACKLOG,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub target: Target,
    pub port: u16,
    pub family: FamilyHint,
    pub max_data_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            target: Target::ThisHost,
            port: DEFAULT_PORT,
            family: FamilyHint::Unspecified,
            max_data_size: MAX_DATA_SIZE,
        }
    }
}
