use std::io;

use thiserror::Error;

/// Errors that end the current invocation of a role.
#[derive(Debug, Error)]
pub enum KnockError {
    #[error("could not resolve {target}: {reason}")]
    Resolution { target: String, reason: String },

    #[error("client: failed to connect to {target}")]
    Connect { target: String },

    #[error("server: failed to bind {target}")]
    Bind { target: String },

    #[error("setsockopt: {0}")]
    Configuration(#[source] io::Error),

    #[error("listen: {0}")]
    Listen(#[source] io::Error),

    #[error("recv: {0}")]
    Receive(#[source] io::Error),
}

impl KnockError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            KnockError::Connect { .. } => 2,
            _ => 1,
        }
    }
}

/// Failure of a single resolved candidate.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("socket: {0}")]
    SocketCreation(#[source] io::Error),

    #[error("connect: {0}")]
    Connect(#[source] io::Error),

    #[error("bind: {0}")]
    Bind(#[source] io::Error),

    #[error("setsockopt: {0}")]
    Configuration(#[source] io::Error),
}

impl AttemptError {
    /// Fatal failures stop the candidate loop instead of moving on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AttemptError::Configuration(_))
    }
}

/// Failure to deliver the greeting on one connection.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("send: {0}")]
    Io(#[from] io::Error),

    /// The transport took fewer bytes than offered. Not retried.
    #[error("send: short write, {sent} of {expected} bytes")]
    Short { sent: usize, expected: usize },
}
