//! Shared building blocks for the knock client and server.
//!
//! * [`config`]: defaults and the per-role configuration structs.
//! * [`error`]: the error taxonomy shared by every role.
//! * [`network`]: the endpoint model produced by resolution.
//! * [`macros`]: logging shortcuts on top of `tracing`.

pub mod config;
pub mod error;
pub mod macros;
pub mod network;

pub use tracing;
