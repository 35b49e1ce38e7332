//! # knock-core
//!
//! The roles of the knock client and server:
//!
//! * **[`network`]**: resolution and the candidate loops that turn a resolved address list
//!   into a connected stream or a listening socket.
//! * **[`server`]**: the accept loop, the per-connection greeting handler, and the reaper.
//! * **[`client`]**: one connect, one bounded receive.

pub mod client;
pub mod network;
pub mod server;
