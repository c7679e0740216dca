//! Network Module
//!
//! TCP connection handling and the blocking command exchange.
//!
//! ## Architecture
//! - One socket per controller, owned by [`Connection`]
//! - Strict request-then-response; no pipelining
//! - Exchange logic is generic over [`Transport`] so it runs on any byte stream

mod connection;
mod exchange;

pub use connection::{connect_error, Connection};
pub use exchange::{exchange, receive_until_idle, send_all, Received, Transport};
