//! Controller client
//!
//! Connection lifecycle plus the blocking command exchange.
//!
//! ## Exchange flow
//! ```text
//! run(cmd) ──► connected? ──► prefix? ──► terminator? ──► send all ──► drain reply ──► normalize
//!                  │             │             │              │             │
//!                  └─────────────┴─────────────┴──────────────┴─────────────┴──► failure Response
//! ```
//!
//! A `Client` is not meant to be shared: the protocol has no correlation
//! ids, so interleaved exchanges would corrupt each other. Methods take
//! `&mut self`; wrap the client in [`crate::SharedClient`] to share it
//! between threads.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::config::ConnectionConfig;
use crate::error::{MarkerError, Result};
use crate::network::{self, Connection, Received};
use crate::protocol::{self, Response};

/// Blocking client for one marker controller
#[derive(Default)]
pub struct Client {
    /// Socket and timing configuration
    config: ConnectionConfig,

    /// Present only while connected
    connection: Option<Connection>,
}

impl Client {
    /// Create a disconnected client
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            connection: None,
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    // =========================================================================
    // Connection Lifecycle
    // =========================================================================

    /// Connect to the controller at `address` (an IP literal) on the configured port
    ///
    /// Blocks for at most the configured connect timeout. Fails with
    /// [`MarkerError::AlreadyConnected`] if a live connection exists.
    ///
    /// Only an expired deadline yields [`MarkerError::ConnectTimeout`]; a
    /// refused or unreachable peer fails fast with
    /// [`MarkerError::ConnectFailed`] carrying the io cause.
    pub fn connect(&mut self, address: &str) -> Result<()> {
        if self.is_connected() {
            return Err(MarkerError::AlreadyConnected);
        }

        // A handle whose peer went away is released before reconnecting
        self.disconnect();

        let ip: IpAddr = address
            .trim()
            .parse()
            .map_err(|_| MarkerError::InvalidAddress(address.to_string()))?;
        let addr = SocketAddr::new(ip, self.config.port);

        self.connection = Some(Connection::open(addr, &self.config)?);
        Ok(())
    }

    /// Close the connection; does nothing when already disconnected
    pub fn disconnect(&mut self) {
        drop(self.connection.take());
    }

    /// True iff a socket exists and its peer is still reachable
    pub fn is_connected(&self) -> bool {
        self.connection
            .as_ref()
            .map(Connection::is_alive)
            .unwrap_or(false)
    }

    /// Address of the connected controller
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.connection.as_ref().map(Connection::peer_addr)
    }

    // =========================================================================
    // Command Exchange
    // =========================================================================

    /// Send one command and wait for its reply using the default receive timeout
    pub fn run(&mut self, command: &str) -> Response {
        self.run_with(command, None)
    }

    /// Like [`Client::run`], but waits up to `receive_timeout` for this reply only
    pub fn run_with_timeout(&mut self, command: &str, receive_timeout: Duration) -> Response {
        self.run_with(command, Some(receive_timeout))
    }

    /// Run one exchange; every failure is folded into the returned [`Response`]
    pub fn run_with(&mut self, command: &str, receive_timeout: Option<Duration>) -> Response {
        let connection = match self.connection.as_mut() {
            Some(connection) if connection.is_alive() => connection,
            _ => return Response::failed(String::new(), MarkerError::NotConnected),
        };

        let prefix = match protocol::validate(command) {
            Ok(prefix) => prefix,
            Err(violation) => {
                let description = violation.describe();
                return Response::failed(
                    description.clone(),
                    MarkerError::InvalidCommand(description),
                );
            }
        };

        if receive_timeout == Some(Duration::ZERO) {
            return Response::failed(
                String::new(),
                MarkerError::Config("receive timeout must be non-zero".to_string()),
            );
        }

        tracing::debug!("Running {:?} on {}", command, connection.peer_addr());

        match transact(connection, command, receive_timeout) {
            Ok(received) => {
                let reply = protocol::decode_reply(&received.bytes);
                let response = protocol::normalize(prefix, reply);

                if received.peer_closed {
                    tracing::warn!("Controller closed the connection during {:?}", command);
                    self.disconnect();
                }
                response
            }
            Err(e) => {
                tracing::warn!("Exchange of {:?} failed: {}", command, e);
                // The stream position is unknown now; the caller must reconnect
                self.disconnect();
                Response::failed(String::new(), MarkerError::Io(e))
            }
        }
    }
}

fn transact(
    connection: &mut Connection,
    command: &str,
    receive_timeout: Option<Duration>,
) -> io::Result<Received> {
    connection.apply_receive_timeout(receive_timeout)?;

    let request = protocol::encode_command(command);
    let buffer_size = connection.receive_buffer_size();
    network::exchange(connection.stream_mut(), &request, buffer_size)
}
