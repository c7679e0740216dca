//! Connection Handler
//!
//! Owns the TCP socket to one marker controller.

use std::io;
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use socket2::{Domain, Protocol, SockAddr, Socket, Type};

use crate::config::ConnectionConfig;
use crate::error::{MarkerError, Result};

/// Linger period applied on close
const LINGER: Duration = Duration::from_secs(1);

/// An established controller connection
///
/// The socket is shut down and released when the value is dropped, so a
/// `Connection` only ever exists in the connected state.
pub struct Connection {
    /// Connected TCP stream
    stream: TcpStream,

    /// Peer address for logging
    peer_addr: SocketAddr,

    /// Size of each read during reception
    receive_buffer_size: usize,

    /// Receive timeout used when a call supplies none
    default_receive_timeout: Duration,

    /// Receive timeout currently set on the socket
    applied_receive_timeout: Duration,
}

impl Connection {
    /// Connect with a hard deadline
    ///
    /// The socket is tuned before the attempt. On timeout or refusal the
    /// socket is dropped and nothing is left open.
    pub fn open(addr: SocketAddr, config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;

        let socket = configured_socket(addr, config)?;

        tracing::debug!(
            "Connecting to {} (timeout {}ms)",
            addr,
            config.connect_timeout_ms
        );

        if let Err(e) = socket.connect_timeout(&SockAddr::from(addr), config.connect_timeout()) {
            return Err(connect_error(addr, config.connect_timeout_ms, e));
        }

        let stream: TcpStream = socket.into();
        tracing::debug!("Connection established to {}", addr);

        Ok(Self {
            stream,
            peer_addr: addr,
            receive_buffer_size: config.receive_buffer_size,
            default_receive_timeout: config.receive_timeout(),
            applied_receive_timeout: config.receive_timeout(),
        })
    }

    /// Whether the transport still sees a connected peer
    pub fn is_alive(&self) -> bool {
        self.stream.peer_addr().is_ok()
    }

    /// Set the receive deadline for the next exchange
    ///
    /// `None` selects the configured default. The socket is only touched
    /// when the value actually changes.
    pub fn apply_receive_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        let wanted = timeout.unwrap_or(self.default_receive_timeout);
        if wanted != self.applied_receive_timeout {
            self.stream.set_read_timeout(Some(wanted))?;
            self.applied_receive_timeout = wanted;
        }
        Ok(())
    }

    pub fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }

    pub fn receive_buffer_size(&self) -> usize {
        self.receive_buffer_size
    }

    /// Get the peer address
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // Best effort: the peer may already be gone.
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            tracing::trace!("Shutdown of {} failed: {}", self.peer_addr, e);
        }
        tracing::debug!("Connection to {} closed", self.peer_addr);
    }
}

/// Classify a failed connect attempt
///
/// Only an expired deadline is a timeout; refusals and unreachable hosts
/// keep their io cause.
pub fn connect_error(addr: SocketAddr, timeout_ms: u64, error: io::Error) -> MarkerError {
    match error.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
            MarkerError::ConnectTimeout { addr, timeout_ms }
        }
        _ => MarkerError::ConnectFailed {
            addr,
            source: error,
        },
    }
}

/// Fresh stream socket with the controller's tuning applied
fn configured_socket(addr: SocketAddr, config: &ConnectionConfig) -> Result<Socket> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    // Exclusive local address: never share the port with another socket
    socket.set_reuse_address(false)?;
    socket.set_linger(Some(LINGER))?;
    // Commands are tiny; send them immediately
    socket.set_nodelay(true)?;

    match addr {
        SocketAddr::V4(_) => socket.set_ttl(config.ttl)?,
        SocketAddr::V6(_) => socket.set_unicast_hops_v6(config.ttl)?,
    }

    socket.set_write_timeout(Some(config.send_timeout()))?;
    socket.set_read_timeout(Some(config.receive_timeout()))?;
    socket.set_send_buffer_size(config.send_buffer_size)?;
    socket.set_recv_buffer_size(config.receive_buffer_size)?;

    Ok(socket)
}
