//! Command exchange
//!
//! Blocking send/receive over any [`Transport`].
//!
//! ## Reception strategy
//! Replies carry no length header and no guaranteed delimiter, so reception
//! drains whatever has arrived: read once (blocking up to the receive
//! timeout), then keep reading only while more bytes are already queued.
//! A reply that stalls mid-stream is returned truncated.

use std::io::{self, Read, Write};
use std::net::TcpStream;

use bytes::BytesMut;

/// Byte stream the exchange engine runs over
pub trait Transport: Read + Write {
    /// Whether bytes can be read right now without blocking
    ///
    /// End of stream counts as nothing pending.
    fn bytes_pending(&mut self) -> io::Result<bool>;
}

impl Transport for TcpStream {
    fn bytes_pending(&mut self) -> io::Result<bool> {
        self.set_nonblocking(true)?;

        let mut probe = [0u8; 1];
        let pending = match self.peek(&mut probe) {
            Ok(n) => Ok(n > 0),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(false),
            Err(e) => Err(e),
        };

        let restored = self.set_nonblocking(false);
        let pending = pending?;
        restored?;
        Ok(pending)
    }
}

/// Bytes gathered for one reply
#[derive(Debug, Default)]
pub struct Received {
    pub bytes: BytesMut,

    /// Peer closed its side while we were reading
    pub peer_closed: bool,
}

/// Write the whole buffer, resuming after partial writes
///
/// Returns the number of bytes transmitted, which always equals `bytes.len()`.
pub fn send_all<W: Write + ?Sized>(writer: &mut W, bytes: &[u8]) -> io::Result<usize> {
    let mut sent = 0;

    while sent < bytes.len() {
        match writer.write(&bytes[sent..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("transport accepted 0 bytes after {} of {}", sent, bytes.len()),
                ));
            }
            Ok(n) => sent += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    writer.flush()?;
    Ok(sent)
}

/// Read until the transport reports nothing further queued
pub fn receive_until_idle<T: Transport + ?Sized>(
    transport: &mut T,
    buffer_size: usize,
) -> io::Result<Received> {
    let mut chunk = vec![0u8; buffer_size.max(1)];
    let mut received = Received {
        bytes: BytesMut::with_capacity(buffer_size),
        peer_closed: false,
    };

    loop {
        let n = match transport.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        if n == 0 {
            received.peer_closed = true;
            break;
        }
        received.bytes.extend_from_slice(&chunk[..n]);

        if !transport.bytes_pending()? {
            break;
        }
    }

    Ok(received)
}

/// Send one encoded command, then collect its reply
pub fn exchange<T: Transport + ?Sized>(
    transport: &mut T,
    request: &[u8],
    buffer_size: usize,
) -> io::Result<Received> {
    let sent = send_all(transport, request)?;
    tracing::trace!("Sent {} bytes: {:?}", sent, String::from_utf8_lossy(request));

    let received = receive_until_idle(transport, buffer_size)?;
    tracing::trace!(
        "Received {} bytes (peer_closed={}): {:?}",
        received.bytes.len(),
        received.peer_closed,
        String::from_utf8_lossy(&received.bytes)
    );

    Ok(received)
}
