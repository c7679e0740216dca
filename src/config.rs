//! Configuration for lasermark
//!
//! Centralized connection configuration with the controller's factory defaults.

use std::time::Duration;

use crate::error::{MarkerError, Result};

/// Socket and timing configuration for one controller connection
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Controller TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Timeouts (milliseconds)
    // -------------------------------------------------------------------------
    /// Blocking send timeout
    pub send_timeout_ms: u64,

    /// Blocking receive timeout, used unless a call supplies its own
    pub receive_timeout_ms: u64,

    /// Upper bound on the connect attempt
    pub connect_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Socket Tuning
    // -------------------------------------------------------------------------
    /// SO_SNDBUF size in bytes
    pub send_buffer_size: usize,

    /// SO_RCVBUF size in bytes, also the size of each read
    pub receive_buffer_size: usize,

    /// IP time-to-live / unicast hop limit
    pub ttl: u32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            port: 50002,
            send_timeout_ms: 3000,
            receive_timeout_ms: 10000,
            connect_timeout_ms: 60000,
            send_buffer_size: 8192,
            receive_buffer_size: 8192,
            ttl: 32,
        }
    }
}

impl ConnectionConfig {
    /// Create a new config builder
    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::default()
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }

    pub fn receive_timeout(&self) -> Duration {
        Duration::from_millis(self.receive_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Reject values the socket layer would refuse
    ///
    /// Zero durations are not accepted as socket timeouts, and a zero-sized
    /// receive buffer would make every read return nothing.
    pub fn validate(&self) -> Result<()> {
        if self.send_timeout_ms == 0 {
            return Err(MarkerError::Config("send timeout must be non-zero".to_string()));
        }
        if self.receive_timeout_ms == 0 {
            return Err(MarkerError::Config("receive timeout must be non-zero".to_string()));
        }
        if self.connect_timeout_ms == 0 {
            return Err(MarkerError::Config("connect timeout must be non-zero".to_string()));
        }
        if self.send_buffer_size == 0 || self.receive_buffer_size == 0 {
            return Err(MarkerError::Config(format!(
                "buffer sizes must be non-zero (send={}, receive={})",
                self.send_buffer_size, self.receive_buffer_size
            )));
        }
        if self.ttl == 0 || self.ttl > 255 {
            return Err(MarkerError::Config(format!("ttl out of range: {}", self.ttl)));
        }
        Ok(())
    }
}

/// Builder for ConnectionConfig
#[derive(Default)]
pub struct ConnectionConfigBuilder {
    config: ConnectionConfig,
}

impl ConnectionConfigBuilder {
    /// Set the controller TCP port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the send timeout (in milliseconds)
    pub fn send_timeout_ms(mut self, ms: u64) -> Self {
        self.config.send_timeout_ms = ms;
        self
    }

    /// Set the default receive timeout (in milliseconds)
    pub fn receive_timeout_ms(mut self, ms: u64) -> Self {
        self.config.receive_timeout_ms = ms;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the socket send buffer size (in bytes)
    pub fn send_buffer_size(mut self, size: usize) -> Self {
        self.config.send_buffer_size = size;
        self
    }

    /// Set the socket receive buffer size (in bytes)
    pub fn receive_buffer_size(mut self, size: usize) -> Self {
        self.config.receive_buffer_size = size;
        self
    }

    /// Set the IP time-to-live
    pub fn ttl(mut self, ttl: u32) -> Self {
        self.config.ttl = ttl;
        self
    }

    pub fn build(self) -> ConnectionConfig {
        self.config
    }
}
