//! Error types for lasermark
//!
//! Provides a unified error type for all operations.

use std::net::SocketAddr;

use thiserror::Error;

/// Result type alias using MarkerError
pub type Result<T> = std::result::Result<T, MarkerError>;

/// Unified error type for laser marker operations
#[derive(Debug, Error)]
pub enum MarkerError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("operation impossible: a connection is already established")]
    AlreadyConnected,

    #[error("no connection established")]
    NotConnected,

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("no response within {timeout_ms}ms from {addr}")]
    ConnectTimeout { addr: SocketAddr, timeout_ms: u64 },

    #[error("failed to connect to {addr}: {source}")]
    ConnectFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("BLK count: {blocks}, but CharacterString count: {strings}")]
    ArgumentMismatch { blocks: usize, strings: usize },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
