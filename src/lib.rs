//! # lasermark
//!
//! Blocking TCP driver for laser marker controllers speaking the
//! line-oriented `WX`/`RX` command protocol:
//! - Deadline-bound connect with per-socket tuning
//! - Full-payload send loop and drain-until-idle reception
//! - Replies classified into a structured [`Response`], never a panic
//! - MD-X2500 command vocabulary on top
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Device Layer (Mdx2500)                       │
//! │        ready / error / start / program / strings             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ command strings
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Client                                 │
//! │          validate → send → receive → normalize               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Connection  │          │  Protocol   │
//!   │  (socket)   │          │  (codec)    │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use lasermark::{ConnectionConfig, Mdx2500};
//!
//! fn main() -> lasermark::Result<()> {
//!     let mut marker = Mdx2500::new(ConnectionConfig::default());
//!     marker.connect("192.168.0.10")?;
//!
//!     let response = marker.is_ready();
//!     println!("{}", response);
//!
//!     marker.disconnect();
//!     Ok(())
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;
pub mod shared;
pub mod device;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MarkerError, Result};
pub use config::ConnectionConfig;
pub use client::Client;
pub use shared::SharedClient;
pub use protocol::Response;
pub use device::Mdx2500;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of lasermark
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
