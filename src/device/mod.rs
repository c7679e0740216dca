//! Device Module
//!
//! Model-specific operations layered on [`crate::Client`].
//!
//! Command builders hold no socket state; the device wrapper only adds the
//! bookkeeping callers find convenient (e.g. the active program).

pub mod commands;
mod mdx2500;

pub use mdx2500::Mdx2500;
