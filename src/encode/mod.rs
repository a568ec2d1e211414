//! Output encoding.

/// PNG output.
pub mod png;
