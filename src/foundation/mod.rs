//! Core value types, the error taxonomy and small numeric helpers.

/// Geometry, colors and bitmaps.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
