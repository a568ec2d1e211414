//! Typeface loading, single-line shaping and size fitting.

/// Shrink-to-fit font sizing.
pub mod fit;
/// The two card typefaces.
pub mod fonts;
/// Parley shaping.
pub mod layout;
