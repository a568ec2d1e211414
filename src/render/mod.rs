//! Drawing surfaces and the primitives built on them.

/// `vello_cpu` surface.
pub mod cpu;
pub mod primitives;
/// Call-recording surface.
pub mod recording;
/// The surface trait.
pub mod surface;
