//! Pixel kernels: coverage blur and premultiplied RGBA8 compositing.

/// Gaussian blur of coverage masks.
pub mod blur;
/// Source-over compositing.
pub mod composite;
