//! Content-adaptive avatar normalization.
//!
//! A photo is sampled into an [`sample::ImageProfile`], the profile drives [`normalize::BlendParams`],
//! and the overlays are drawn inside the avatar clip. Anything that cannot be decoded becomes a
//! placeholder instead of an error.

/// Blend parameters and the avatar pipeline.
pub mod normalize;
/// Luminance and saturation sampling.
pub mod sample;
pub mod shading;
