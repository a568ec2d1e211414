//! Avatar acquisition and decoding.

/// Image decoding.
pub mod decode;
pub mod source;
