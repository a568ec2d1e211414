//! Card layout and the composer that draws a whole card.

/// Card background.
pub mod backdrop;
/// The card composer and renderer.
pub mod card;
/// Input fingerprints.
pub mod fingerprint;
/// Fixed card regions.
pub mod layout;
