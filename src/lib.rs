//! rankcard renders rank "status cards": a fixed-size PNG built from a ranking profile (handle,
//! score, avatar), themed by the tier the score falls in.
//!
//! The pipeline is:
//!
//! - Derive a [`Tier`] from the score and resolve its [`Theme`]
//! - Draw frame and header chrome through a [`Surface`]
//! - Normalize the avatar photo against the theme (or draw a placeholder)
//! - Lay out the info rows, fitting each value into its row
//! - Encode the canvas as PNG
//!
//! [`CardRenderer`] ties this together over the `vello_cpu` rasterizer. [`compose_card`] can also
//! drive any other [`Surface`], e.g. [`RecordingSurface`] in tests.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod assets;
pub mod avatar;
pub mod compose;
/// Process configuration.
pub mod config;
pub mod effects;
pub mod encode;
pub mod foundation;
/// Input profile record.
pub mod profile;
pub mod rank;
pub mod render;
pub mod text;

pub use crate::assets::source::{AutoImageSource, FsImageSource, HttpImageSource, ImageSource};
pub use crate::avatar::normalize::{AvatarOutcome, BlendParams, PlaceholderReason};
pub use crate::avatar::sample::{ImageProfile, sample_image_profile};
pub use crate::compose::card::{CardOptions, CardRenderer, CardSummary, RenderResult, compose_card};
pub use crate::compose::fingerprint::CardFingerprint;
pub use crate::compose::layout::CardLayout;
pub use crate::config::EngineConfig;
pub use crate::foundation::core::{Bitmap, Canvas, Point, Rect, Rgb, Rgba8};
pub use crate::foundation::error::{CardError, CardResult};
pub use crate::profile::Profile;
pub use crate::rank::theme::{Theme, resolve_theme};
pub use crate::rank::tier::{Tier, derive_tier};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::recording::RecordingSurface;
pub use crate::render::surface::Surface;
pub use crate::text::fit::fit_size;
pub use crate::text::fonts::{FontFace, FontSet};
