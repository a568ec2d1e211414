use std::path::PathBuf;
use std::time::Duration;

use crate::assets::source::{AutoImageSource, DEFAULT_FETCH_TIMEOUT};
use crate::compose::card::{CardOptions, DEFAULT_GRAIN_SEED};
use crate::foundation::error::{CardError, CardResult};
use crate::text::fonts::FontSet;

/// Directory holding `Roboto-Regular.ttf` and `Roboto-Bold.ttf`.
pub const ENV_FONT_DIR: &str = "RANKCARD_FONT_DIR";
/// Avatar fetch timeout in milliseconds.
pub const ENV_FETCH_TIMEOUT_MS: &str = "RANKCARD_FETCH_TIMEOUT_MS";
/// Grain seed, or `off`.
pub const ENV_GRAIN_SEED: &str = "RANKCARD_GRAIN_SEED";

/// Process-level settings, read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Explicit font directory; system locations are probed when unset.
    pub font_dir: Option<PathBuf>,
    /// Bound on one avatar fetch.
    pub fetch_timeout: Duration,
    /// Background grain seed, `None` when disabled.
    pub grain_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            font_dir: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            grain_seed: Some(DEFAULT_GRAIN_SEED),
        }
    }
}

impl EngineConfig {
    /// Read the `RANKCARD_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let font_dir = lookup(ENV_FONT_DIR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let fetch_timeout = match lookup(ENV_FETCH_TIMEOUT_MS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    tracing::warn!(key = ENV_FETCH_TIMEOUT_MS, value = %raw, "ignoring invalid timeout");
                    defaults.fetch_timeout
                }
            },
            None => defaults.fetch_timeout,
        };

        let grain_seed = match lookup(ENV_GRAIN_SEED) {
            Some(raw) => match parse_grain_seed(&raw) {
                Some(seed) => seed,
                None => {
                    tracing::warn!(key = ENV_GRAIN_SEED, value = %raw, "ignoring invalid grain seed");
                    defaults.grain_seed
                }
            },
            None => defaults.grain_seed,
        };

        Self {
            font_dir,
            fetch_timeout,
            grain_seed,
        }
    }

    /// Load the card faces. Failing here is fatal for the process.
    pub fn load_fonts(&self) -> CardResult<FontSet> {
        match &self.font_dir {
            Some(dir) => FontSet::load_dir(dir),
            None => FontSet::discover().ok_or_else(|| {
                CardError::asset(format!(
                    "no usable fonts found; set {ENV_FONT_DIR} to a directory with Roboto-Regular.ttf and Roboto-Bold.ttf"
                ))
            }),
        }
    }

    /// Render options at the default canvas.
    pub fn card_options(&self) -> CardOptions {
        CardOptions {
            grain_seed: self.grain_seed,
            ..CardOptions::default()
        }
    }

    /// Avatar source honoring the configured timeout.
    pub fn image_source(&self) -> AutoImageSource {
        AutoImageSource::new(self.fetch_timeout)
    }
}

/// `off`/`none` disables grain; otherwise a decimal seed. `None` means unparseable.
pub fn parse_grain_seed(raw: &str) -> Option<Option<u64>> {
    let v = raw.trim();
    if v.eq_ignore_ascii_case("off") || v.eq_ignore_ascii_case("none") {
        return Some(None);
    }
    v.parse::<u64>().ok().map(Some)
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
