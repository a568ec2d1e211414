use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{CardError, CardResult};

/// Typeface weight used by a text draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Body text and field values.
    Regular,
    /// Labels, rank letter and the placeholder initial.
    Bold,
}

/// File name of the regular face inside a font directory.
pub const REGULAR_FILE: &str = "Roboto-Regular.ttf";
/// File name of the bold face inside a font directory.
pub const BOLD_FILE: &str = "Roboto-Bold.ttf";

/// Well-known (regular, bold) pairs probed by [`FontSet::discover`].
const SYSTEM_CANDIDATES: &[(&str, &str)] = &[
    (
        "/usr/share/fonts/truetype/roboto/unhinted/RobotoTTF/Roboto-Regular.ttf",
        "/usr/share/fonts/truetype/roboto/unhinted/RobotoTTF/Roboto-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ),
    (
        "/Library/Fonts/Arial.ttf",
        "/Library/Fonts/Arial Bold.ttf",
    ),
    (
        "C:\\Windows\\Fonts\\arial.ttf",
        "C:\\Windows\\Fonts\\arialbd.ttf",
    ),
];

/// The two typefaces every card is laid out with. Loaded once at startup, then shared
/// read-only between renders.
#[derive(Clone, Debug)]
pub struct FontSet {
    regular: Arc<Vec<u8>>,
    bold: Arc<Vec<u8>>,
}

impl FontSet {
    /// Build from in-memory font files. Rejects data that is not a TrueType/OpenType font.
    pub fn from_bytes(regular: Vec<u8>, bold: Vec<u8>) -> CardResult<Self> {
        check_font_magic("regular", &regular)?;
        check_font_magic("bold", &bold)?;
        Ok(Self {
            regular: Arc::new(regular),
            bold: Arc::new(bold),
        })
    }

    /// Load `Roboto-Regular.ttf` and `Roboto-Bold.ttf` from `dir`.
    pub fn load_dir(dir: &Path) -> CardResult<Self> {
        Self::load_files(&dir.join(REGULAR_FILE), &dir.join(BOLD_FILE))
    }

    /// Load the two faces from explicit paths.
    #[tracing::instrument]
    pub fn load_files(regular: &Path, bold: &Path) -> CardResult<Self> {
        let read = |p: &Path| -> CardResult<Vec<u8>> {
            std::fs::read(p)
                .with_context(|| format!("read font '{}'", p.display()))
                .map_err(|e| CardError::asset(format!("{e:#}")))
        };
        let out = Self::from_bytes(read(regular)?, read(bold)?)?;
        tracing::debug!(
            regular = out.regular.len(),
            bold = out.bold.len(),
            "fonts loaded"
        );
        Ok(out)
    }

    /// Probe well-known system locations for a usable regular/bold pair.
    pub fn discover() -> Option<Self> {
        Self::discover_in(SYSTEM_CANDIDATES.iter().map(|(r, b)| {
            (PathBuf::from(r), PathBuf::from(b))
        }))
    }

    /// First candidate pair that loads successfully.
    pub fn discover_in(candidates: impl IntoIterator<Item = (PathBuf, PathBuf)>) -> Option<Self> {
        candidates
            .into_iter()
            .filter(|(r, b)| r.is_file() && b.is_file())
            .find_map(|(r, b)| Self::load_files(&r, &b).ok())
    }

    /// Raw bytes of one face.
    pub fn bytes(&self, face: FontFace) -> &Arc<Vec<u8>> {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
        }
    }
}

fn check_font_magic(which: &str, bytes: &[u8]) -> CardResult<()> {
    const MAGICS: [[u8; 4]; 4] = [*b"\x00\x01\x00\x00", *b"OTTO", *b"true", *b"ttcf"];
    match bytes.get(..4) {
        Some(head) if MAGICS.iter().any(|m| m == head) => Ok(()),
        _ => Err(CardError::asset(format!(
            "{which} font is not a TrueType/OpenType file"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
