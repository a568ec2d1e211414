//! Avatar acquisition: resolve a reference (path, `file://` or `http(s)://` URL) to raw bytes.
//!
//! Decoding happens later, inside the avatar component; sources only move bytes.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::foundation::error::{CardError, CardResult};

/// Default bound on a single avatar fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(5_000);
/// Largest avatar body accepted from any source.
pub const MAX_AVATAR_BYTES: u64 = 8 * 1024 * 1024;

/// Resolves an avatar reference to encoded image bytes.
///
/// Implementations must not block indefinitely and must be shareable across render threads.
pub trait ImageSource: Send + Sync {
    /// Fetch the bytes behind `reference`.
    fn fetch(&self, reference: &str) -> CardResult<Vec<u8>>;
}

/// Reads avatars from disk, optionally relative to a root directory.
#[derive(Clone, Debug, Default)]
pub struct FsImageSource {
    root: Option<PathBuf>,
}

impl FsImageSource {
    /// Resolve relative paths against the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, reference: &str) -> PathBuf {
        let raw = reference.strip_prefix("file://").unwrap_or(reference);
        let path = Path::new(raw);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ImageSource for FsImageSource {
    #[tracing::instrument(level = "debug", skip(self))]
    fn fetch(&self, reference: &str) -> CardResult<Vec<u8>> {
        let path = self.resolve(reference);
        let meta = std::fs::metadata(&path)
            .with_context(|| format!("stat avatar {}", path.display()))
            .map_err(|e| CardError::fetch(format!("{e:#}")))?;
        if meta.len() > MAX_AVATAR_BYTES {
            return Err(CardError::fetch(format!(
                "avatar {} is {} bytes, limit is {MAX_AVATAR_BYTES}",
                path.display(),
                meta.len()
            )));
        }
        std::fs::read(&path)
            .with_context(|| format!("read avatar {}", path.display()))
            .map_err(|e| CardError::fetch(format!("{e:#}")))
    }
}

/// Downloads avatars over HTTP(S) with a bounded timeout and body size.
#[derive(Clone, Debug)]
pub struct HttpImageSource {
    agent: ureq::Agent,
    max_bytes: u64,
}

impl HttpImageSource {
    /// Agent whose connect and overall request time are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout(timeout)
            .user_agent(concat!("rankcard/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            max_bytes: MAX_AVATAR_BYTES,
        }
    }

    /// Override the body size limit.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl Default for HttpImageSource {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

impl ImageSource for HttpImageSource {
    #[tracing::instrument(level = "debug", skip(self))]
    fn fetch(&self, reference: &str) -> CardResult<Vec<u8>> {
        let resp = self.agent.get(reference).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => {
                CardError::fetch(format!("GET {reference}: http status {code}"))
            }
            other => CardError::fetch(format!("GET {reference}: {other}")),
        })?;
        let mut body = Vec::new();
        resp.into_reader()
            .take(self.max_bytes + 1)
            .read_to_end(&mut body)
            .with_context(|| format!("read body of {reference}"))
            .map_err(|e| CardError::fetch(format!("{e:#}")))?;
        if body.len() as u64 > self.max_bytes {
            return Err(CardError::fetch(format!(
                "GET {reference}: body exceeds {} bytes",
                self.max_bytes
            )));
        }
        Ok(body)
    }
}

/// Dispatches on the reference: `http(s)://` goes to the network, anything else to disk.
#[derive(Clone, Debug, Default)]
pub struct AutoImageSource {
    /// Network half.
    pub http: HttpImageSource,
    /// Disk half.
    pub fs: FsImageSource,
}

impl AutoImageSource {
    /// Network fetches bounded by `timeout`, disk paths relative to the working directory.
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: HttpImageSource::new(timeout),
            fs: FsImageSource::new(),
        }
    }
}

impl ImageSource for AutoImageSource {
    fn fetch(&self, reference: &str) -> CardResult<Vec<u8>> {
        if is_http(reference) {
            self.http.fetch(reference)
        } else {
            self.fs.fetch(reference)
        }
    }
}

/// True for `http://` and `https://` references (scheme compared case-insensitively).
pub fn is_http(reference: &str) -> bool {
    let lower = reference
        .get(..8)
        .unwrap_or(reference)
        .to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
