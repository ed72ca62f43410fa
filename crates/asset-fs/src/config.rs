use asset_store::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Cursor behavior of a decompressed file when a read reaches end-of-data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EofCursor {
    /// The cursor stays put: every later read returns the same final chunk
    /// with end-of-data set again.
    #[default]
    Hold,
    /// The cursor moves to the end: later reads return zero bytes with
    /// end-of-data set.
    Advance,
}

/// Configuration for a [`crate::GzipOverlay`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Cursor behavior on the end-of-data read.
    pub eof_cursor: EofCursor,
    /// Upper bound on the decompressed size of a single asset.
    pub max_decompressed_len: Option<u64>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            eof_cursor: EofCursor::Hold,
            max_decompressed_len: None,
        }
    }
}

impl OverlayConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a config from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }
}
