use crate::{GzipFile, OverlayConfig};
use asset_store::{ContentStore, Error, File, FileReader, Result};
use flate2::read::MultiGzDecoder;
use log::{debug, trace};
use std::io::{self, Read};

/// Suffix of the compressed sibling of a logical path.
pub const GZIP_SUFFIX: &str = ".gz";

/// Serves assets from a store whether they are stored raw or gzip-compressed.
///
/// A logical path `P` is looked up as `P` first. When that fails, `P.gz` is
/// opened instead and decompressed in full, and the returned handle reports
/// the decompressed size and the name without the suffix.
///
/// Every `open` is independent: two opens of the same compressed asset each
/// decompress it into their own buffer.
#[derive(Debug, Clone)]
pub struct GzipOverlay<S> {
    store: S,
    config: OverlayConfig,
}

impl<S: ContentStore> GzipOverlay<S> {
    /// Create an overlay with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, OverlayConfig::default())
    }

    pub fn with_config(store: S, config: OverlayConfig) -> Self {
        Self { store, config }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Open the asset at the logical `path`.
    ///
    /// When the raw lookup fails its error is discarded; if the compressed
    /// lookup fails too, the compressed lookup's error is returned.
    pub fn open(&self, path: &str) -> Result<Box<dyn File>> {
        trace!("open({:?})", path);

        match self.store.open(path) {
            Ok(file) => return Ok(file),
            Err(err) if !err.is_not_found() => debug!("raw open of {} failed: {}", path, err),
            Err(_) => {}
        }

        let gz_path = format!("{}{}", path, GZIP_SUFFIX);
        debug!("{} not stored raw, trying {}", path, gz_path);
        let mut file = self.store.open(&gz_path)?;

        match self.decompress(&gz_path, file.as_mut()) {
            Ok(content) => {
                debug!("decompressed {} ({} bytes)", gz_path, content.len());
                Ok(Box::new(GzipFile::new(
                    file,
                    content,
                    self.config.eof_cursor,
                )))
            }
            Err(err) => {
                if let Err(close_err) = file.close() {
                    debug!("closing {} after failed open: {}", gz_path, close_err);
                }
                Err(err)
            }
        }
    }

    fn decompress(&self, path: &str, file: &mut dyn File) -> Result<Vec<u8>> {
        let mut decoder = MultiGzDecoder::new(FileReader::new(file));

        // The header is parsed on construction; its error surfaces on the first read.
        if decoder.header().is_none() {
            let source = match decoder.read(&mut [0u8; 1]) {
                Err(err) => err,
                Ok(_) => io::Error::new(io::ErrorKind::InvalidData, "incomplete gzip header"),
            };
            return Err(Error::InvalidGzipHeader {
                path: path.to_string(),
                source,
            });
        }

        let mut content = Vec::new();
        let drained = match self.config.max_decompressed_len {
            Some(limit) => decoder
                .by_ref()
                .take(limit.saturating_add(1))
                .read_to_end(&mut content),
            None => decoder.read_to_end(&mut content),
        };
        drained.map_err(|source| Error::Decompress {
            path: path.to_string(),
            source,
        })?;

        if let Some(limit) = self.config.max_decompressed_len {
            if content.len() as u64 > limit {
                return Err(Error::TooLarge {
                    path: path.to_string(),
                    limit,
                });
            }
        }

        Ok(content)
    }
}
