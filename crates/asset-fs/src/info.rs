use crate::GZIP_SUFFIX;
use asset_store::{FileInfo, FileMode};
use chrono::{DateTime, Utc};
use std::any::Any;

/// Metadata of a compressed sibling, reporting its decompressed size.
#[derive(Debug)]
pub struct GzipFileInfo {
    inner: Box<dyn FileInfo>,
    len: u64,
}

impl GzipFileInfo {
    pub fn new(inner: Box<dyn FileInfo>, len: u64) -> Self {
        Self { inner, len }
    }
}

impl FileInfo for GzipFileInfo {
    /// Store name with the trailing suffix removed.
    fn name(&self) -> &str {
        let name = self.inner.name();
        name.len()
            .checked_sub(GZIP_SUFFIX.len())
            .and_then(|end| name.get(..end))
            .unwrap_or(name)
    }

    fn size(&self) -> u64 {
        self.len
    }

    fn mode(&self) -> FileMode {
        self.inner.mode()
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        self.inner.modified()
    }

    fn is_dir(&self) -> bool {
        self.inner.is_dir()
    }

    fn sys(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.inner.sys()
    }
}
