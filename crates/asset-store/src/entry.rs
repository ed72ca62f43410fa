//! File handles and metadata shared by the built-in stores.

use crate::path::base_name;
use crate::{Chunk, Error, File, FileInfo, FileMode, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use log::trace;
use std::any::Any;
use std::sync::Arc;

/// Metadata for an entry of a built-in store.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    name: String,
    size: u64,
    mode: FileMode,
    modified: Option<DateTime<Utc>>,
    sys: Option<Arc<dyn Any + Send + Sync>>,
}

impl EntryInfo {
    pub(crate) fn file(path: &str, size: u64, mode: FileMode) -> Self {
        Self {
            name: base_name(path).to_string(),
            size,
            mode,
            modified: None,
            sys: None,
        }
    }

    pub(crate) fn directory(path: &str, mode: FileMode) -> Self {
        Self::file(path, 0, mode)
    }

    pub(crate) fn with_modified(mut self, modified: Option<DateTime<Utc>>) -> Self {
        self.modified = modified;
        self
    }

    pub(crate) fn with_sys(mut self, sys: Arc<dyn Any + Send + Sync>) -> Self {
        self.sys = Some(sys);
        self
    }
}

impl FileInfo for EntryInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mode(&self) -> FileMode {
        self.mode
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }

    fn sys(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.sys.as_deref()
    }
}

#[derive(Debug)]
enum Content {
    Bytes { data: Bytes, position: usize },
    Directory,
}

/// Open handle returned by the built-in stores.
#[derive(Debug)]
pub(crate) struct EntryFile {
    path: String,
    info: EntryInfo,
    content: Content,
}

impl EntryFile {
    pub(crate) fn regular(path: &str, info: EntryInfo, data: Bytes) -> Self {
        Self {
            path: path.to_string(),
            info,
            content: Content::Bytes { data, position: 0 },
        }
    }

    pub(crate) fn directory(path: &str, info: EntryInfo) -> Self {
        Self {
            path: path.to_string(),
            info,
            content: Content::Directory,
        }
    }
}

impl File for EntryFile {
    fn stat(&self) -> Result<Box<dyn FileInfo>> {
        Ok(Box::new(self.info.clone()))
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<Chunk> {
        let (data, position) = match &mut self.content {
            Content::Bytes { data, position } => (data, position),
            Content::Directory => return Err(Error::IsDirectory(self.path.clone())),
        };

        if buf.is_empty() {
            return Ok(Chunk::more(0));
        }

        let remaining = &data[*position..];
        if remaining.is_empty() {
            return Ok(Chunk::end(0));
        }

        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        *position += n;
        Ok(Chunk::more(n))
    }

    fn close(self: Box<Self>) -> Result<()> {
        trace!("close({})", self.path);
        Ok(())
    }
}
