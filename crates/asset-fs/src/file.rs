use crate::{EofCursor, GzipFileInfo};
use asset_store::{Chunk, File, FileInfo, Result};
use log::trace;

/// Handle for an asset that only exists as a gzip-compressed sibling.
///
/// The content is fully decompressed at open time. The compressed handle is
/// kept open for `stat` and `close` but never read again.
#[derive(Debug)]
pub struct GzipFile {
    /// Handle of the compressed sibling.
    inner: Box<dyn File>,
    /// Decompressed content.
    content: Vec<u8>,
    /// Bytes delivered so far; never exceeds `content.len()`.
    position: usize,
    eof_cursor: EofCursor,
}

impl GzipFile {
    pub(crate) fn new(inner: Box<dyn File>, content: Vec<u8>, eof_cursor: EofCursor) -> Self {
        Self {
            inner,
            content,
            position: 0,
            eof_cursor,
        }
    }

    /// Decompressed length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Current read cursor.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl File for GzipFile {
    fn stat(&self) -> Result<Box<dyn FileInfo>> {
        let info = self.inner.stat()?;
        Ok(Box::new(GzipFileInfo::new(info, self.content.len() as u64)))
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<Chunk> {
        let remaining = &self.content[self.position..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);

        if n == remaining.len() {
            if self.eof_cursor == EofCursor::Advance {
                self.position += n;
            }
            return Ok(Chunk::end(n));
        }

        self.position += n;
        Ok(Chunk::more(n))
    }

    fn close(self: Box<Self>) -> Result<()> {
        trace!("close(gzip, {} bytes)", self.content.len());
        self.inner.close()
    }
}
