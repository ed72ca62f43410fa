//! Capability traits shared by content stores and the handles they return.

use crate::{FileMode, Result};
use chrono::{DateTime, Utc};
use std::any::Any;
use std::fmt::Debug;

/// Outcome of a single [`File::read`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Number of bytes written into the destination.
    pub len: usize,
    /// Whether this read signals end-of-data.
    pub eof: bool,
}

impl Chunk {
    /// Bytes were read and more data may follow.
    pub const fn more(len: usize) -> Self {
        Self { len, eof: false }
    }

    /// Final chunk; `len` may be zero.
    pub const fn end(len: usize) -> Self {
        Self { len, eof: true }
    }
}

/// Metadata describing a file or directory in a store.
pub trait FileInfo: Send + Sync + Debug {
    /// Base name of the file.
    fn name(&self) -> &str;
    /// Length in bytes for regular files.
    fn size(&self) -> u64;
    fn mode(&self) -> FileMode;
    /// Modification time, if the store records one.
    fn modified(&self) -> Option<DateTime<Utc>>;
    fn is_dir(&self) -> bool;
    /// Store-specific metadata.
    fn sys(&self) -> Option<&(dyn Any + Send + Sync)>;
}

/// An open, read-only file handle.
pub trait File: Send + Debug {
    /// Metadata for the open file.
    fn stat(&self) -> Result<Box<dyn FileInfo>>;

    /// Read the next bytes of the file into `buf`.
    fn read(&mut self, buf: &mut [u8]) -> Result<Chunk>;

    /// Release the handle.
    fn close(self: Box<Self>) -> Result<()>;
}

/// A read-only, path-addressable content store.
pub trait ContentStore: Send + Sync {
    /// Open the file or directory at `path`.
    ///
    /// Fails with [`crate::Error::NotFound`] when nothing exists at `path`.
    fn open(&self, path: &str) -> Result<Box<dyn File>>;
}

impl<S: ContentStore + ?Sized> ContentStore for &S {
    fn open(&self, path: &str) -> Result<Box<dyn File>> {
        (**self).open(path)
    }
}

impl<S: ContentStore + ?Sized> ContentStore for std::sync::Arc<S> {
    fn open(&self, path: &str) -> Result<Box<dyn File>> {
        (**self).open(path)
    }
}
