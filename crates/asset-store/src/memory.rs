use crate::entry::{EntryFile, EntryInfo};
use crate::path::{is_ancestor_of, validate_path, ROOT};
use crate::{ContentStore, Error, File, FileMode, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use log::trace;
use std::collections::BTreeMap;

const FILE_MODE: FileMode = FileMode::file(0o444);
const DIR_MODE: FileMode = FileMode::dir(0o555);

#[derive(Debug, Clone)]
struct MemoryEntry {
    data: Bytes,
    modified: Option<DateTime<Utc>>,
}

/// Read-only store backed by an in-memory map of paths to bytes.
///
/// Directories are implied by the paths of the files below them.
///
/// ```ignore
/// use asset_store::MemoryStore;
/// use bytes::Bytes;
///
/// let store = MemoryStore::builder()
///     .file("index.html", Bytes::from_static(include_bytes!("../web/index.html")))
///     .file("app.js.gz", Bytes::from_static(include_bytes!("../web/app.js.gz")))
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, MemoryEntry>,
}

impl MemoryStore {
    /// Create a builder for a new store.
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::default()
    }

    /// Number of files in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a file exists at exactly `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    fn is_directory(&self, path: &str) -> bool {
        path == ROOT || self.entries.keys().any(|entry| is_ancestor_of(path, entry))
    }
}

impl ContentStore for MemoryStore {
    fn open(&self, path: &str) -> Result<Box<dyn File>> {
        trace!("open({:?})", path);
        validate_path(path)?;

        if let Some(entry) = self.entries.get(path) {
            let info = EntryInfo::file(path, entry.data.len() as u64, FILE_MODE)
                .with_modified(entry.modified);
            return Ok(Box::new(EntryFile::regular(path, info, entry.data.clone())));
        }

        if self.is_directory(path) {
            let info = EntryInfo::directory(path, DIR_MODE);
            return Ok(Box::new(EntryFile::directory(path, info)));
        }

        Err(Error::NotFound(path.to_string()))
    }
}

/// Builder for [`MemoryStore`].
#[derive(Debug, Default)]
pub struct MemoryStoreBuilder {
    entries: Vec<(String, MemoryEntry)>,
}

impl MemoryStoreBuilder {
    /// Add a file.
    pub fn file(self, path: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.push(path.into(), data.into(), None)
    }

    /// Add a file with a modification time.
    pub fn file_with_modified(
        self,
        path: impl Into<String>,
        data: impl Into<Bytes>,
        modified: DateTime<Utc>,
    ) -> Self {
        self.push(path.into(), data.into(), Some(modified))
    }

    fn push(mut self, path: String, data: Bytes, modified: Option<DateTime<Utc>>) -> Self {
        self.entries.push((path, MemoryEntry { data, modified }));
        self
    }

    /// Build the store, rejecting invalid paths.
    pub fn build(self) -> Result<MemoryStore> {
        let mut entries = BTreeMap::new();
        for (path, entry) in self.entries {
            validate_path(&path)?;
            if path == ROOT {
                return Err(Error::InvalidPath(path));
            }
            entries.insert(path, entry);
        }
        Ok(MemoryStore { entries })
    }
}
