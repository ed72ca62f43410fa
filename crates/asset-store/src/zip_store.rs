use crate::entry::{EntryFile, EntryInfo};
use crate::path::{is_ancestor_of, validate_path, ROOT};
use crate::{ContentStore, Error, File, FileMode, Result};
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, trace};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;
use zip::{CompressionMethod, ZipArchive};

const DEFAULT_FILE_MODE: FileMode = FileMode::file(0o444);
const DEFAULT_DIR_MODE: FileMode = FileMode::dir(0o555);

/// Zip-specific metadata, exposed through [`crate::FileInfo::sys`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipEntryInfo {
    /// Compression method of the entry inside the archive.
    pub compression: CompressionMethod,
    /// Size of the entry data inside the archive.
    pub compressed_size: u64,
    /// CRC32 of the uncompressed entry data.
    pub crc32: u32,
}

/// Represents an entry within a zip asset pack.
#[derive(Debug, Clone)]
struct ZipEntry {
    /// Position in the archive's central directory.
    index: usize,
    is_dir: bool,
    mode: FileMode,
    modified: Option<DateTime<Utc>>,
    zip: Arc<ZipEntryInfo>,
}

/// Read-only store over a zip archive held in memory.
#[derive(Debug, Clone)]
pub struct ZipStore {
    archive: ZipArchive<Cursor<Bytes>>,
    entries: BTreeMap<String, ZipEntry>,
}

impl ZipStore {
    /// Load a zip archive from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading zip store from {}", path.display());
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Parse a zip archive held in memory.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data.into()))?;
        let mut entries = BTreeMap::new();

        for index in 0..archive.len() {
            let file = archive.by_index(index)?;
            let is_dir = file.is_dir();
            let name = file.name().trim_end_matches('/').to_string();

            if validate_path(&name).is_err() || name == ROOT {
                debug!("skipping zip entry with unusable name {:?}", file.name());
                continue;
            }

            let mode = match file.unix_mode() {
                Some(mode) if is_dir => FileMode::dir(mode),
                Some(mode) => FileMode::from_unix(mode),
                None if is_dir => DEFAULT_DIR_MODE,
                None => DEFAULT_FILE_MODE,
            };

            entries.insert(
                name,
                ZipEntry {
                    index,
                    is_dir,
                    mode,
                    modified: file.last_modified().and_then(to_utc),
                    zip: Arc::new(ZipEntryInfo {
                        compression: file.compression(),
                        compressed_size: file.compressed_size(),
                        crc32: file.crc32(),
                    }),
                },
            );
        }

        debug!("zip store holds {} entries", entries.len());
        Ok(Self { archive, entries })
    }

    /// Number of entries, including explicit directory entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_implied_directory(&self, path: &str) -> bool {
        path == ROOT || self.entries.keys().any(|entry| is_ancestor_of(path, entry))
    }

    fn read_entry(&self, entry: &ZipEntry) -> Result<Bytes> {
        // Clones share the parsed central directory.
        let mut archive = self.archive.clone();
        let mut file = archive.by_index(entry.index)?;
        // The size recorded in the archive is not trusted for allocation.
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(Bytes::from(data))
    }
}

impl ContentStore for ZipStore {
    fn open(&self, path: &str) -> Result<Box<dyn File>> {
        trace!("open({:?})", path);
        validate_path(path)?;

        if let Some(entry) = self.entries.get(path) {
            if entry.is_dir {
                let info = EntryInfo::directory(path, entry.mode)
                    .with_modified(entry.modified)
                    .with_sys(entry.zip.clone());
                return Ok(Box::new(EntryFile::directory(path, info)));
            }

            let data = self.read_entry(entry)?;
            let info = EntryInfo::file(path, data.len() as u64, entry.mode)
                .with_modified(entry.modified)
                .with_sys(entry.zip.clone());
            return Ok(Box::new(EntryFile::regular(path, info, data)));
        }

        if self.is_implied_directory(path) {
            let info = EntryInfo::directory(path, DEFAULT_DIR_MODE);
            return Ok(Box::new(EntryFile::directory(path, info)));
        }

        Err(Error::NotFound(path.to_string()))
    }
}

fn to_utc(time: zip::DateTime) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(
        i32::from(time.year()),
        u32::from(time.month()),
        u32::from(time.day()),
    )?
    .and_hms_opt(
        u32::from(time.hour()),
        u32::from(time.minute()),
        u32::from(time.second()),
    )
    .map(|naive| naive.and_utc())
}
