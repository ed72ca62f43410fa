//! # asset-fs
//!
//! Transparent gzip decompression over read-only asset stores.
//!
//! Asset packs often ship large text assets pre-compressed as `name.gz`
//! next to (or instead of) `name`. [`GzipOverlay`] hides the difference:
//! callers open the logical path and always read the decompressed content.
//!
//! This crate provides:
//! - [`GzipOverlay`], the raw-then-compressed lookup
//! - [`GzipFile`], a sequential handle over the decompressed buffer
//! - [`GzipFileInfo`], metadata reporting the decompressed size
//! - [`OverlayConfig`], loadable from TOML
//! - The `asset-cat` binary (with the `cli` feature)
//!
//! ## Example
//!
//! ```ignore
//! use asset_fs::{read_all, GzipOverlay, ZipStore};
//!
//! let overlay = GzipOverlay::new(ZipStore::load("assets.zip")?);
//!
//! // Served from `static/app.js.gz` when `static/app.js` is not stored raw.
//! let mut file = overlay.open("static/app.js")?;
//! let stat = file.stat()?;
//! assert_eq!(stat.name(), "app.js");
//!
//! let content = read_all(file.as_mut())?;
//! assert_eq!(content.len() as u64, stat.size());
//! file.close()?;
//! ```
//!
//! ## End-of-data reads
//!
//! A decompressed handle signals end-of-data on the read that delivers its
//! last bytes and, by default, does not move its cursor past them: reading
//! again returns the same final chunk. Set [`EofCursor::Advance`] to get
//! `Chunk::end(0)` on later reads instead, or wrap the handle in a
//! [`FileReader`] for `std::io::Read` semantics.

mod config;
mod file;
mod info;
mod overlay;

pub use config::{EofCursor, OverlayConfig};
pub use file::GzipFile;
pub use info::GzipFileInfo;
pub use overlay::{GzipOverlay, GZIP_SUFFIX};

// Re-export asset-store types for convenience
pub use asset_store::{
    read_all, Chunk, ContentStore, Error, File, FileInfo, FileMode, FileReader, MemoryStore,
    Result, ZipStore,
};
