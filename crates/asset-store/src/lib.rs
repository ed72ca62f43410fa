//! # asset-store
//!
//! Read-only, path-addressable content stores for embedded assets.
//!
//! This crate provides:
//! - The [`ContentStore`], [`File`] and [`FileInfo`] capability traits
//! - [`MemoryStore`] for assets compiled into the binary
//! - [`ZipStore`] for assets shipped as a zip archive
//! - Path validation shared by every store
//!
//! Paths are slash-separated and unrooted (`"static/app.js"`); `"."` names
//! the root directory.
//!
//! ## Example
//!
//! ```ignore
//! use asset_store::{read_all, ContentStore, ZipStore};
//!
//! let store = ZipStore::load("assets.zip")?;
//! let mut file = store.open("static/app.js")?;
//! println!("{} bytes", file.stat()?.size());
//! let data = read_all(file.as_mut())?;
//! file.close()?;
//! ```

mod entry;
mod error;
mod fs;
mod memory;
mod mode;
mod path;
mod reader;
mod zip_store;

pub use entry::EntryInfo;
pub use error::{Error, Result};
pub use fs::{Chunk, ContentStore, File, FileInfo};
pub use memory::{MemoryStore, MemoryStoreBuilder};
pub use mode::FileMode;
pub use path::{base_name, validate_path, ROOT};
pub use reader::{read_all, FileReader};
pub use zip_store::{ZipEntryInfo, ZipStore};
