use thiserror::Error;

/// Errors that can occur when opening or reading assets.
#[derive(Debug, Error)]
pub enum Error {
    /// No asset exists at the given path.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The path is not a valid slash-separated store path.
    #[error("invalid asset path: {0:?}")]
    InvalidPath(String),

    /// A read was attempted on a directory handle.
    #[error("is a directory: {0}")]
    IsDirectory(String),

    /// The gzip member header of a compressed asset could not be parsed.
    #[error("invalid gzip header in {path}: {source}")]
    InvalidGzipHeader {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The gzip stream was truncated or corrupted.
    #[error("failed to decompress {path}: {source}")]
    Decompress {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Decompressed content exceeded the configured limit.
    #[error("decompressed size of {path} exceeds limit of {limit} bytes")]
    TooLarge { path: String, limit: u64 },

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Error from the zip library.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error means the path does not resolve to any asset.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Result type for asset-store operations.
pub type Result<T> = std::result::Result<T, Error>;
