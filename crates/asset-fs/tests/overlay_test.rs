use asset_fs::{
    read_all, Chunk, ContentStore, EofCursor, Error, File, FileInfo, FileMode, GzipOverlay,
    MemoryStore, OverlayConfig, Result, ZipStore,
};
use bytes::Bytes;
use flate2::{write::GzEncoder, Compression};
use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

const APP_JS: &[u8] = b"function main() {\n    console.log('hello');\n}\n";

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn create_test_store() -> MemoryStore {
    MemoryStore::builder()
        .file("index.html", "<html></html>")
        .file("static/js/app.js.gz", gzip(APP_JS))
        .file("static/hello.txt.gz", gzip(b"hello world"))
        .file("both.txt", "raw wins")
        .file("both.txt.gz", gzip(b"compressed loses"))
        .file("data.json.gz", "this is not gzip")
        .file("empty.bin.gz", "")
        .build()
        .unwrap()
}

/// Store wrapper that counts closed handles and can make stat and close fail.
#[derive(Clone)]
struct CountingStore {
    inner: MemoryStore,
    closed: Arc<AtomicUsize>,
    fail_stat: bool,
    fail_close: bool,
}

impl CountingStore {
    fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            closed: Arc::new(AtomicUsize::new(0)),
            fail_stat: false,
            fail_close: false,
        }
    }

    fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
struct CountingFile {
    inner: Box<dyn File>,
    closed: Arc<AtomicUsize>,
    fail_stat: bool,
    fail_close: bool,
}

impl ContentStore for CountingStore {
    fn open(&self, path: &str) -> Result<Box<dyn File>> {
        let inner = self.inner.open(path)?;
        Ok(Box::new(CountingFile {
            inner,
            closed: self.closed.clone(),
            fail_stat: self.fail_stat,
            fail_close: self.fail_close,
        }))
    }
}

impl File for CountingFile {
    fn stat(&self) -> Result<Box<dyn FileInfo>> {
        if self.fail_stat {
            return Err(Error::Config("stat failed".to_string()));
        }
        self.inner.stat()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<Chunk> {
        self.inner.read(buf)
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(Error::Config("close failed".to_string()));
        }
        self.inner.close()
    }
}

fn truncated_gzip(data: &[u8]) -> Vec<u8> {
    let compressed = gzip(data);
    compressed[..compressed.len() - 6].to_vec()
}

#[test]
fn raw_assets_pass_through() {
    let store = create_test_store();
    let overlay = GzipOverlay::new(&store);

    let mut file = overlay.open("index.html").unwrap();
    let stat = file.stat().unwrap();
    let native = store.open("index.html").unwrap().stat().unwrap();

    assert_eq!(stat.name(), native.name());
    assert_eq!(stat.size(), native.size());
    assert_eq!(stat.mode(), native.mode());
    assert_eq!(stat.modified(), native.modified());
    assert_eq!(read_all(file.as_mut()).unwrap(), b"<html></html>");

    // Raw handles keep the store's read semantics.
    assert_eq!(file.read(&mut [0u8; 8]).unwrap(), Chunk::end(0));
    file.close().unwrap();
}

#[test]
fn raw_directories_pass_through() {
    let overlay = GzipOverlay::new(create_test_store());
    let stat = overlay.open("static/js").unwrap().stat().unwrap();
    assert!(stat.is_dir());
    assert_eq!(stat.name(), "js");
}

#[test]
fn raw_form_takes_precedence() {
    let overlay = GzipOverlay::new(create_test_store());
    let mut file = overlay.open("both.txt").unwrap();
    assert_eq!(read_all(file.as_mut()).unwrap(), b"raw wins");
}

#[test]
fn compressed_assets_are_decompressed() {
    let store = create_test_store();
    let overlay = GzipOverlay::new(&store);

    let mut file = overlay.open("static/js/app.js").unwrap();
    let stat = file.stat().unwrap();

    assert_eq!(stat.name(), "app.js");
    assert_eq!(stat.size(), APP_JS.len() as u64);
    assert_ne!(stat.size(), gzip(APP_JS).len() as u64);
    assert_eq!(stat.mode(), FileMode::file(0o444));
    assert!(!stat.is_dir());
    assert_eq!(read_all(file.as_mut()).unwrap(), APP_JS);
    file.close().unwrap();
}

#[test]
fn compressed_read_holds_cursor_at_eof() {
    let overlay = GzipOverlay::new(create_test_store());
    let mut file = overlay.open("static/hello.txt").unwrap();
    let mut buf = [0u8; 5];

    assert_eq!(file.read(&mut buf).unwrap(), Chunk::more(5));
    assert_eq!(&buf, b"hello");
    assert_eq!(file.read(&mut buf).unwrap(), Chunk::more(5));
    assert_eq!(&buf, b" worl");
    assert_eq!(file.read(&mut buf).unwrap(), Chunk::end(1));
    assert_eq!(&buf[..1], b"d");

    let mut again = [0u8; 5];
    assert_eq!(file.read(&mut again).unwrap(), Chunk::end(1));
    assert_eq!(&again[..1], b"d");
}

#[test]
fn advance_mode_reports_empty_eof() {
    let config = OverlayConfig {
        eof_cursor: EofCursor::Advance,
        ..Default::default()
    };
    let overlay = GzipOverlay::with_config(create_test_store(), config);
    let mut file = overlay.open("static/hello.txt").unwrap();

    let mut buf = [0u8; 32];
    assert_eq!(file.read(&mut buf).unwrap(), Chunk::end(11));
    assert_eq!(&buf[..11], b"hello world");
    assert_eq!(file.read(&mut buf).unwrap(), Chunk::end(0));
}

#[test]
fn absent_asset_reports_compressed_lookup_error() {
    let overlay = GzipOverlay::new(create_test_store());
    let err = overlay.open("missing.css").unwrap_err();
    assert!(matches!(err, Error::NotFound(ref path) if path == "missing.css.gz"));
}

#[test]
fn invalid_path_reports_compressed_lookup_error() {
    let overlay = GzipOverlay::new(create_test_store());
    let err = overlay.open("/index.html").unwrap_err();
    assert!(matches!(err, Error::InvalidPath(ref path) if path == "/index.html.gz"));
}

#[test]
fn invalid_gzip_header_is_reported() {
    let overlay = GzipOverlay::new(create_test_store());

    let err = overlay.open("data.json").unwrap_err();
    assert!(matches!(err, Error::InvalidGzipHeader { ref path, .. } if path == "data.json.gz"));

    let err = overlay.open("empty.bin").unwrap_err();
    assert!(matches!(err, Error::InvalidGzipHeader { .. }));
}

#[test]
fn truncated_stream_is_reported() {
    let store = MemoryStore::builder()
        .file("big.txt.gz", truncated_gzip(&vec![b'x'; 4096]))
        .build()
        .unwrap();

    let err = GzipOverlay::new(store).open("big.txt").unwrap_err();
    assert!(matches!(err, Error::Decompress { ref path, .. } if path == "big.txt.gz"));
}

#[test]
fn failed_open_closes_compressed_handle() {
    let store = CountingStore::new(create_test_store());
    let overlay = GzipOverlay::new(store.clone());

    assert!(overlay.open("data.json").is_err());
    assert_eq!(store.closed(), 1);

    let file = overlay.open("static/hello.txt").unwrap();
    assert_eq!(store.closed(), 1);
    file.close().unwrap();
    assert_eq!(store.closed(), 2);
}

#[test]
fn drain_failure_closes_compressed_handle() {
    let inner = MemoryStore::builder()
        .file("big.txt.gz", truncated_gzip(&vec![b'x'; 4096]))
        .build()
        .unwrap();
    let store = CountingStore::new(inner);

    let err = GzipOverlay::new(store.clone()).open("big.txt").unwrap_err();
    assert!(matches!(err, Error::Decompress { ref path, .. } if path == "big.txt.gz"));
    assert_eq!(store.closed(), 1);
}

#[test]
fn size_limit_closes_compressed_handle() {
    let inner = MemoryStore::builder()
        .file("a.txt.gz", gzip(&[b'a'; 100]))
        .build()
        .unwrap();
    let store = CountingStore::new(inner);
    let config = OverlayConfig {
        max_decompressed_len: Some(10),
        ..Default::default()
    };

    let err = GzipOverlay::with_config(store.clone(), config)
        .open("a.txt")
        .unwrap_err();
    assert!(matches!(err, Error::TooLarge { limit: 10, .. }));
    assert_eq!(store.closed(), 1);
}

#[test]
fn close_failure_after_failed_open_is_discarded() {
    let mut store = CountingStore::new(create_test_store());
    store.fail_close = true;
    let overlay = GzipOverlay::new(store.clone());

    let err = overlay.open("data.json").unwrap_err();
    assert!(matches!(err, Error::InvalidGzipHeader { ref path, .. } if path == "data.json.gz"));
    assert_eq!(store.closed(), 1);
}

#[test]
fn native_stat_and_close_failures_pass_through() {
    let mut store = CountingStore::new(create_test_store());
    store.fail_stat = true;
    store.fail_close = true;
    let overlay = GzipOverlay::new(store.clone());

    let mut file = overlay.open("static/hello.txt").unwrap();
    let err = file.stat().unwrap_err();
    assert!(matches!(err, Error::Config(ref msg) if msg == "stat failed"));

    // Reads are served from the decompressed buffer regardless.
    assert_eq!(read_all(file.as_mut()).unwrap(), b"hello world");

    let err = file.close().unwrap_err();
    assert!(matches!(err, Error::Config(ref msg) if msg == "close failed"));
    assert_eq!(store.closed(), 1);
}

#[test]
fn decompressed_size_limit() {
    let data = vec![b'a'; 1000];
    let store = MemoryStore::builder()
        .file("a.txt.gz", gzip(&data))
        .build()
        .unwrap();

    let exact = OverlayConfig {
        max_decompressed_len: Some(1000),
        ..Default::default()
    };
    let mut file = GzipOverlay::with_config(&store, exact).open("a.txt").unwrap();
    assert_eq!(read_all(file.as_mut()).unwrap(), data);

    let small = OverlayConfig {
        max_decompressed_len: Some(999),
        ..Default::default()
    };
    let err = GzipOverlay::with_config(&store, small)
        .open("a.txt")
        .unwrap_err();
    assert!(matches!(err, Error::TooLarge { limit: 999, .. }));
}

#[test]
fn concatenated_members_are_joined() {
    let mut compressed = gzip(b"hello ");
    compressed.extend(gzip(b"world"));
    let store = MemoryStore::builder()
        .file("multi.txt.gz", compressed)
        .build()
        .unwrap();

    let mut file = GzipOverlay::new(store).open("multi.txt").unwrap();
    assert_eq!(file.stat().unwrap().size(), 11);
    assert_eq!(read_all(file.as_mut()).unwrap(), b"hello world");
}

#[test]
fn concurrent_opens_are_isolated() {
    let overlay = GzipOverlay::new(create_test_store());

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| read_all(overlay.open("static/js/app.js")?.as_mut())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), APP_JS);
        }
    });

    let mut first = overlay.open("static/hello.txt").unwrap();
    let mut second = overlay.open("static/hello.txt").unwrap();
    let mut buf = [0u8; 5];

    first.read(&mut buf).unwrap();
    first.read(&mut buf).unwrap();
    assert_eq!(&buf, b" worl");

    assert_eq!(second.read(&mut buf).unwrap(), Chunk::more(5));
    assert_eq!(&buf, b"hello");

    assert_eq!(first.read(&mut buf).unwrap(), Chunk::end(1));
    assert_eq!(&buf[..1], b"d");
}

#[test]
fn zip_asset_pack_end_to_end() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("assets.zip");

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options: FileOptions<()> =
        FileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file("index.html", options).unwrap();
    zip.write_all(b"<html></html>").unwrap();
    zip.start_file("static/app.js.gz", options).unwrap();
    zip.write_all(&gzip(APP_JS)).unwrap();
    let archive = zip.finish().unwrap().into_inner();
    std::fs::write(&path, &archive).unwrap();

    let overlay = GzipOverlay::new(ZipStore::load(&path).unwrap());

    let mut file = overlay.open("static/app.js").unwrap();
    let stat = file.stat().unwrap();
    assert_eq!(stat.name(), "app.js");
    assert_eq!(stat.size(), APP_JS.len() as u64);
    assert!(stat.modified().is_some());
    assert!(stat.sys().is_some());
    assert_eq!(read_all(file.as_mut()).unwrap(), APP_JS);

    let mut file = overlay.open("index.html").unwrap();
    assert_eq!(read_all(file.as_mut()).unwrap(), b"<html></html>");
}

#[test]
fn static_bytes_store() {
    static COMPRESSED: &[u8] = &[
        0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0xcb, 0x48, 0xcd, 0xc9,
        0xc9, 0x07, 0x00, 0x86, 0xa6, 0x10, 0x36, 0x05, 0x00, 0x00, 0x00,
    ];
    let store = MemoryStore::builder()
        .file("greeting.gz", Bytes::from_static(COMPRESSED))
        .build()
        .unwrap();

    let mut file = GzipOverlay::new(store).open("greeting").unwrap();
    assert_eq!(read_all(file.as_mut()).unwrap(), b"hello");
}
