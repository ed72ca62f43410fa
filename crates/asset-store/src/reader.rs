use crate::{Error, File, Result};
use std::io::{self, Read};

const READ_BUF_SIZE: usize = 8 * 1024;

/// Adapts a [`File`] to [`std::io::Read`].
///
/// The chunk that signals end-of-data is delivered once; every later call
/// returns `Ok(0)`. Handles that keep repeating their final chunk can be
/// drained with `read_to_end` or `io::copy` without duplicating it.
pub struct FileReader<'a> {
    file: &'a mut dyn File,
    done: bool,
}

impl<'a> FileReader<'a> {
    pub fn new(file: &'a mut dyn File) -> Self {
        Self { file, done: false }
    }
}

impl Read for FileReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.done || buf.is_empty() {
            return Ok(0);
        }

        let chunk = self.file.read(buf).map_err(into_io_error)?;
        if chunk.eof {
            self.done = true;
        }
        Ok(chunk.len)
    }
}

/// Read the whole content of `file`, stopping at the first end-of-data chunk.
pub fn read_all(file: &mut dyn File) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut buf = [0u8; READ_BUF_SIZE];
    loop {
        let chunk = file.read(&mut buf)?;
        data.extend_from_slice(&buf[..chunk.len]);
        if chunk.eof || chunk.len == 0 {
            return Ok(data);
        }
    }
}

fn into_io_error(err: Error) -> io::Error {
    match err {
        Error::Io(err) => err,
        other => io::Error::other(other),
    }
}
