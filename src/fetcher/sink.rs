use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Appends response bytes to a caller-owned growable buffer.
///
/// The buffer is never cleared; repeated transfers into the same buffer
/// accumulate in call order. A failed reservation is reported as
/// `ErrorKind::OutOfMemory`, which aborts the transfer instead of silently
/// truncating the response.
pub struct BufferSink<'a> {
    buf: &'a mut Vec<u8>,
}

impl<'a> BufferSink<'a> {
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        Self { buf }
    }
}

impl Write for BufferSink<'_> {
    fn write(&mut self, chunk: &[u8]) -> io::Result<usize> {
        if self.buf.try_reserve(chunk.len()).is_err() {
            return Err(io::Error::new(
                io::ErrorKind::OutOfMemory,
                "response buffer exhausted",
            ));
        }
        self.buf.extend_from_slice(chunk);
        Ok(chunk.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Owns the destination file of a download for the duration of one transfer.
///
/// Created with create/truncate semantics, so the file exists (empty) as soon
/// as the download starts. Dropping the sink closes the handle; the caller
/// drops it before resolving the transfer status.
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self {
            file: File::create(path)?,
        })
    }
}

impl Write for FileSink {
    fn write(&mut self, chunk: &[u8]) -> io::Result<usize> {
        self.file.write(chunk)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
