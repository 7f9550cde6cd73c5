//! Read/Write adapters that hash bytes as they pass through.

use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::fs::Filesystem;
use crate::hash::{Algorithm, Computation, Digest};

/// Default read buffer for streaming sources.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Hashes every byte read from the wrapped reader.
pub struct HashingReader<R> {
    reader: R,
    computation: Computation,
}

impl<R: Read> HashingReader<R> {
    pub fn new(reader: R, algorithm: Algorithm) -> Self {
        HashingReader {
            reader,
            computation: Computation::new(algorithm),
        }
    }

    /// Digest of everything read so far.
    pub fn finish(self) -> Digest {
        self.computation.digest()
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        self.computation.update(&buf[..n]);
        Ok(n)
    }
}

/// Hashes every byte the wrapped writer accepts.
pub struct HashingWriter<W> {
    writer: W,
    computation: Computation,
}

impl<W: Write> HashingWriter<W> {
    pub fn new(writer: W, algorithm: Algorithm) -> Self {
        HashingWriter {
            writer,
            computation: Computation::new(algorithm),
        }
    }

    /// Hands back the writer together with the digest of what it accepted.
    pub fn finish(self) -> (W, Digest) {
        (self.writer, self.computation.digest())
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Only the accepted prefix counts; a short write is retried by the caller.
        let n = self.writer.write(buf)?;
        self.computation.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Streams `reader` to the end through a `buffer_size` buffer.
pub fn hash_reader<R: Read>(algorithm: Algorithm, mut reader: R, buffer_size: usize) -> io::Result<Digest> {
    let mut computation = Computation::new(algorithm);
    let mut buf = vec![0u8; buffer_size.max(1)];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        computation.update(&buf[..n]);
    }
    Ok(computation.digest())
}

pub fn hash_file(fs: &dyn Filesystem, path: &Path, algorithm: Algorithm, buffer_size: usize) -> Result<Digest> {
    let source = fs.source(path)?;
    Ok(hash_reader(algorithm, source, buffer_size)?)
}
