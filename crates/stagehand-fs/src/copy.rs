use std::fs::OpenOptions;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use crate::{Error, Result};

/// Chunk size used when draining a source stream into a file.
pub const COPY_BUFFER_SIZE: usize = 4096;

/// Copies `source` into `destination`, returning whether the copy completed.
///
/// The destination is truncated unless `append` is set. Failures are logged
/// and reported as `false`; bytes already written before a failure stay on
/// disk.
pub fn copy_stream_to_file<R: Read + ?Sized>(
    source: &mut R,
    destination: impl AsRef<Path>,
    append: bool,
) -> bool {
    let destination = destination.as_ref();
    match write_stream_to_file(source, destination, append, COPY_BUFFER_SIZE) {
        Ok(bytes) => {
            tracing::trace!(path = %destination.display(), bytes, "copied stream into file");
            true
        }
        Err(e) => {
            tracing::debug!(
                path = %destination.display(),
                error = %e,
                "unexpected failure while writing stream to file"
            );
            false
        }
    }
}

/// Copies `source` into `destination` through a buffer of `buffer_size` bytes.
///
/// Returns the number of bytes written. The file handle is flushed and closed
/// before returning on every path.
pub fn write_stream_to_file<R: Read + ?Sized>(
    source: &mut R,
    destination: &Path,
    append: bool,
    buffer_size: usize,
) -> Result<u64> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(destination)
        .map_err(|e| Error::Open {
            path: destination.to_path_buf(),
            source: e,
        })?;

    let mut buffer = vec![0u8; buffer_size.max(1)];
    let mut written = 0u64;

    loop {
        let n = match source.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Read { source: e }),
        };
        file.write_all(&buffer[..n]).map_err(|e| Error::Write {
            path: destination.to_path_buf(),
            source: e,
        })?;
        written += n as u64;
    }

    file.flush().map_err(|e| Error::Write {
        path: destination.to_path_buf(),
        source: e,
    })?;

    Ok(written)
}
