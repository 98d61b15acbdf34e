//! Head/tail window selection and raw byte reads.

use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncSeekExt};

use super::ReadError;

/// Size of the head and tail windows (64 KiB).
pub const WINDOW_SIZE: u64 = 64 * 1024;

/// Byte ranges of the head and tail windows for a file of `size` bytes.
///
/// For files up to [`WINDOW_SIZE`] the two ranges overlap or coincide.
/// Callers still read and fold both.
pub fn select_windows(size: u64) -> (Range<u64>, Range<u64>) {
    let head = 0..size.min(WINDOW_SIZE);
    let tail = size.saturating_sub(WINDOW_SIZE)..size;
    (head, tail)
}

/// A length-queryable source of raw bytes.
pub trait ByteSource {
    /// Total length of the source in bytes.
    fn byte_len(&mut self) -> Result<u64, ReadError>;

    /// Read exactly the bytes in `range`. Never decodes the data.
    fn read_range(&mut self, range: Range<u64>) -> Result<Vec<u8>, ReadError>;
}

impl<T: Read + Seek> ByteSource for T {
    fn byte_len(&mut self) -> Result<u64, ReadError> {
        let len = self.seek(SeekFrom::End(0)).map_err(ReadError::Metadata)?;
        Ok(len)
    }

    fn read_range(&mut self, range: Range<u64>) -> Result<Vec<u8>, ReadError> {
        let wanted = range_len(&range);
        self.seek(SeekFrom::Start(range.start))
            .map_err(|source| ReadError::range(&range, source))?;

        let mut buffer = Vec::with_capacity(wanted);
        self.by_ref()
            .take(wanted as u64)
            .read_to_end(&mut buffer)
            .map_err(|source| ReadError::range(&range, source))?;

        check_complete(&range, buffer)
    }
}

/// Read one window through its own tokio file handle.
///
/// The handle is dropped (and closed) on every return path.
pub async fn read_window_async(path: &Path, range: Range<u64>) -> Result<Vec<u8>, ReadError> {
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|source| ReadError::open(path, source))?;

    let wanted = range_len(&range);
    file.seek(SeekFrom::Start(range.start))
        .await
        .map_err(|source| ReadError::range(&range, source))?;

    let mut buffer = Vec::with_capacity(wanted);
    file.take(wanted as u64)
        .read_to_end(&mut buffer)
        .await
        .map_err(|source| ReadError::range(&range, source))?;

    check_complete(&range, buffer)
}

fn range_len(range: &Range<u64>) -> usize {
    // Windows are capped at WINDOW_SIZE
    range.end.saturating_sub(range.start) as usize
}

/// A short read means the file shrank after its size was taken.
fn check_complete(range: &Range<u64>, buffer: Vec<u8>) -> Result<Vec<u8>, ReadError> {
    let wanted = range_len(range);
    if buffer.len() < wanted {
        return Err(ReadError::Truncated {
            start: range.start,
            expected: wanted,
            actual: buffer.len(),
        });
    }
    Ok(buffer)
}
