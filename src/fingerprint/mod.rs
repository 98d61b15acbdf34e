//! Movie hash computation for subtitle lookups.
//!
//! The subtitle service indexes video files by a 64-bit "movie hash": the
//! file size plus the little-endian 64-bit words of the first and last
//! 64 KiB. Only those two windows are read, so hashing a multi-gigabyte
//! file costs two small reads.
//!
//! The result must match the service bit for bit. Lane order, carry
//! direction, hex case and window size are all part of the wire contract;
//! any drift gives silently empty search results rather than an error.
//!
//! # Usage
//!
//! ```ignore
//! use subaba::fingerprint;
//!
//! let hash = fingerprint::compute_fingerprint(Path::new("movie.mkv"))?;
//! println!("{hash}"); // e.g. 8e245d9679d31e12
//! ```

pub mod lanes;
pub mod window;

use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

pub use lanes::{Lanes, combine, fold_window};
pub use window::{ByteSource, WINDOW_SIZE, select_windows};

/// A 16-character lowercase hexadecimal movie hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The hash as a 16-character lowercase hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error parsing a hand-entered movie hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid movie hash {input:?}: expected 16 hexadecimal digits")]
pub struct ParseFingerprintError {
    input: String,
}

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 16 || !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseFingerprintError {
                input: s.to_string(),
            });
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }
}

/// Failure to read the bytes a fingerprint needs.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to query file length: {0}")]
    Metadata(#[source] std::io::Error),

    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Failed to read bytes {start}..{end}: {source}")]
    Range {
        start: u64,
        end: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("File truncated while reading at offset {start}: expected {expected} bytes, got {actual}")]
    Truncated {
        start: u64,
        expected: usize,
        actual: usize,
    },
}

impl ReadError {
    fn open(path: &Path, source: std::io::Error) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    fn range(range: &Range<u64>, source: std::io::Error) -> Self {
        Self::Range {
            start: range.start,
            end: range.end,
            source,
        }
    }
}

/// Compute the movie hash of any [`ByteSource`].
///
/// Both windows are read and folded independently, even when they cover
/// the same bytes (files up to 64 KiB).
pub fn fingerprint_source<S: ByteSource>(source: &mut S) -> Result<Fingerprint, ReadError> {
    let size = source.byte_len()?;
    let (head_range, tail_range) = select_windows(size);

    let head = fold_window(&source.read_range(head_range)?);
    let tail = fold_window(&source.read_range(tail_range)?);

    Ok(combine(size, &head, &tail))
}

/// Compute the movie hash of the file at `path`.
///
/// The file handle is closed before returning, on success or error.
pub fn compute_fingerprint(path: &Path) -> Result<Fingerprint, ReadError> {
    let mut file = std::fs::File::open(path).map_err(|e| ReadError::open(path, e))?;
    let metadata = file.metadata().map_err(ReadError::Metadata)?;
    ensure_regular_file(path, &metadata)?;
    let fingerprint = fingerprint_source(&mut file)?;
    debug!(target: "subaba::fingerprint", path = %path.display(), hash = %fingerprint, "Computed movie hash");
    Ok(fingerprint)
}

/// Compute the movie hash of the file at `path` without blocking the runtime.
///
/// The head and tail windows are read concurrently through separate file
/// handles and joined before combining. Dropping the returned future
/// abandons both reads; nothing is written, so there is nothing to undo.
pub async fn compute_fingerprint_async(path: &Path) -> Result<Fingerprint, ReadError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(ReadError::Metadata)?;
    ensure_regular_file(path, &metadata)?;
    let size = metadata.len();
    let (head_range, tail_range) = select_windows(size);

    let (head, tail) = tokio::try_join!(
        window::read_window_async(path, head_range),
        window::read_window_async(path, tail_range),
    )?;

    let fingerprint = combine(size, &fold_window(&head), &fold_window(&tail));
    debug!(target: "subaba::fingerprint", path = %path.display(), hash = %fingerprint, "Computed movie hash");
    Ok(fingerprint)
}

/// Pipes, devices and directories have no meaningful length to hash.
fn ensure_regular_file(path: &Path, metadata: &std::fs::Metadata) -> Result<(), ReadError> {
    if metadata.is_file() {
        Ok(())
    } else {
        Err(ReadError::NotAFile(path.to_path_buf()))
    }
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    proptest! {
        /// Output is always 16 lowercase hex digits
        #[test]
        fn hash_is_sixteen_lowercase_hex(data in prop::collection::vec(any::<u8>(), 0..2048)) {
            let hash = fingerprint_source(&mut Cursor::new(&data)).unwrap();
            prop_assert_eq!(hash.as_str().len(), 16);
            prop_assert!(hash.as_str().bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        }

        /// Lane folding with carries equals wrapping u64 word addition
        #[test]
        fn lanes_match_word_sum(data in prop::collection::vec(any::<u8>(), 0..4096)) {
            let size = data.len() as u64;
            let (head, tail) = select_windows(size);
            let mut expected = size;
            for range in [head, tail] {
                for chunk in data[range.start as usize..range.end as usize].chunks(8) {
                    let mut word = [0u8; 8];
                    word[..chunk.len()].copy_from_slice(chunk);
                    expected = expected.wrapping_add(u64::from_le_bytes(word));
                }
            }

            let hash = fingerprint_source(&mut Cursor::new(&data)).unwrap();
            prop_assert_eq!(hash.to_string(), format!("{:016x}", expected));
        }

        /// Parsing a computed hash gives the same hash back
        #[test]
        fn parse_accepts_computed_hashes(data in prop::collection::vec(any::<u8>(), 0..512)) {
            let hash = fingerprint_source(&mut Cursor::new(&data)).unwrap();
            let parsed: Fingerprint = hash.as_str().parse().unwrap();
            prop_assert_eq!(parsed, hash);
        }
    }
}
