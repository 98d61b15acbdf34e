//! Movie hash computation command.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::fingerprint::{self, Fingerprint, ReadError};

use super::collect_video_files;

/// Print the movie hash of every file (directories are scanned for videos)
pub fn cmd_hash(paths: &[PathBuf], recursive: bool) -> anyhow::Result<()> {
    let files = collect_video_files(paths, recursive);
    if files.is_empty() {
        println!("No video files found.");
        return Ok(());
    }

    let results = hash_files(&files);

    let mut failed = 0;
    for (path, result) in &results {
        match result {
            Ok(hash) => println!("{}  {}", hash, path.display()),
            Err(e) => {
                failed += 1;
                eprintln!("✗ {}: {}", path.display(), e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} files could not be hashed", failed, results.len());
    }
    Ok(())
}

/// Hash files in parallel, keeping input order
fn hash_files(files: &[PathBuf]) -> Vec<(&Path, Result<Fingerprint, ReadError>)> {
    files
        .par_iter()
        .map(|path| (path.as_path(), fingerprint::compute_fingerprint(path)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_hash_files_keeps_order_and_errors() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.mkv");
        let b = dir.path().join("missing.mkv");
        let c = dir.path().join("c.mkv");
        std::fs::write(&a, [0x41u8]).unwrap();
        std::fs::write(&c, b"").unwrap();

        let files = vec![a.clone(), b.clone(), c.clone()];
        let results = hash_files(&files);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, a.as_path());
        assert_eq!(results[0].1.as_ref().unwrap().as_str(), "0000000000000083");
        assert!(results[1].1.is_err());
        assert_eq!(results[2].1.as_ref().unwrap().as_str(), "0000000000000000");
    }

    #[test]
    fn test_cmd_hash_reports_failures() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone.mkv");

        let err = cmd_hash(&[missing], false).unwrap_err();
        assert!(err.to_string().contains("1 of 1"));
    }
}
