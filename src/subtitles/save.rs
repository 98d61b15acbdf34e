//! Saving downloaded subtitles to disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result, ResultExt};
use crate::subtitles::domain::DownloadedSubtitle;

/// Replace characters that are invalid in file names on any platform.
///
/// Falls back to `subtitle-<file_id>.srt` when nothing usable remains.
pub fn sanitize_file_name(name: &str, file_id: u64) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect();

    if cleaned.trim_matches(|c| c == '.' || c == '_').is_empty() {
        format!("subtitle-{}.srt", file_id)
    } else {
        cleaned
    }
}

/// Write a downloaded subtitle into `dir`, returning the final path.
///
/// Existing files are only replaced when `overwrite` is set. The content
/// goes to a uniquely named temporary file in `dir` first and is then
/// moved into place, so no other file in `dir` is ever touched.
pub fn write_subtitle(dir: &Path, subtitle: &DownloadedSubtitle, overwrite: bool) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(format!("Failed to create directory {:?}", dir))?;

    let path = dir.join(sanitize_file_name(&subtitle.file_name, subtitle.file_id));
    if path.exists() && !overwrite {
        return Err(Error::already_exists(path));
    }

    let mut temp = tempfile::Builder::new()
        .prefix(".subaba-")
        .suffix(".part")
        .tempfile_in(dir)
        .with_context(format!("Failed to create temporary file in {:?}", dir))?;
    temp.write_all(subtitle.content.as_bytes())
        .with_context(format!("Failed to write {:?}", temp.path()))?;

    // The temporary file is removed when persisting fails
    let persisted = if overwrite {
        temp.persist(&path)
    } else {
        temp.persist_noclobber(&path)
    };
    match persisted {
        Ok(_) => {}
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
            return Err(Error::already_exists(path));
        }
        Err(e) => {
            return Err(Error::Io(e.error).context(format!("Failed to move subtitle to {:?}", path)));
        }
    }

    tracing::info!(target: "subaba::subtitles::save", path = %path.display(), bytes = subtitle.content.len(), "Saved subtitle");
    Ok(path)
}
