//! Subtitle service - orchestrates hashing, search and download
//!
//! This is the high-level API used by the CLI:
//! 1. Compute the movie hash of a local file (optional)
//! 2. Search the subtitle service by hash, text and languages
//! 3. Download a chosen subtitle file and save it to disk

use std::path::{Path, PathBuf};

use crate::error::{Result, ResultExt};
use crate::fingerprint;
use crate::subtitles::domain::{
    Language, SearchParams, SearchResults, Subtitle, SubtitleError, filter_languages,
};
use crate::subtitles::save;
use crate::subtitles::traits::SubtitleApi;

/// Service for finding and fetching subtitles
pub struct SubtitleService<A: SubtitleApi> {
    api: A,
}

impl<A: SubtitleApi> SubtitleService<A> {
    /// Create a new service on top of an API client
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Search with explicit parameters
    pub async fn search(&self, params: &SearchParams) -> std::result::Result<SearchResults, SubtitleError> {
        if params.is_empty() {
            tracing::warn!(
                target: "subaba::subtitles::service",
                "Searching without a query, movie hash or language; results are unfiltered"
            );
        }
        tracing::info!(
            target: "subaba::subtitles::service",
            query = ?params.query,
            moviehash = ?params.moviehash.as_ref().map(|h| h.as_str()),
            languages = ?params.languages,
            "Searching subtitles"
        );
        let results = self.api.search(params).await?;
        tracing::info!(
            target: "subaba::subtitles::service",
            returned = results.subtitles.len(),
            total = results.total,
            "Search complete"
        );
        Ok(results)
    }

    /// Hash a local video file and search by that hash
    ///
    /// A read failure aborts before any request is sent.
    pub async fn search_file(
        &self,
        path: &Path,
        query: Option<String>,
        languages: Vec<String>,
    ) -> Result<SearchResults> {
        let moviehash = fingerprint::compute_fingerprint_async(path)
            .await
            .with_context(format!("Failed to hash {:?}", path))?;

        let params = SearchParams {
            query,
            moviehash: Some(moviehash),
            languages,
        };
        Ok(self.search(&params).await?)
    }

    /// List languages, optionally filtered by name or code
    pub async fn languages(
        &self,
        filter: Option<&str>,
    ) -> std::result::Result<Vec<Language>, SubtitleError> {
        let languages = self.api.languages().await?;
        Ok(match filter {
            Some(needle) => filter_languages(&languages, needle)
                .into_iter()
                .cloned()
                .collect(),
            None => languages,
        })
    }

    /// Download a subtitle file and save it into `dir`
    pub async fn download_to(&self, file_id: u64, dir: &Path, overwrite: bool) -> Result<PathBuf> {
        tracing::info!(target: "subaba::subtitles::service", file_id, "Downloading subtitle");
        let subtitle = self.api.download(file_id).await?;
        save::write_subtitle(dir, &subtitle, overwrite)
    }

    /// Download the first file of the first result that has one
    pub async fn download_first(
        &self,
        results: &SearchResults,
        dir: &Path,
        overwrite: bool,
    ) -> Result<PathBuf> {
        let file = results
            .subtitles
            .iter()
            .find_map(Subtitle::primary_file)
            .ok_or(SubtitleError::NoFiles)?;
        self.download_to(file.file_id, dir, overwrite).await
    }
}
