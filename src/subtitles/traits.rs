//! Trait definition for the subtitle API client.
//!
//! This trait enables dependency injection and mocking for tests.
//! Production code uses [`OpenSubtitlesClient`](super::OpenSubtitlesClient),
//! while tests substitute [`mocks::MockSubtitleApi`].

use async_trait::async_trait;

use super::domain::{DownloadedSubtitle, Language, SearchParams, SearchResults, SubtitleError};

/// Subtitle search, language listing and download.
#[async_trait]
pub trait SubtitleApi: Send + Sync {
    /// Search for subtitles.
    async fn search(&self, params: &SearchParams) -> Result<SearchResults, SubtitleError>;

    /// List available subtitle languages.
    async fn languages(&self) -> Result<Vec<Language>, SubtitleError>;

    /// Download the subtitle file with the given id.
    async fn download(&self, file_id: u64) -> Result<DownloadedSubtitle, SubtitleError>;
}

#[async_trait]
impl SubtitleApi for super::opensubtitles::OpenSubtitlesClient {
    async fn search(&self, params: &SearchParams) -> Result<SearchResults, SubtitleError> {
        self.search(params).await
    }

    async fn languages(&self) -> Result<Vec<Language>, SubtitleError> {
        self.languages().await
    }

    async fn download(&self, file_id: u64) -> Result<DownloadedSubtitle, SubtitleError> {
        self.download(file_id).await
    }
}
