//! Internal domain models for subtitle search and download.
//!
//! These types are OUR types - they don't change when the API changes.
//! All API responses get converted into these types via the adapter.

use chrono::{DateTime, Utc};

use crate::fingerprint::Fingerprint;

/// What to search for. Empty fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Free-text title query
    pub query: Option<String>,
    /// Movie hash of a local video file
    pub moviehash: Option<Fingerprint>,
    /// Language codes to filter by (e.g. "en", "pt-br")
    pub languages: Vec<String>,
}

impl SearchParams {
    /// True when nothing would be sent to the API.
    pub fn is_empty(&self) -> bool {
        self.query.as_deref().is_none_or(|q| q.trim().is_empty())
            && self.moviehash.is_none()
            && self.languages.is_empty()
    }
}

/// One page of search results
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub subtitles: Vec<Subtitle>,
    /// Total matches reported by the service (may exceed `subtitles.len()`)
    pub total: u64,
}

/// A subtitle entry returned by search
#[derive(Debug, Clone, Default)]
pub struct Subtitle {
    pub language: Option<String>,
    /// Release name the subtitle was made for
    pub release: String,
    pub download_count: u64,
    pub uploaded_at: Option<DateTime<Utc>>,
    /// Whether the service matched this entry by movie hash
    pub hash_match: bool,
    pub files: Vec<SubtitleFile>,
    pub feature: Option<Feature>,
}

impl Subtitle {
    /// The file that gets downloaded for this subtitle (the first one).
    pub fn primary_file(&self) -> Option<&SubtitleFile> {
        self.files.first()
    }
}

/// A downloadable file belonging to a subtitle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleFile {
    pub file_id: u64,
    pub file_name: String,
    /// Disc number for multi-CD releases
    pub cd_number: Option<u32>,
}

/// The movie or episode a subtitle belongs to
#[derive(Debug, Clone, Default)]
pub struct Feature {
    pub title: Option<String>,
    pub year: Option<u32>,
    /// "Movie", "Episode", ...
    pub kind: Option<String>,
    /// Numeric IMDb id (without the `tt` prefix)
    pub imdb_id: Option<u64>,
}

/// A subtitle language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    /// Case-insensitive substring match on name or code.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.code.to_lowercase().contains(&needle)
    }
}

/// Filter languages by a search string; an empty needle keeps everything.
pub fn filter_languages<'a>(languages: &'a [Language], needle: &str) -> Vec<&'a Language> {
    languages.iter().filter(|l| l.matches(needle)).collect()
}

/// A downloaded subtitle, content as served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedSubtitle {
    pub file_id: u64,
    pub file_name: String,
    pub content: String,
}

/// Errors that can occur talking to the subtitle service
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubtitleError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("API request failed (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized - check the API key or bearer token")]
    Unauthorized,

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Missing credential: {0}")]
    MissingCredentials(&'static str),

    #[error("Subtitle has no downloadable files")]
    NoFiles,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn languages() -> Vec<Language> {
        vec![
            Language {
                code: "en".to_string(),
                name: "English".to_string(),
            },
            Language {
                code: "pt-br".to_string(),
                name: "Portuguese (BR)".to_string(),
            },
            Language {
                code: "pt-pt".to_string(),
                name: "Portuguese".to_string(),
            },
        ]
    }

    #[test]
    fn test_filter_by_name_case_insensitive() {
        let langs = languages();
        let found = filter_languages(&langs, "PORTU");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_filter_by_code() {
        let langs = languages();
        let found = filter_languages(&langs, "pt-br");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Portuguese (BR)");
    }

    #[test]
    fn test_filter_empty_keeps_all() {
        let langs = languages();
        assert_eq!(filter_languages(&langs, "").len(), 3);
        assert!(filter_languages(&langs, "klingon").is_empty());
    }

    #[test]
    fn test_search_params_is_empty() {
        assert!(SearchParams::default().is_empty());

        let params = SearchParams {
            query: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(params.is_empty());

        let params = SearchParams {
            moviehash: Some("8e245d9679d31e12".parse().unwrap()),
            ..Default::default()
        };
        assert!(!params.is_empty());
    }

    #[test]
    fn test_primary_file_is_first() {
        let subtitle = Subtitle {
            files: vec![
                SubtitleFile {
                    file_id: 1,
                    file_name: "cd1.srt".to_string(),
                    cd_number: Some(1),
                },
                SubtitleFile {
                    file_id: 2,
                    file_name: "cd2.srt".to_string(),
                    cd_number: Some(2),
                },
            ],
            ..Default::default()
        };
        assert_eq!(subtitle.primary_file().map(|f| f.file_id), Some(1));
        assert!(Subtitle::default().primary_file().is_none());
    }
}
