//! OpenSubtitles REST API Data Transfer Objects
//!
//! These types match what the API returns.
//! DO NOT use these types outside the opensubtitles module - convert to domain types.
//!
//! API Reference: https://opensubtitles.stoplight.io/docs/opensubtitles-api
//!
//! Example search response:
//! ```json
//! {
//!   "total_count": 1,
//!   "data": [{
//!     "id": "9000",
//!     "type": "subtitle",
//!     "attributes": {
//!       "subtitle_id": "9000",
//!       "language": "en",
//!       "download_count": 697844,
//!       "release": "Season 1 (Whole) DVDrip.XviD-SAiNTS",
//!       "upload_date": "2011-04-06T00:00:00Z",
//!       "moviehash_match": true,
//!       "files": [{"file_id": 1923552, "cd_number": 1, "file_name": "got.s01e01.srt"}],
//!       "feature_details": {"feature_id": 63, "feature_type": "Episode", "year": 2011}
//!     }
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// `GET /subtitles` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<SubtitleEntry>,
    #[serde(default, alias = "total")]
    pub total_count: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubtitleEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub attributes: SubtitleAttributes,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubtitleAttributes {
    pub subtitle_id: String,
    pub language: Option<String>,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub release: Option<String>,
    pub upload_date: Option<String>,
    #[serde(default)]
    pub moviehash_match: Option<bool>,
    #[serde(default)]
    pub files: Vec<SubtitleFileEntry>,
    pub feature_details: Option<FeatureDetails>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubtitleFileEntry {
    pub file_id: u64,
    #[serde(default)]
    pub file_name: Option<String>,
    pub cd_number: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureDetails {
    pub feature_id: Option<u64>,
    pub feature_type: Option<String>,
    pub year: Option<u32>,
    pub title: Option<String>,
    pub movie_name: Option<String>,
    pub imdb_id: Option<u64>,
    pub tmdb_id: Option<u64>,
}

/// `GET /infos/languages` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LanguagesResponse {
    #[serde(default)]
    pub data: Vec<LanguageEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LanguageEntry {
    pub language_code: String,
    pub language_name: String,
}

/// `POST /download` request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadRequest {
    pub file_id: u64,
}

/// `POST /download` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadResponse {
    pub link: String,
    pub file_name: Option<String>,
    pub requests: Option<u32>,
    pub remaining: Option<i64>,
    pub message: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_empty_search() {
        let json = r#"{"total_pages": 0, "total_count": 0, "per_page": 60, "page": 1, "data": []}"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse empty search");
        assert_eq!(response.total_count, 0);
        assert!(response.data.is_empty());
    }

    #[test]
    fn test_parse_search_with_results() {
        let json = r#"{
            "total_count": 1,
            "data": [{
                "id": "9000",
                "type": "subtitle",
                "attributes": {
                    "subtitle_id": "9000",
                    "language": "en",
                    "download_count": 697844,
                    "release": "Season 1 (Whole) DVDrip.XviD-SAiNTS",
                    "upload_date": "2011-04-06T00:00:00Z",
                    "moviehash_match": true,
                    "files": [{"file_id": 1923552, "cd_number": 1, "file_name": "got.s01e01.srt"}],
                    "feature_details": {
                        "feature_id": 63,
                        "feature_type": "Episode",
                        "year": 2011,
                        "title": "Winter Is Coming",
                        "movie_name": "Game of Thrones - S01E01  Winter Is Coming",
                        "imdb_id": 1480055,
                        "tmdb_id": 63056
                    }
                }
            }]
        }"#;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse search with results");

        assert_eq!(response.total_count, 1);
        let attrs = &response.data[0].attributes;
        assert_eq!(attrs.subtitle_id, "9000");
        assert_eq!(attrs.language.as_deref(), Some("en"));
        assert_eq!(attrs.moviehash_match, Some(true));
        assert_eq!(attrs.files[0].file_id, 1923552);
        let feature = attrs.feature_details.as_ref().unwrap();
        assert_eq!(feature.imdb_id, Some(1480055));
        assert_eq!(feature.feature_type.as_deref(), Some("Episode"));
    }

    #[test]
    fn test_parse_sparse_entry() {
        let json = r#"{
            "data": [{
                "id": "1",
                "attributes": {"subtitle_id": "1", "language": null, "feature_details": null}
            }]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse sparse entry");
        let attrs = &response.data[0].attributes;
        assert!(attrs.language.is_none());
        assert!(attrs.files.is_empty());
        assert!(attrs.release.is_none());
        assert_eq!(attrs.download_count, 0);
    }

    #[test]
    fn test_parse_legacy_total_field() {
        let json = r#"{"total": 12, "data": []}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_count, 12);
    }

    #[test]
    fn test_parse_languages() {
        let json = r#"{"data": [
            {"language_code": "en", "language_name": "English"},
            {"language_code": "pt-BR", "language_name": "Portuguese (Brazil)"}
        ]}"#;

        let response: LanguagesResponse = serde_json::from_str(json).expect("Should parse languages");
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[1].language_code, "pt-BR");
    }

    #[test]
    fn test_parse_download_response() {
        let json = r#"{
            "link": "https://www.opensubtitles.com/download/abc/subfile/got.s01e01.srt",
            "file_name": "got.s01e01.srt",
            "requests": 3,
            "remaining": 97,
            "message": "Your quota will be renewed in 07 hours and 30 minutes",
            "reset_time": "07 hours and 30 minutes",
            "reset_time_utc": "2022-04-08T13:03:16.000Z"
        }"#;

        let response: DownloadResponse = serde_json::from_str(json).expect("Should parse download");
        assert!(response.link.ends_with("got.s01e01.srt"));
        assert_eq!(response.remaining, Some(97));
    }

    #[test]
    fn test_serialize_download_request() {
        let body = serde_json::to_string(&DownloadRequest { file_id: 1923552 }).unwrap();
        assert_eq!(body, r#"{"file_id":1923552}"#);
    }

    #[test]
    fn test_parse_error_body() {
        let json = r#"{"message": "You cannot consume this service", "status": 403}"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message.as_deref(), Some("You cannot consume this service"));
        assert!(response.errors.is_empty());
    }
}
