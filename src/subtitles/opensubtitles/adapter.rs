//! Adapter layer: Convert OpenSubtitles DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use chrono::{DateTime, Utc};

use super::dto;
use crate::subtitles::domain::{
    DownloadedSubtitle, Feature, Language, SearchResults, Subtitle, SubtitleError, SubtitleFile,
};

/// Convert a search response to domain results
pub fn to_search_results(response: dto::SearchResponse) -> SearchResults {
    let subtitles: Vec<Subtitle> = response.data.into_iter().map(to_subtitle).collect();
    // Older responses omit the count; never report fewer than we hold
    let total = response.total_count.max(subtitles.len() as u64);
    SearchResults { subtitles, total }
}

fn to_subtitle(entry: dto::SubtitleEntry) -> Subtitle {
    let attrs = entry.attributes;
    Subtitle {
        language: attrs.language,
        release: attrs.release.unwrap_or_default(),
        download_count: attrs.download_count,
        uploaded_at: attrs.upload_date.as_deref().and_then(parse_timestamp),
        hash_match: attrs.moviehash_match.unwrap_or(false),
        files: attrs
            .files
            .into_iter()
            .map(|f| SubtitleFile {
                file_name: f
                    .file_name
                    .unwrap_or_else(|| format!("subtitle-{}.srt", f.file_id)),
                file_id: f.file_id,
                cd_number: f.cd_number,
            })
            .collect(),
        feature: attrs.feature_details.map(to_feature),
    }
}

fn to_feature(details: dto::FeatureDetails) -> Feature {
    Feature {
        // Episodes carry the show + episode in movie_name; prefer it
        title: details.movie_name.or(details.title),
        year: details.year.filter(|&y| y > 0),
        kind: details.feature_type,
        imdb_id: details.imdb_id,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!(target: "subaba::subtitles::adapter", raw, error = %e, "Unparseable upload_date");
            None
        }
    }
}

/// Convert a languages response to domain languages
pub fn to_languages(response: dto::LanguagesResponse) -> Vec<Language> {
    response
        .data
        .into_iter()
        .map(|l| Language {
            code: l.language_code,
            name: l.language_name,
        })
        .collect()
}

/// Build a downloaded subtitle from the download ticket and fetched content
pub fn to_downloaded(
    file_id: u64,
    ticket: dto::DownloadResponse,
    content: String,
) -> Result<DownloadedSubtitle, SubtitleError> {
    if ticket.link.is_empty() {
        return Err(SubtitleError::Parse(
            "download response has no link".to_string(),
        ));
    }
    Ok(DownloadedSubtitle {
        file_id,
        file_name: ticket
            .file_name
            .unwrap_or_else(|| format!("subtitle-{}.srt", file_id)),
        content,
    })
}

/// Pick a human-readable message out of an error body
pub fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<dto::ErrorResponse>(body) {
        if let Some(message) = parsed.message.filter(|m| !m.is_empty()) {
            return message;
        }
        if !parsed.errors.is_empty() {
            return parsed.errors.join("; ");
        }
    }
    body.chars().take(200).collect()
}
