//! OpenSubtitles HTTP client
//!
//! Handles communication with the OpenSubtitles REST API.
//! See: https://opensubtitles.stoplight.io/docs/opensubtitles-api
//!
//! ## API Notes
//!
//! ### Headers
//! Every request carries `Api-Key` and a registered `User-Agent`; requests
//! without a recognised user agent are rejected. Downloads additionally
//! need `Authorization: Bearer <token>`.
//!
//! ### Query String
//! The `languages` parameter is a comma-separated list. We build the query
//! string manually so the separator stays a literal `,` instead of `%2C`,
//! and so empty parameters are left out entirely.
//!
//! ### Downloads
//! `POST /download` does not return the subtitle itself but a short-lived
//! link, which is then fetched as plain text.

use reqwest::StatusCode;

use super::{adapter, dto};
use crate::config::Config;
use crate::subtitles::domain::{
    DownloadedSubtitle, Language, SearchParams, SearchResults, SubtitleError,
};

/// OpenSubtitles API client
pub struct OpenSubtitlesClient {
    api_key: String,
    bearer_token: Option<String>,
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenSubtitlesClient {
    /// Create a new client from configuration
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses (reduces bandwidth)
    /// - Send the configured User-Agent header
    pub fn new(config: &Config) -> Result<Self, SubtitleError> {
        let api_key = config
            .credentials
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(SubtitleError::MissingCredentials("api_key"))?;

        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(config.api.user_agent.clone())
            .build()
            .map_err(|e| SubtitleError::Network(e.to_string()))?;

        Ok(Self {
            api_key,
            bearer_token: config.credentials.bearer_token.clone(),
            http_client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search for subtitles
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResults, SubtitleError> {
        let url = format!("{}/subtitles{}", self.base_url, build_query(params));
        tracing::debug!(target: "subaba::subtitles::client", %url, "Searching subtitles");

        let response = self
            .http_client
            .get(&url)
            .header("Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| SubtitleError::Network(e.to_string()))?;

        let body: dto::SearchResponse = parse_json(response).await?;
        Ok(adapter::to_search_results(body))
    }

    /// List the languages subtitles are available in
    pub async fn languages(&self) -> Result<Vec<Language>, SubtitleError> {
        let url = format!("{}/infos/languages", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .header("Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| SubtitleError::Network(e.to_string()))?;

        let body: dto::LanguagesResponse = parse_json(response).await?;
        Ok(adapter::to_languages(body))
    }

    /// Request a download link for `file_id` and fetch the subtitle text
    pub async fn download(&self, file_id: u64) -> Result<DownloadedSubtitle, SubtitleError> {
        let token = self
            .bearer_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(SubtitleError::MissingCredentials("bearer_token"))?;

        let url = format!("{}/download", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header("Accept", "application/json")
            .bearer_auth(token)
            .json(&dto::DownloadRequest { file_id })
            .send()
            .await
            .map_err(|e| SubtitleError::Network(e.to_string()))?;

        let ticket: dto::DownloadResponse = parse_json(response).await?;
        tracing::debug!(
            target: "subaba::subtitles::client",
            file_id,
            remaining = ?ticket.remaining,
            "Got download link"
        );

        let content = self
            .http_client
            .get(&ticket.link)
            .send()
            .await
            .map_err(|e| SubtitleError::Network(e.to_string()))?;
        let content = check_status(content)
            .await?
            .text()
            .await
            .map_err(|e| SubtitleError::Network(e.to_string()))?;

        adapter::to_downloaded(file_id, ticket, content)
    }
}

/// Build `?query=..&moviehash=..&languages=a,b`, skipping empty parameters
pub(crate) fn build_query(params: &SearchParams) -> String {
    let mut pairs: Vec<String> = Vec::new();

    if let Some(query) = params.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        pairs.push(format!("query={}", urlencoding::encode(query)));
    }
    if let Some(hash) = &params.moviehash {
        pairs.push(format!("moviehash={}", hash));
    }
    if !params.languages.is_empty() {
        let languages: Vec<String> = params
            .languages
            .iter()
            .map(|l| urlencoding::encode(l.trim()).into_owned())
            .collect();
        pairs.push(format!("languages={}", languages.join(",")));
    }

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

/// Map non-success statuses to domain errors
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SubtitleError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SubtitleError::Unauthorized),
        StatusCode::TOO_MANY_REQUESTS => Err(SubtitleError::RateLimited),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(SubtitleError::Api {
                status: status.as_u16(),
                message: adapter::error_message(&body),
            })
        }
    }
}

async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, SubtitleError> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| SubtitleError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: &str) -> Config {
        let mut config = Config::default();
        config.credentials.api_key = Some(key.to_string());
        config
    }

    #[test]
    fn test_client_creation() {
        let client = OpenSubtitlesClient::new(&config_with_key("test-key")).unwrap();
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.base_url, "https://api.opensubtitles.com/api/v1");
        assert!(client.bearer_token.is_none());
    }

    #[test]
    fn test_client_requires_api_key() {
        let err = OpenSubtitlesClient::new(&Config::default()).err().unwrap();
        assert!(matches!(err, SubtitleError::MissingCredentials("api_key")));
    }

    #[test]
    fn test_client_custom_url_trailing_slash() {
        let mut config = config_with_key("key");
        config.api.base_url = "http://localhost:8080/api/v1/".to_string();
        let client = OpenSubtitlesClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/api/v1");
    }

    #[tokio::test]
    async fn test_download_requires_bearer_token() {
        let client = OpenSubtitlesClient::new(&config_with_key("key")).unwrap();
        let err = client.download(1).await.unwrap_err();
        assert!(matches!(err, SubtitleError::MissingCredentials("bearer_token")));
    }

    #[test]
    fn test_build_query_empty() {
        assert_eq!(build_query(&SearchParams::default()), "");
    }

    #[test]
    fn test_build_query_all_fields() {
        let params = SearchParams {
            query: Some("the matrix".to_string()),
            moviehash: Some("8e245d9679d31e12".parse().unwrap()),
            languages: vec!["en".to_string(), "pt-br".to_string()],
        };
        assert_eq!(
            build_query(&params),
            "?query=the%20matrix&moviehash=8e245d9679d31e12&languages=en,pt-br"
        );
    }

    #[test]
    fn test_build_query_skips_blank_query() {
        let params = SearchParams {
            query: Some("  ".to_string()),
            moviehash: None,
            languages: vec!["fr".to_string()],
        };
        assert_eq!(build_query(&params), "?languages=fr");
    }
}
