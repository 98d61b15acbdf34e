//! Subtitle search and download against the OpenSubtitles REST API.
//!
//! # Architecture
//!
//! Same split as the rest of the crate's integrations:
//! - **Domain models** (`domain.rs`) - our types, stable across API changes
//! - **API DTOs** (`opensubtitles/dto.rs`) - exact wire shapes
//! - **Adapter** - the only DTO to domain conversion point
//! - **Client** - HTTP client for the API
//! - **Traits** - `SubtitleApi` seam for mocking
//! - **Service** - hash a file, search, download and save
//!
//! # Usage
//!
//! ```ignore
//! use subtitles::{OpenSubtitlesClient, SubtitleService};
//!
//! let client = OpenSubtitlesClient::new(&config)?;
//! let service = SubtitleService::new(client);
//!
//! let results = service.search_file(Path::new("movie.mkv"), None, vec!["en".into()]).await?;
//! for subtitle in &results.subtitles {
//!     println!("{} [{:?}]", subtitle.release, subtitle.language);
//! }
//! ```

pub mod domain;
pub mod opensubtitles;
pub mod save;
pub mod service;
pub mod traits;

pub use domain::{
    DownloadedSubtitle, Feature, Language, SearchParams, SearchResults, Subtitle, SubtitleError,
    SubtitleFile, filter_languages,
};
pub use opensubtitles::OpenSubtitlesClient;
pub use service::SubtitleService;
pub use traits::SubtitleApi;
