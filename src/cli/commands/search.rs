//! Subtitle search and download commands.

use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::Error;
use crate::fingerprint::Fingerprint;
use crate::subtitles::{
    Feature, OpenSubtitlesClient, SearchParams, SearchResults, Subtitle, SubtitleError, SubtitleService,
};

use super::build_service;

/// Arguments for `search`, after config defaults are applied
pub struct SearchArgs {
    pub query: Option<String>,
    pub hash: Option<Fingerprint>,
    pub file: Option<PathBuf>,
    pub languages: Vec<String>,
    pub download: bool,
    pub overwrite: bool,
    pub output_dir: PathBuf,
}

/// Search for subtitles and optionally download the first hit
pub fn cmd_search(rt: &Runtime, config: &Config, args: SearchArgs) -> anyhow::Result<()> {
    let service = build_service(config)?;
    rt.block_on(run_search(&service, args))
}

async fn run_search(
    service: &SubtitleService<OpenSubtitlesClient>,
    args: SearchArgs,
) -> anyhow::Result<()> {
    let results = match &args.file {
        Some(file) => {
            println!("Hashing: {}", file.display());
            // Ctrl-C abandons the in-flight reads and the request
            tokio::select! {
                result = service.search_file(file, args.query.clone(), args.languages.clone()) => result?,
                _ = tokio::signal::ctrl_c() => anyhow::bail!("Cancelled"),
            }
        }
        None => {
            let params = SearchParams {
                query: args.query.clone(),
                moviehash: args.hash.clone(),
                languages: args.languages.clone(),
            };
            service.search(&params).await?
        }
    };

    print_results(&results);

    if args.download {
        match service
            .download_first(&results, &args.output_dir, args.overwrite)
            .await
        {
            Ok(path) => {
                println!();
                println!("✓ Saved {}", path.display());
            }
            Err(Error::Subtitles(SubtitleError::NoFiles)) => println!("Nothing to download."),
            Err(Error::AlreadyExists(path)) => {
                anyhow::bail!("{} already exists (use --overwrite to replace it)", path.display())
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Download one subtitle file into `dir`
pub fn cmd_download(
    rt: &Runtime,
    config: &Config,
    file_id: u64,
    dir: &Path,
    overwrite: bool,
) -> anyhow::Result<()> {
    let service = build_service(config)?;
    println!("Downloading file {}...", file_id);
    let path = rt.block_on(service.download_to(file_id, dir, overwrite))?;
    println!("✓ Saved {}", path.display());
    Ok(())
}

fn print_results(results: &SearchResults) {
    if results.subtitles.is_empty() {
        println!("No results found");
        return;
    }

    println!(
        "Showing {} of {} results:",
        results.subtitles.len(),
        results.total
    );
    println!();
    for subtitle in &results.subtitles {
        println!("{}", format_subtitle(subtitle));
    }
}

fn format_subtitle(subtitle: &Subtitle) -> String {
    let marker = if subtitle.hash_match { "✓" } else { " " };
    let language = subtitle.language.as_deref().unwrap_or("??");
    let mut out = format!("{} [{}] {}", marker, language, subtitle.release);

    if let Some(feature) = subtitle.feature.as_ref().and_then(format_feature) {
        out.push_str(&format!("\n    {}", feature));
    }
    match subtitle.primary_file() {
        Some(file) => {
            out.push_str(&format!("\n    File: {} (id {}", file.file_name, file.file_id));
            if let Some(cd) = file.cd_number {
                out.push_str(&format!(", CD {}", cd));
            }
            out.push_str(&format!(") - {} downloads", subtitle.download_count));
        }
        None => out.push_str("\n    (no files)"),
    }
    if let Some(uploaded) = subtitle.uploaded_at {
        out.push_str(&format!("\n    Uploaded: {}", uploaded.format("%Y-%m-%d")));
    }
    out
}

/// "Title (year) - kind - imdb tt0000000"; nothing without a title
fn format_feature(feature: &Feature) -> Option<String> {
    let mut line = feature.title.clone()?;
    if let Some(year) = feature.year {
        line.push_str(&format!(" ({})", year));
    }
    if let Some(kind) = &feature.kind {
        line.push_str(&format!(" - {}", kind));
    }
    if let Some(imdb) = feature.imdb_id {
        line.push_str(&format!(" - imdb tt{:07}", imdb));
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtitles::SubtitleFile;

    #[test]
    fn test_format_subtitle() {
        let subtitle = Subtitle {
            language: Some("en".to_string()),
            release: "Movie.2010.1080p".to_string(),
            download_count: 42,
            hash_match: true,
            files: vec![SubtitleFile {
                file_id: 7,
                file_name: "movie.srt".to_string(),
                cd_number: None,
            }],
            ..Default::default()
        };

        let text = format_subtitle(&subtitle);
        assert!(text.starts_with("✓ [en] Movie.2010.1080p"));
        assert!(text.contains("movie.srt (id 7) - 42 downloads"));
    }

    #[test]
    fn test_format_subtitle_without_files() {
        let text = format_subtitle(&Subtitle::default());
        assert!(text.contains("[??]"));
        assert!(text.contains("(no files)"));
        assert!(!text.contains("Uploaded"));
    }

    #[test]
    fn test_format_subtitle_details() {
        let subtitle = Subtitle {
            language: Some("fr".to_string()),
            release: "Matrix.1999.DVDRip".to_string(),
            download_count: 3,
            uploaded_at: "2011-04-06T12:30:00Z".parse().ok(),
            files: vec![SubtitleFile {
                file_id: 8,
                file_name: "matrix.cd2.srt".to_string(),
                cd_number: Some(2),
            }],
            feature: Some(Feature {
                title: Some("The Matrix".to_string()),
                year: Some(1999),
                kind: Some("Movie".to_string()),
                imdb_id: Some(133093),
            }),
            ..Default::default()
        };

        let text = format_subtitle(&subtitle);
        assert!(text.contains("The Matrix (1999) - Movie - imdb tt0133093"));
        assert!(text.contains("matrix.cd2.srt (id 8, CD 2) - 3 downloads"));
        assert!(text.contains("Uploaded: 2011-04-06"));
    }

    #[test]
    fn test_format_feature_needs_title() {
        let feature = Feature {
            year: Some(2010),
            ..Default::default()
        };
        assert!(format_feature(&feature).is_none());
    }
}
