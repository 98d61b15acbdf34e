//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `hash`: Movie hash computation for local files
//! - `search`: Subtitle search (by text, hash or file) and download
//! - `languages`: Available subtitle languages
//! - `config`: Configuration file and credential status

mod config;
mod hash;
mod languages;
mod search;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::fingerprint::Fingerprint;
use crate::subtitles::{OpenSubtitlesClient, SubtitleError, SubtitleService};

pub use config::cmd_config;
pub use hash::cmd_hash;
pub use languages::cmd_languages;
pub use search::{SearchArgs, cmd_download, cmd_search};

/// Subaba - movie-hash subtitle search
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// OpenSubtitles API key (or set OPENSUBTITLES_API_KEY env var)
    #[arg(long, env = "OPENSUBTITLES_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// User bearer token for downloads (or set USER_BEARER_TOKEN env var)
    #[arg(long, env = "USER_BEARER_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute the movie hash of video files
    Hash {
        /// Files or directories to hash
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Recurse into directories
        #[arg(short, long)]
        recursive: bool,
    },
    /// Search for subtitles by text, movie hash or local file
    Search {
        /// Free-text title query
        #[arg(short, long)]
        query: Option<String>,
        /// Movie hash (16 hex digits)
        #[arg(long, conflicts_with = "file")]
        hash: Option<Fingerprint>,
        /// Video file to hash and search for
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Language codes, comma separated or repeated (default: from config)
        #[arg(short, long = "language", value_delimiter = ',')]
        languages: Vec<String>,
        /// Download the first result after searching
        #[arg(long)]
        download: bool,
        /// Replace an existing file when downloading
        #[arg(long, requires = "download")]
        overwrite: bool,
        /// Directory to save downloads in (default: from config, else current dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// List subtitle languages
    Languages {
        /// Only show languages whose name or code contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Download a subtitle file by its file id
    Download {
        /// File id from search results
        file_id: u64,
        /// Directory to save into (default: from config, else current dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Replace an existing file with the same name
        #[arg(long)]
        overwrite: bool,
    },
    /// Show configuration status
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config =
        crate::config::load().with_overrides(cli.api_key.as_deref(), cli.token.as_deref());

    match &cli.command {
        Commands::Hash { paths, recursive } => cmd_hash(paths, *recursive),
        Commands::Search {
            query,
            hash,
            file,
            languages,
            download,
            overwrite,
            output_dir,
        } => {
            let rt = Runtime::new()?;
            let args = SearchArgs {
                query: query.clone(),
                hash: hash.clone(),
                file: file.clone(),
                languages: if languages.is_empty() {
                    config.search.languages.clone()
                } else {
                    languages.clone()
                },
                download: *download,
                overwrite: *overwrite,
                output_dir: resolve_output_dir(output_dir.as_deref(), &config),
            };
            cmd_search(&rt, &config, args)
        }
        Commands::Languages { filter } => {
            let rt = Runtime::new()?;
            cmd_languages(&rt, &config, filter.as_deref())
        }
        Commands::Download {
            file_id,
            output_dir,
            overwrite,
        } => {
            let rt = Runtime::new()?;
            let dir = resolve_output_dir(output_dir.as_deref(), &config);
            cmd_download(&rt, &config, *file_id, &dir, *overwrite)
        }
        Commands::Config { init } => cmd_config(&config, *init),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Build the subtitle service, explaining how to get an API key if missing
pub(crate) fn build_service(config: &Config) -> anyhow::Result<SubtitleService<OpenSubtitlesClient>> {
    match OpenSubtitlesClient::new(config) {
        Ok(client) => Ok(SubtitleService::new(client)),
        Err(SubtitleError::MissingCredentials(_)) => {
            print_api_key_instructions();
            anyhow::bail!("OpenSubtitles API key required")
        }
        Err(e) => Err(e.into()),
    }
}

/// Print where to get an API key
pub(crate) fn print_api_key_instructions() {
    eprintln!("Error: OpenSubtitles API key required.");
    eprintln!("Get one at: https://www.opensubtitles.com/en/consumers");
    eprintln!("Then use: --api-key YOUR_KEY, set OPENSUBTITLES_API_KEY, or add it to the config file");
}

/// Output directory: flag, then config, then current directory
pub(crate) fn resolve_output_dir(flag: Option<&Path>, config: &Config) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.search.download_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Collect video files from paths (files are kept as given, directories are walked)
pub(crate) fn collect_video_files(paths: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let max_depth = if recursive { usize::MAX } else { 1 };
            files.extend(
                walkdir::WalkDir::new(path)
                    .max_depth(max_depth)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .filter(|e| is_video_file(e.path()))
                    .map(|e| e.path().to_path_buf()),
            );
        } else {
            files.push(path.clone());
        }
    }
    files
}

/// Check if a path has a video file extension
pub(crate) fn is_video_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    matches!(
        ext.as_deref(),
        Some("mkv" | "mp4" | "avi" | "m4v" | "mov" | "wmv" | "mpg" | "mpeg" | "ts" | "webm" | "ogm" | "divx")
    )
}
