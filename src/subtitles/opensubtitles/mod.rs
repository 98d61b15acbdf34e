//! OpenSubtitles REST API integration
//!
//! Subtitle search by title, movie hash and language, plus downloads.
//! API docs: https://opensubtitles.stoplight.io/docs/opensubtitles-api

mod adapter;
mod client;
pub mod dto;

pub use client::OpenSubtitlesClient;
