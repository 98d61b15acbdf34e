//! Subtitle language listing command.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::subtitles::Language;

use super::build_service;

/// List subtitle languages, optionally filtered
pub fn cmd_languages(rt: &Runtime, config: &Config, filter: Option<&str>) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let languages = rt.block_on(service.languages(filter))?;

    if languages.is_empty() {
        println!("No languages found");
        return Ok(());
    }

    for language in &languages {
        println!("{}", format_language(language));
    }
    println!();
    println!("{} languages", languages.len());
    Ok(())
}

fn format_language(language: &Language) -> String {
    format!("{:<8} {}", language.code, language.name)
}
