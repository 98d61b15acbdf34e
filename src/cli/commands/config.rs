//! Configuration status command.

use crate::config::{self, Config};

/// Show where config lives and which credentials are set
pub fn cmd_config(config: &Config, init: bool) -> anyhow::Result<()> {
    match config::config_path() {
        Some(path) if path.exists() => println!("Config file: {}", path.display()),
        Some(_) if init => {
            let written = config::save(&Config::default())?;
            println!("✓ Wrote default config to {}", written.display());
        }
        Some(path) => {
            println!("Config file: {} (not created)", path.display());
            println!("  Run `subaba config --init` to create it.");
        }
        None => println!("Config file: could not determine config directory"),
    }

    println!();
    println!("API:");
    println!("  Base URL:   {}", config.api.base_url);
    println!("  User-Agent: {}", config.api.user_agent);

    println!();
    println!("Credentials:");
    println!("{}", credential_line("API key", config.credentials.api_key.as_deref()));
    println!(
        "{}",
        credential_line("Bearer token", config.credentials.bearer_token.as_deref())
    );
    if config.credentials.api_key.is_none() {
        super::print_api_key_instructions();
    }

    if !config.search.languages.is_empty() {
        println!();
        println!("Default languages: {}", config.search.languages.join(", "));
    }
    Ok(())
}

fn credential_line(label: &str, value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()) {
        Some(_) => format!("✓ {}: set", label),
        None => format!("✗ {}: not set", label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_line_never_prints_value() {
        let line = credential_line("API key", Some("secret-key"));
        assert_eq!(line, "✓ API key: set");
        assert!(!line.contains("secret"));

        assert_eq!(credential_line("Bearer token", None), "✗ Bearer token: not set");
        assert_eq!(credential_line("Bearer token", Some("")), "✗ Bearer token: not set");
    }
}
