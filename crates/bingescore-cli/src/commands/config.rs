use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use bingescore_config::{Config, PathManager, PLACEHOLDER_KEY};
use color_eyre::eyre::{bail, eyre};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, config: &Config, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(config, full, output),
        ConfigCommands::Init { force } => init_config(force, output),
        ConfigCommands::Path => {
            let paths = PathManager::default();
            let path = paths.config_file();
            match output.format() {
                OutputFormat::Human => println!("{}", path.display()),
                _ => output.json(&json!({
                    "path": path.display().to_string(),
                    "exists": path.exists(),
                    "config_dir": paths.config_dir().display().to_string(),
                })),
            }
            Ok(())
        }
    }
}

fn show_config(config: &Config, full: bool, output: &Output) -> Result<()> {
    let config_file = PathManager::default().config_file();
    let key = |value: &str| if full { value.to_string() } else { mask_string(value) };

    if !output.is_human() {
        output.json(&json!({
            "path": config_file.display().to_string(),
            "tmdb": { "api_key": key(&config.tmdb.api_key), "base_url": config.tmdb.base_url },
            "omdb": { "api_key": key(&config.omdb.api_key), "base_url": config.omdb.base_url },
            "trakt": { "client_id": key(&config.trakt.client_id), "base_url": config.trakt.base_url },
            "server": { "host": config.server.host, "port": config.server.port },
            "http": {
                "request_timeout_secs": config.http.request_timeout_secs,
                "aggregate_timeout_secs": config.http.aggregate_timeout_secs,
            },
            "logging": { "file": config.logging.file },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    println!("\n{}", "Configuration".bright_cyan().bold());
    if !config_file.exists() {
        output.warn(format!(
            "No config file at {} (showing defaults and environment). Run 'bingescore config init' to create one.",
            config_file.display()
        ));
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config file"), Cell::new(config_file.display())]);

    let provider_rows = [
        ("TMDB", "API key", key(&config.tmdb.api_key), config.tmdb.base_url.as_deref()),
        ("OMDb", "API key", key(&config.omdb.api_key), config.omdb.base_url.as_deref()),
        ("Trakt", "client ID", key(&config.trakt.client_id), config.trakt.base_url.as_deref()),
    ];
    for (provider, label, value, base_url) in provider_rows {
        let cell = if value == "<not set>" {
            Cell::new(value).fg(Color::Red)
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(format!("{} {}", provider, label)), cell]);
        if let Some(url) = base_url {
            table.add_row(vec![Cell::new(format!("{} base URL", provider)), Cell::new(url)]);
        }
    }

    table.add_row(vec![
        Cell::new("Listen address"),
        Cell::new(format!("{}:{}", config.server.host, config.server.port)),
    ]);
    table.add_row(vec![
        Cell::new("Request timeout"),
        Cell::new(format!("{}s", config.http.request_timeout_secs)),
    ]);
    table.add_row(vec![
        Cell::new("Aggregate timeout"),
        Cell::new(format!("{}s", config.http.aggregate_timeout_secs)),
    ]);
    table.add_row(vec![
        Cell::new("Log file"),
        Cell::new(
            config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);

    match config.validate() {
        Ok(()) => output.success("Configuration is complete"),
        Err(e) => output.warn(format!("Configuration incomplete: {}", e)),
    }
    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let config_file = PathManager::default().config_file();
    if config_file.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            config_file.display()
        );
    }

    Config::template()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write {}: {:#}", config_file.display(), e))?;

    output.success(format!("Wrote {}", config_file.display()));
    output.info(format!(
        "Replace each {} with your TMDB, OMDb and Trakt credentials.",
        PLACEHOLDER_KEY
    ));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() || s == PLACEHOLDER_KEY {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
