use crate::output::Output;
use bingescore_config::Config;
use comfy_table::{Attribute, Cell, Table};
use color_eyre::eyre::bail;
use color_eyre::Result;

use super::build_aggregator;

pub async fn run_search(config: &Config, query: &str, output: &Output) -> Result<()> {
    let query = query.trim();
    if query.chars().count() < 2 {
        bail!("Search query must be at least 2 characters");
    }

    let aggregator = build_aggregator(config)?;
    let results = aggregator.search(query).await?;

    if !output.is_human() {
        output.json(&serde_json::to_value(&results)?);
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }
    if results.is_empty() {
        output.warn(format!("No results for \"{}\"", query));
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("TMDB ID").add_attribute(Attribute::Bold),
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
    ]);
    for result in &results {
        table.add_row(vec![
            Cell::new(result.tmdb_id),
            Cell::new(result.media_type),
            Cell::new(&result.title),
            Cell::new(result.year.map(|y| y.to_string()).unwrap_or_default()),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);

    output.info(format!("{} results", results.len()));
    Ok(())
}
