use crate::output::Output;
use bingescore_config::Config;
use bingescore_core::season_chart_points;
use bingescore_models::{AggregatedRatings, EpisodeRatingEntry, MediaType};
use comfy_table::{Attribute, Cell, Color, Table};
use color_eyre::eyre::bail;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use super::{build_aggregator, format_score};

pub async fn run_aggregate(
    config: &Config,
    tmdb_id: u64,
    media_type: MediaType,
    season: Option<u32>,
    output: &Output,
) -> Result<()> {
    if season.is_some() && !media_type.is_series() {
        bail!("--season only applies to tv");
    }

    let aggregator = build_aggregator(config)?;
    let aggregated = aggregator.aggregate(tmdb_id, media_type).await?;

    let season_episodes = match season {
        Some(number) => {
            let episodes = aggregated
                .episodes_by_season
                .as_ref()
                .and_then(|seasons| seasons.get(&number));
            match episodes {
                Some(episodes) => Some((number, episodes.as_slice())),
                None => bail!("No episode ratings for season {} of {}", number, aggregated.title),
            }
        }
        None => None,
    };

    if !output.is_human() {
        let value = match season_episodes {
            Some((number, episodes)) => json!({
                "ids": aggregated.ids,
                "title": aggregated.title,
                "season": number,
                "episodes": season_chart_points(episodes),
            }),
            None => serde_json::to_value(&aggregated)?,
        };
        output.json(&value);
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    print_header(&aggregated);
    println!("{}", overall_table(&aggregated));

    match season_episodes {
        Some((number, episodes)) => {
            println!("\n{}", format!("Season {}", number).bright_cyan().bold());
            println!("{}", episode_table(episodes));
        }
        None => {
            if aggregated.episodes_by_season.is_some() {
                println!("\n{}", "Seasons".bright_cyan().bold());
                println!("{}", season_summary_table(&aggregated));
            }
        }
    }

    Ok(())
}

fn print_header(aggregated: &AggregatedRatings) {
    let year = aggregated.year.map(|y| format!(" ({})", y)).unwrap_or_default();
    println!("\n{}{}", aggregated.title.bright_white().bold(), year);

    let mut ids = vec![format!("tmdb:{}", aggregated.ids.tmdb_id)];
    if let Some(imdb_id) = &aggregated.ids.imdb_id {
        ids.push(format!("imdb:{}", imdb_id));
    }
    if let Some(trakt_id) = &aggregated.ids.trakt_id {
        ids.push(format!("trakt:{}", trakt_id));
    }
    println!("{}", ids.join("  ").bright_black());
    if let Some(poster_url) = &aggregated.poster_url {
        println!("{}", poster_url.bright_black());
    }
    println!();
}

fn styled(table: &mut Table) {
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
}

fn overall_table(aggregated: &AggregatedRatings) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Source").add_attribute(Attribute::Bold),
        Cell::new("Score").add_attribute(Attribute::Bold),
        Cell::new("Votes").add_attribute(Attribute::Bold),
    ]);
    for (source, rating) in aggregated.overall.iter() {
        let score = rating.and_then(|r| r.score);
        let score_cell = match score {
            Some(_) => Cell::new(format_score(score)).fg(Color::Green),
            None => Cell::new("unavailable").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(source.as_str()),
            score_cell,
            Cell::new(
                rating
                    .and_then(|r| r.votes)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    styled(&mut table);
    table
}

fn episode_table(episodes: &[EpisodeRatingEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("TMDB").fg(Color::Blue).add_attribute(Attribute::Bold),
        Cell::new("Trakt").fg(Color::Red).add_attribute(Attribute::Bold),
    ]);
    for point in season_chart_points(episodes) {
        table.add_row(vec![
            Cell::new(point.episode),
            Cell::new(point.title),
            Cell::new(format_score(point.tmdb)),
            Cell::new(format_score(point.trakt)),
        ]);
    }
    styled(&mut table);
    table
}

/// Mean of the scores that are present
fn average(episodes: &[EpisodeRatingEntry], score: impl Fn(&EpisodeRatingEntry) -> Option<f64>) -> Option<f64> {
    let scores: Vec<f64> = episodes.iter().filter_map(score).collect();
    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

fn season_summary_table(aggregated: &AggregatedRatings) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Season").add_attribute(Attribute::Bold),
        Cell::new("Episodes").add_attribute(Attribute::Bold),
        Cell::new("Avg TMDB").fg(Color::Blue).add_attribute(Attribute::Bold),
        Cell::new("Avg Trakt").fg(Color::Red).add_attribute(Attribute::Bold),
    ]);
    for (season, episodes) in aggregated.episodes_by_season.iter().flatten() {
        table.add_row(vec![
            Cell::new(season),
            Cell::new(episodes.len()),
            Cell::new(format_score(average(episodes, |e| e.tmdb_score))),
            Cell::new(format_score(average(episodes, |e| e.trakt_score))),
        ]);
    }
    styled(&mut table);
    table
}
