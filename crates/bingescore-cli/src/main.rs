use bingescore_models::MediaType;
use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{aggregate, config, search, serve};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "bingescore")]
#[command(about = "BingeScore - TMDB, IMDb and Trakt ratings side by side, episode by episode")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    #[command(long_about = "Serve /health, /api/search and /api/media/aggregate. Host and port default to the [server] section of the config file; PORT in the environment overrides the file.")]
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
    /// Search movies and TV series
    Search {
        /// Title to look for (at least 2 characters)
        query: String,
    },
    /// Show ratings from every provider for one title
    #[command(long_about = "Fetch TMDB, IMDb (via OMDb) and Trakt ratings for a TMDB title. For series, episode ratings from TMDB and Trakt are merged per season; pass --season to list one season episode by episode.")]
    Aggregate {
        /// TMDB ID of the movie or series
        tmdb_id: u64,

        /// movie or tv
        #[arg(long, short = 't', default_value = "movie")]
        media_type: MediaType,

        /// Show the episodes of this season
        #[arg(long)]
        season: Option<u32>,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks API keys)
    Show {
        /// Show API keys unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a config file with placeholder keys
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = commands::load_config()?;

    // Only the long-running server writes to the configured log file
    let log_file = match cli.command {
        Commands::Serve { .. } => config.logging.file.as_deref(),
        _ => None,
    };
    logging::init_logging(cli.verbose, cli.quiet, log_file).map_err(|e| eyre!("{:#}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::Serve { host, port } => serve::run_serve(config, host, port, &output).await,
        Commands::Search { query } => search::run_search(&config, &query, &output).await,
        Commands::Aggregate {
            tmdb_id,
            media_type,
            season,
        } => aggregate::run_aggregate(&config, tmdb_id, media_type, season, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &config, &output),
    };

    if let Err(e) = &result {
        output.error(format!("{:#}", e));
    }
    result
}
