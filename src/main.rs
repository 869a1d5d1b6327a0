use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use film_room::config::{Config, OutputFormat};
use film_room::filters::{
    build_filter_state, parse_range_selection, parse_selection, FilterEngine, FilterState,
    RangeFilterState,
};
use film_room::report;
use film_room::{PlayLibrary, PlayLoader};

#[derive(Parser)]
#[command(name = "film-room")]
#[command(version, about = "Browse and filter a football play library")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory containing play data files (overrides config)
    #[arg(short = 'd', long, global = true)]
    plays_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct FilterArgs {
    /// Discrete filter, e.g. playType=Pass or down=3,4 (repeatable)
    #[arg(short, long = "filter", value_name = "CATEGORY=VALUES")]
    filters: Vec<String>,

    /// Range filter, e.g. yardLine=0:32 (repeatable)
    #[arg(short, long = "range", value_name = "CATEGORY=LO:HI")]
    ranges: Vec<String>,

    /// Treat ranges covering their category's default span as inactive
    #[arg(long)]
    ignore_full_span: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List plays matching the given filters
    Plays {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Count plays per value of a category
    Facets {
        /// Category to count (discrete or bucketed)
        category: String,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List every filterable category
    Categories,
    /// Validate the configuration and filter table
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut fallback_reason = None;
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?.with_env_overrides(),
        None => Config::load().unwrap_or_else(|e| {
            fallback_reason = Some(e);
            Config::default()
        }),
    };

    // Initialize logging
    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.output.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(format!("film_room={level},film_core={level},warn"))
        .with_writer(std::io::stderr)
        .init();

    if cli.verbose {
        info!("Verbose logging enabled");
    }

    if let Some(e) = fallback_reason {
        debug!("Using default configuration: {}", e);
    }

    config.validate().context("configuration is invalid")?;
    let engine = FilterEngine::new(config.filters.clone());

    match cli.command {
        Commands::Categories => {
            print!("{}", report::render_categories(&engine.schema().categories()));
        }
        Commands::CheckConfig => {
            let schema = engine.schema();
            println!(
                "✅ Configuration OK: {} discrete, {} bucketed, {} range categories",
                schema.discrete.len(),
                schema.bucketed.len(),
                schema.ranges.len()
            );
        }
        Commands::Plays { filter, json } => {
            let library = load_library(&config, cli.plays_dir).await?;
            let (filters, ranges) = parse_filter_args(&engine, &filter)?;

            let matched = engine.filter_plays(library.plays(), &filters, &ranges);
            let format = if json { OutputFormat::Json } else { config.output.format };
            match format {
                OutputFormat::Json => {
                    println!("{}", report::render_play_json(&matched, library.len())?);
                }
                OutputFormat::Table => {
                    print!(
                        "{}",
                        report::render_play_table(&matched, library.len(), config.output.max_rows)
                    );
                }
            }
        }
        Commands::Facets { category, filter } => {
            let library = load_library(&config, cli.plays_dir).await?;
            let (filters, ranges) = parse_filter_args(&engine, &filter)?;

            if engine.schema().discrete_category(&category).is_none()
                && engine.schema().bucket_category(&category).is_none()
            {
                warn!("'{}' is not in the filter table", category);
            }

            let facets = engine.facet_counts_with(library.plays(), &category, &filters, &ranges);
            print!("{}", report::render_facets(&category, &facets));

            if let Some(selected) = filters.get(&category) {
                if let Some(bounds) = engine.schema().slider_bounds(&category, selected) {
                    println!("  slider bounds: {}", bounds);
                }
            }
        }
    }

    Ok(())
}

async fn load_library(config: &Config, plays_dir: Option<PathBuf>) -> Result<PlayLibrary> {
    let plays_dir = plays_dir.unwrap_or_else(|| config.library.plays_dir.clone());
    info!("📁 Play directory: {}", plays_dir.display());

    let loader = PlayLoader::new()
        .with_extensions(config.library.extensions.clone())
        .with_recursive(config.library.recursive);
    let library = loader
        .load_directory(&plays_dir)
        .await
        .with_context(|| format!("loading plays from {}", plays_dir.display()))?;

    for (play_type, count) in library.count_by_play_type() {
        debug!("{}: {} plays", play_type, count);
    }
    Ok(library)
}

fn parse_filter_args(
    engine: &FilterEngine,
    args: &FilterArgs,
) -> Result<(FilterState, RangeFilterState)> {
    let selections = args
        .filters
        .iter()
        .map(|arg| parse_selection(arg))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid --filter")?;
    let filters = build_filter_state(selections);

    let mut ranges = RangeFilterState::new();
    for arg in &args.ranges {
        let (category, range) = parse_range_selection(arg).context("invalid --range")?;
        if engine.range_source(&category).is_none() {
            warn!("Unknown range category '{}' will match no plays", category);
        }
        ranges.insert(category, range);
    }

    if args.ignore_full_span {
        ranges = engine.schema().strip_full_span_ranges(&ranges);
    }

    Ok((filters, ranges))
}
