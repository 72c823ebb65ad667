//! HEALPix sky-map viewer pipeline.
//!
//! Reads a pixelized sky map, converts it to NESTED ordering at the
//! requested resolution, and hands the result to the scene renderer
//! together with the resolved scaling configuration.

mod config;
mod scene;
mod source;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use map_reducer::{reduce_map, RawMap, ReductionConfig};

use config::ViewerConfig;
use scene::{SceneInput, SceneSink, SummarySink};
use source::{JsonMapSource, MapSource};

#[derive(Parser, Debug)]
#[command(name = "viewer")]
#[command(about = "HEALPix sky map viewer")]
struct Args {
    /// Path to the map file
    map: String,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Override the configured order reduction
    #[arg(long)]
    order_reduce: Option<u32>,

    /// Override the configured colour map
    #[arg(long)]
    colourmap: Option<String>,

    /// Render with relief
    #[arg(long)]
    relief: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting sky map viewer");

    // Resolve configuration: file settings, then command-line overrides,
    // frozen before the core runs.
    let file_config = match &args.config {
        Some(path) => ViewerConfig::from_file(path)?,
        None => ViewerConfig::default(),
    };
    let settings = file_config.resolve(args.order_reduce, args.colourmap.clone(), args.relief);
    info!(
        order_reduce = settings.order_reduce,
        colourmap = %settings.colourmap_type,
        relief = settings.use_relief,
        "Resolved configuration"
    );

    // Read the map
    let map_file = JsonMapSource::new(&args.map)
        .read()
        .with_context(|| format!("reading sky map {}", args.map))?;
    info!(
        nside = map_file.nside,
        ordering = %map_file.ordering,
        coordsys = %map_file.coordsys,
        "Read sky map"
    );

    // Normalize, reduce, and release the raw storage
    let raw = RawMap::from_reader_parts(map_file.nside, &map_file.ordering, map_file.values)
        .context("building raw map from reader output")?;
    let reduced = reduce_map(raw, &ReductionConfig::new(settings.order_reduce))
        .context("reducing sky map")?;
    info!(
        order = reduced.target_order(),
        pixels = reduced.pixel_count(),
        min = reduced.range().min,
        max = reduced.range().max,
        "Reduced map"
    );

    // Hand the scene to the renderer
    let scene = SceneInput::compose(&args.map, reduced, &settings);
    SummarySink.present(&scene)?;

    Ok(())
}
