//! Orienteer: command-line entry point.

use std::path::PathBuf;

use clap::Parser;
use log::info;
use orienteer_core::Season;
use orienteer_lib::{AppConfig, io, render};
use orienteer_paths::{JoinMode, Planner};

#[derive(Parser)]
#[command(name = "orienteer")]
#[command(version)]
#[command(about = "Plan the fastest orienteering route through a list of controls")]
struct Cli {
    /// Terrain image (PNG) using the orienteering color palette
    terrain: PathBuf,

    /// Elevation file: one row of whitespace-separated meters per line
    elevation: PathBuf,

    /// Waypoints: whitespace-separated `x y` pairs, visited in order
    waypoints: PathBuf,

    /// summer, fall, winter or spring
    season: String,

    /// Where to write the rendered route (PNG)
    output: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Join legs without repeating the shared waypoint cell
    #[arg(long)]
    dedupe: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let season: Season = cli.season.parse()?;
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if cli.dedupe {
        config.search.join = JoinMode::Deduplicate;
    }

    let (image, mut map) = io::load_map(&cli.terrain, &cli.elevation, config.cell_scale)?;
    let waypoints = io::load_waypoints(&cli.waypoints)?;
    info!(
        "loaded {}x{} map and {} waypoints",
        map.width(),
        map.height(),
        waypoints.len()
    );

    let plan = Planner::new(config.plan_config()).plan(&mut map, season, &waypoints)?;

    let rendered = render::render(&image, &map, &plan);
    render::save(&rendered, &cli.output)?;
    info!("wrote {}", cli.output.display());

    println!("Total Path Length: {}m", plan.rounded_length());
    Ok(())
}
