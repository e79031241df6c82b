mod camera;
mod config;
mod query;
mod stats;
mod viewer;
mod watch;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use strata_mesh_cpu::Tessellation;
use strata_terrain::LoadMethod;

use config::{Config, DEFAULT_CONFIG, TerrainOverrides};

/// Heightfield terrain viewer with headless query and stats commands.
#[derive(Parser, Debug)]
#[command(name = "strata", version, about)]
struct Cli {
    /// Log filter, e.g. "debug" or "terrain=trace" (default: info, or RUST_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a window and render the terrain (default)
    View {
        #[command(flatten)]
        terrain: TerrainArgs,
        /// Reload the terrain when its description or texture file changes
        #[arg(long)]
        watch: bool,
    },
    /// Load the terrain and query heights and normals
    Query {
        #[command(flatten)]
        terrain: TerrainArgs,
        /// World point as x,z (repeatable)
        #[arg(long = "at", value_parser = query::parse_point, allow_hyphen_values = true)]
        at: Vec<(f32, f32)>,
    },
    /// Run every tessellation strategy headless and print emission counts
    Stats {
        #[command(flatten)]
        terrain: TerrainArgs,
    },
}

#[derive(Args, Debug, Default)]
struct TerrainArgs {
    /// Scene config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Terrain description file
    #[arg(long)]
    description: Option<PathBuf>,
    /// Description format: samples | image | 1 | 2
    #[arg(long)]
    method: Option<LoadMethod>,
    /// Texture image draped over the terrain
    #[arg(long)]
    texture: Option<PathBuf>,
    /// Vertical and horizontal scale applied at load
    #[arg(long)]
    scale: Option<f32>,
    /// list | fan | strip
    #[arg(long)]
    tessellation: Option<Tessellation>,
}

impl TerrainArgs {
    fn resolve(self) -> Result<Config, Box<dyn std::error::Error>> {
        let path = self.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
        let mut cfg = Config::load_or_default(&path)?;
        cfg.apply(&TerrainOverrides {
            description: self.description,
            method: self.method,
            texture: self.texture,
            scale: self.scale,
            tessellation: self.tessellation,
        });
        Ok(cfg)
    }
}

fn main() {
    let cli = Cli::parse();
    match &cli.log {
        Some(filter) => env_logger::Builder::new().parse_filters(filter).init(),
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init(),
    }

    let command = cli.command.unwrap_or(Command::View {
        terrain: TerrainArgs::default(),
        watch: false,
    });
    let result = match command {
        Command::View { terrain, watch } => terrain.resolve().and_then(|cfg| viewer::run(&cfg, watch)),
        Command::Query { terrain, at } => terrain.resolve().and_then(|cfg| query::run(&cfg, &at)),
        Command::Stats { terrain } => terrain.resolve().and_then(|cfg| stats::run(&cfg)),
    };
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
