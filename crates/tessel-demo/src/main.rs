mod atlas;
mod runtime;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::Rng;

use tessel_engine::logging::{LoggingConfig, init_logging};
use tessel_engine::map::TileGrid;
use tessel_engine::render::StrategyKind;

/// wgpu tile map viewer: one map, three interchangeable render strategies.
#[derive(Debug, Parser)]
#[command(name = "tessel-demo", version, about)]
struct Args {
    /// Render strategy for the whole session.
    #[arg(long, value_enum, default_value = "buffered")]
    strategy: StrategyArg,

    /// Map width in tiles.
    #[arg(long, default_value_t = 256)]
    map_width: u32,

    /// Map height in tiles.
    #[arg(long, default_value_t = 256)]
    map_height: u32,

    /// Tile-set atlas PNG (16×16 grid of cells). A procedural atlas is
    /// generated when omitted.
    #[arg(long)]
    atlas: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum StrategyArg {
    Immediate,
    Buffered,
    Expanded,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Immediate => StrategyKind::Immediate,
            StrategyArg::Buffered => StrategyKind::Buffered,
            StrategyArg::Expanded => StrategyKind::Expanded,
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    let args = Args::parse();

    // Random map over the first four tile types, as a plausible terrain mix.
    let mut grid = TileGrid::new(args.map_width, args.map_height)?;
    let mut rng = rand::thread_rng();
    for cell in grid.cells_mut() {
        *cell = rng.gen_range(0..4);
    }

    let atlas_image = match &args.atlas {
        Some(path) => atlas::load_png(path)?,
        None => atlas::generate_fallback(),
    };

    log::info!(
        "starting {}x{} map with the {} strategy",
        args.map_width,
        args.map_height,
        StrategyKind::from(args.strategy).name()
    );

    runtime::run(args.strategy.into(), grid, atlas_image)
}
