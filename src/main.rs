use std::{
    error::Error,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use log::{debug, info};

use tile_spiral::{
    config::{Algorithm, TraversalConfig},
    csv_recorder::CsvRecorder,
    direction::{Direction, Rotation},
    fast_spiral::fast_spiral,
    logger::{LogLevel, LoggerBuilder},
    reference_spiral::reference_spiral,
    region::Region,
    spiral_iterator::StatefulSpiral,
    verify::verify,
};

#[derive(Parser, Debug)]
#[command(name = "tile-spiral", version)]
#[command(about = "Print the cells of a rectangular region in spiral order, center first")]
struct Args {
    /// JSON config to read; created with defaults if missing
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    left: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    top: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    right: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    bottom: Option<i32>,

    /// Start cell as `x,y` (defaults to the region's center)
    #[arg(long, value_parser = parse_cell, allow_hyphen_values = true)]
    start: Option<(i32, i32)>,

    #[arg(long, value_enum)]
    direction: Option<Direction>,

    /// Initial direction by index: 0 right, 1 up, 2 left, 3 down
    #[arg(long, conflicts_with = "direction")]
    direction_index: Option<u8>,

    #[arg(long, value_enum)]
    rotation: Option<Rotation>,

    #[arg(long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Cells advanced per scheduling tick (stateful walk only)
    #[arg(long)]
    batch: Option<usize>,

    /// Directory to append traversal records to as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Cross-check all three traversals over the region
    #[arg(long)]
    verify: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Directory to write dated log files under
    #[arg(long)]
    log_path: Option<PathBuf>,
}

fn parse_cell(value: &str) -> Result<(i32, i32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{value}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|err| format!("invalid coordinate `{part}`: {err}"))
    };
    Ok((parse(x)?, parse(y)?))
}

impl Args {
    fn apply(&self, mut config: TraversalConfig) -> Result<TraversalConfig, Box<dyn Error>> {
        config.left = self.left.unwrap_or(config.left);
        config.top = self.top.unwrap_or(config.top);
        config.right = self.right.unwrap_or(config.right);
        config.bottom = self.bottom.unwrap_or(config.bottom);
        config.start = self.start.or(config.start);
        config.direction = match (self.direction, self.direction_index) {
            (Some(direction), _) => direction,
            (None, Some(index)) => Direction::try_from(index)?,
            (None, None) => config.direction,
        };
        config.rotation = self.rotation.unwrap_or(config.rotation);
        config.algorithm = self.algorithm.unwrap_or(config.algorithm);
        config.batch = self.batch.unwrap_or(config.batch);
        Ok(config)
    }
}

fn traverse(config: &TraversalConfig, region: Region) -> Result<Vec<(i32, i32)>, Box<dyn Error>> {
    let cells = match config.algorithm {
        Algorithm::Fast => fast_spiral(region),
        Algorithm::Reference => reference_spiral(region),
        Algorithm::Stateful => {
            let mut spiral = StatefulSpiral::builder(region)
                .start_option(config.start)
                .direction(config.direction)
                .rotation(config.rotation)
                .build()?;
            let batch = config.batch.max(1);
            let mut cells = Vec::new();
            let mut tick = 0;
            while spiral.is_active() {
                let before = cells.len();
                cells.extend(spiral.by_ref().take(batch));
                tick += 1;
                debug!("tick {tick}: {} cells", cells.len() - before);
            }
            cells
        }
    };
    Ok(cells)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => TraversalConfig::load(path),
        None => TraversalConfig::default(),
    };
    let config = args.apply(config)?;
    let region = config.region()?;
    config.check_orientation(&region)?;
    info!(
        "{:?} spiral over {region:?} ({} cells)",
        config.algorithm,
        region.area()
    );

    if args.verify {
        let verification = verify(region);
        println!("{verification:?}");
        if !verification.is_consistent() {
            return Err(format!("traversals disagree over {region:?}").into());
        }
        return Ok(());
    }

    let cells = traverse(&config, region)?;

    if let Some(dir) = &args.csv {
        let name = format!(
            "{:?}_{}_{}_{}_{}",
            config.algorithm,
            region.left(),
            region.top(),
            region.right(),
            region.bottom()
        )
        .to_lowercase();
        let rows = CsvRecorder::new(dir).record(name, cells.iter().copied())?;
        info!("recorded {rows} cells");
    }

    let mut out = BufWriter::new(io::stdout().lock());
    for (x, y) in cells {
        writeln!(out, "{x},{y}")?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    LoggerBuilder::new()
        .path_option(args.log_path.clone())
        .level(args.log_level)
        .prefix("tile_spiral")
        .install()?;
    let result = run(args);
    log::logger().flush();
    result
}
