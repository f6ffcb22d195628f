use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use atoll_grid::{Grid, Size};
use atoll_world::worldgen::load_config_from_path;
use atoll_world::{Generator, GeneratorKind, MapGenConfig, MapGenerator, overview, regions, rng};

mod ascii;
mod logging;
mod png;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum GeneratorArg {
    Automaton,
    Noise,
}

impl From<GeneratorArg> for GeneratorKind {
    fn from(arg: GeneratorArg) -> Self {
        match arg {
            GeneratorArg::Automaton => GeneratorKind::Automaton,
            GeneratorArg::Noise => GeneratorKind::Noise,
        }
    }
}

/// Whether ground cells are the solid part of the map, or the open space around it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum SolidMode {
    #[default]
    Inside,
    Outside,
}

#[derive(Parser, Debug)]
#[command(name = "atoll", about = "Procedural island and cave map generator")]
struct Args {
    /// TOML configuration; a missing file means built-in defaults
    #[arg(long, default_value = "assets/mapgen.toml")]
    config: PathBuf,
    #[arg(long, value_enum)]
    generator: Option<GeneratorArg>,
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i32>,
    #[arg(long)]
    seed: Option<u64>,
    /// Worker threads for the parallel stages; 0 uses every core
    #[arg(long)]
    workers: Option<usize>,
    /// none | keep_largest | drop_smaller_than
    #[arg(long)]
    policy: Option<String>,
    /// Island size cutoff for drop_smaller_than
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<i64>,
    #[arg(long, value_enum, default_value_t = SolidMode::Inside)]
    solid_mode: SolidMode,
    /// Write the ASCII map here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long)]
    png: Option<PathBuf>,
    /// Color each island separately in the PNG
    #[arg(long)]
    png_regions: bool,
    /// Generate this many maps, reseeding between them
    #[arg(long, default_value_t = 1)]
    regenerate: u32,
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(args: &Args) -> Result<MapGenConfig, Box<dyn Error>> {
    let mut cfg = if args.config.exists() {
        log::info!("loading config from {}", args.config.display());
        load_config_from_path(&args.config)?
    } else {
        log::info!("no config at {}, using defaults", args.config.display());
        MapGenConfig::default()
    };
    if let Some(kind) = args.generator {
        cfg.generator = kind.into();
    }
    if let Some(w) = args.width {
        cfg.size.width = w;
    }
    if let Some(h) = args.height {
        cfg.size.height = h;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(n) = args.workers {
        cfg.workers = n;
    }
    if let Some(policy) = &args.policy {
        cfg.islands.policy = policy.clone();
    }
    if let Some(t) = args.threshold {
        cfg.islands.threshold = t;
    }
    Ok(cfg)
}

fn numbered(path: &Path, index: u32, total: u32) -> PathBuf {
    if total <= 1 {
        return path.to_path_buf();
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("map");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("png");
    path.with_file_name(format!("{stem}-{index}.{ext}"))
}

fn log_summary(index: u32, grid: &Grid) {
    let (_, counts) = regions::label(grid);
    let largest = counts.largest().map(|id| counts.get(id)).unwrap_or(0);
    log::info!(
        "map {}: {}x{}, {} ground cells, {} regions, largest region {}",
        index,
        grid.width(),
        grid.height(),
        grid.ground_count(),
        counts.region_count(),
        largest
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.verbose, args.log_file.as_deref())?;

    let cfg = load_config(&args)?;
    let size: Size = cfg.size;
    let mut generator = Generator::from_config(&cfg)?;
    let base_seed = cfg
        .seed
        .unwrap_or_else(|| rng::next_int(0, i32::MAX) as u64);

    let mut text = String::new();
    for i in 0..args.regenerate {
        if i > 0 {
            generator.new_seed(base_seed.wrapping_add(u64::from(i)));
        }
        let mut grid = generator.generate_map(size)?;
        log_summary(i, &grid);
        if args.solid_mode == SolidMode::Outside {
            grid.invert();
        }

        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&ascii::render(&grid));

        if let Some(path) = &args.png {
            let image = if args.png_regions {
                let (areas, _) = regions::label(&grid);
                overview::render_regions(&grid, &areas)
            } else {
                overview::render_cells(&grid)
            };
            png::write_overview(&numbered(path, i, args.regenerate), &image)?;
        }
    }

    match &args.out {
        Some(path) => {
            fs::write(path, &text)?;
            log::info!("wrote ascii map to {}", path.display());
        }
        None => std::io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_values() {
        let args = Args::parse_from([
            "atoll",
            "--config",
            "does/not/exist.toml",
            "--generator",
            "noise",
            "--width",
            "12",
            "--policy",
            "keep_largest",
            "--workers",
            "1",
        ]);
        let cfg = load_config(&args).unwrap();
        assert_eq!(cfg.generator, GeneratorKind::Noise);
        assert_eq!(cfg.size, Size::new(12, 64));
        assert_eq!(cfg.islands.policy, "keep_largest");
        assert_eq!(cfg.workers, 1);
        assert_eq!(args.solid_mode, SolidMode::Inside);
    }

    #[test]
    fn negative_sizes_parse_and_reach_validation() {
        let args = Args::parse_from(["atoll", "--config", "nope.toml", "--height", "-4"]);
        let cfg = load_config(&args).unwrap();
        assert_eq!(cfg.size.height, -4);
    }

    #[test]
    fn png_names_are_numbered_for_batches() {
        let p = Path::new("out/map.png");
        assert_eq!(numbered(p, 2, 1), PathBuf::from("out/map.png"));
        assert_eq!(numbered(p, 2, 3), PathBuf::from("out/map-2.png"));
    }
}
