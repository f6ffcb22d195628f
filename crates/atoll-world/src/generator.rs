use std::time::Instant;

use atoll_grid::{Grid, Size};

use crate::error::GenError;
use crate::noise_fill::{self, NoiseField};
use crate::worldgen::{
    GenerationParameters, GeneratorKind, IslandPolicy, MapGenConfig, ORIGIN_MAX, ORIGIN_MIN,
    check_noise_threshold, check_scale, check_size,
};
use crate::workers::Workers;
use crate::{automaton, fill, islands, regions, rng};

/// Produces one map per call. Each call runs to completion before returning.
pub trait MapGenerator {
    fn generate_map(&self, size: Size) -> Result<Grid, GenError>;
}

fn elapsed_ms(t0: Instant) -> f64 {
    t0.elapsed().as_secs_f64() * 1000.0
}

/// Random fill, automaton smoothing, then island filtering.
#[derive(Debug)]
pub struct AutomatonGenerator {
    params: GenerationParameters,
    workers: Workers,
}

impl AutomatonGenerator {
    pub fn new(params: GenerationParameters, workers: Workers) -> Result<Self, GenError> {
        params.validate_automaton()?;
        log::info!(
            target: "mapgen",
            "automaton generator: {} generations, p={}, islands={:?}, {} threads",
            params.generations,
            params.ground_probability,
            params.island_policy,
            workers.threads()
        );
        Ok(Self { params, workers })
    }

    pub fn params(&self) -> &GenerationParameters {
        &self.params
    }

    pub fn reseed(&self, seed: u64) {
        rng::reseed(seed);
    }
}

impl MapGenerator for AutomatonGenerator {
    fn generate_map(&self, size: Size) -> Result<Grid, GenError> {
        self.params.validate_automaton()?;
        let (width, height) = check_size(size)?;
        let p = &self.params;
        self.workers.install(|| {
            let t0 = Instant::now();
            let grid = fill::random_fill(width, height, p.ground_probability);
            log::debug!(target: "mapgen", "fill {}x{} in {:.2}ms", width, height, elapsed_ms(t0));

            let t0 = Instant::now();
            let grid = automaton::run(grid, p.generations);
            log::debug!(
                target: "mapgen",
                "automaton x{} in {:.2}ms",
                p.generations,
                elapsed_ms(t0)
            );

            if p.island_policy == IslandPolicy::None {
                return Ok(grid);
            }
            let t0 = Instant::now();
            let (areas, counts) = regions::label(&grid);
            let filtered = islands::apply(&grid, &areas, &counts, p.island_policy)?;
            log::debug!(target: "mapgen", "islands in {:.2}ms", elapsed_ms(t0));
            Ok(filtered)
        })
    }
}

/// Thresholded coherent noise sampled from a movable origin.
pub struct NoiseGenerator {
    scale: f64,
    threshold: f64,
    origin: (f64, f64),
    field: NoiseField,
    workers: Workers,
}

impl NoiseGenerator {
    /// Uses `params.origin_offset` when set, otherwise draws an origin from the random source.
    pub fn new(params: &GenerationParameters, workers: Workers) -> Result<Self, GenError> {
        params.validate_noise()?;
        let origin = params.origin_offset.unwrap_or_else(draw_origin);
        log::info!(
            target: "mapgen",
            "noise generator: scale={}, threshold={}, origin=({:.3}, {:.3})",
            params.noise_scale,
            params.noise_threshold,
            origin.0,
            origin.1
        );
        Ok(Self {
            scale: params.noise_scale,
            threshold: params.noise_threshold,
            origin,
            field: NoiseField::new(),
            workers,
        })
    }

    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    pub fn set_origin(&mut self, origin: (f64, f64)) {
        self.origin = origin;
    }

    /// Draws a fresh origin for the next `generate_map` call and returns it.
    pub fn reseed_origin(&mut self) -> (f64, f64) {
        self.origin = draw_origin();
        log::info!(target: "mapgen", "noise origin moved to ({:.3}, {:.3})", self.origin.0, self.origin.1);
        self.origin
    }
}

fn draw_origin() -> (f64, f64) {
    let x = rng::next_range_f64(ORIGIN_MIN, ORIGIN_MAX);
    let y = rng::next_range_f64(ORIGIN_MIN, ORIGIN_MAX);
    (x, y)
}

impl MapGenerator for NoiseGenerator {
    fn generate_map(&self, size: Size) -> Result<Grid, GenError> {
        check_scale(self.scale)?;
        check_noise_threshold(self.threshold)?;
        let (width, height) = check_size(size)?;
        self.workers.install(|| {
            let t0 = Instant::now();
            let grid = noise_fill::sample_fill(
                &self.field,
                width,
                height,
                self.scale,
                self.threshold,
                self.origin,
            );
            log::debug!(
                target: "mapgen",
                "noise fill {}x{} in {:.2}ms",
                width,
                height,
                elapsed_ms(t0)
            );
            Ok(grid)
        })
    }
}

impl std::fmt::Debug for NoiseGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseGenerator")
            .field("scale", &self.scale)
            .field("threshold", &self.threshold)
            .field("origin", &self.origin)
            .field("workers", &self.workers)
            .finish()
    }
}

/// Configuration-selected generator.
#[derive(Debug)]
pub enum Generator {
    Automaton(AutomatonGenerator),
    Noise(NoiseGenerator),
}

impl Generator {
    /// Validates everything, then applies the configured seed and builds the selected variant.
    /// The random source is left untouched when any value is rejected.
    pub fn from_config(cfg: &MapGenConfig) -> Result<Self, GenError> {
        let params = GenerationParameters::from_config(cfg)?;
        match cfg.generator {
            GeneratorKind::Automaton => params.validate_automaton()?,
            GeneratorKind::Noise => params.validate_noise()?,
        }
        let workers = Workers::with_threads(cfg.workers)?;
        // Before `build`: the noise variant draws its origin from the reseeded stream.
        if let Some(seed) = cfg.seed {
            rng::reseed(seed);
        }
        Self::build(cfg.generator, params, workers)
    }

    pub fn build(
        kind: GeneratorKind,
        params: GenerationParameters,
        workers: Workers,
    ) -> Result<Self, GenError> {
        Ok(match kind {
            GeneratorKind::Automaton => Generator::Automaton(AutomatonGenerator::new(params, workers)?),
            GeneratorKind::Noise => Generator::Noise(NoiseGenerator::new(&params, workers)?),
        })
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            Generator::Automaton(_) => GeneratorKind::Automaton,
            Generator::Noise(_) => GeneratorKind::Noise,
        }
    }

    /// Reseeds the random source; the noise variant also moves to a freshly drawn origin.
    pub fn new_seed(&mut self, seed: u64) {
        rng::reseed(seed);
        if let Generator::Noise(noise) = self {
            noise.reseed_origin();
        }
    }
}

impl MapGenerator for Generator {
    fn generate_map(&self, size: Size) -> Result<Grid, GenError> {
        match self {
            Generator::Automaton(g) => g.generate_map(size),
            Generator::Noise(g) => g.generate_map(size),
        }
    }
}
