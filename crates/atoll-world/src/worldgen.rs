use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use atoll_grid::Size;

use crate::error::{GenError, ThresholdKind};

/// Lower and upper bound (exclusive) for randomly drawn noise origins.
pub const ORIGIN_MIN: f64 = 0.0;
pub const ORIGIN_MAX: f64 = 300.0;

#[derive(Clone, Debug, Deserialize)]
pub struct MapGenConfig {
    #[serde(default = "default_generator")]
    pub generator: GeneratorKind,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub workers: usize,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub automaton: Automaton,
    #[serde(default)]
    pub islands: Islands,
    #[serde(default)]
    pub noise: Noise,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self {
            generator: default_generator(),
            seed: None,
            workers: 0,
            size: Size::default(),
            automaton: Automaton::default(),
            islands: Islands::default(),
            noise: Noise::default(),
        }
    }
}

impl MapGenConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Automaton,
    Noise,
}

fn default_generator() -> GeneratorKind {
    GeneratorKind::Automaton
}

#[derive(Clone, Debug, Deserialize)]
pub struct Automaton {
    #[serde(default = "default_generations")]
    pub generations: u32,
    #[serde(default = "default_ground_probability")]
    pub ground_probability: f64,
}
fn default_generations() -> u32 {
    5
}
fn default_ground_probability() -> f64 {
    0.5
}
impl Default for Automaton {
    fn default() -> Self {
        Self {
            generations: default_generations(),
            ground_probability: default_ground_probability(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Islands {
    #[serde(default = "default_policy")]
    pub policy: String,
    #[serde(default)]
    pub threshold: i64,
}
fn default_policy() -> String {
    "none".into()
}
impl Default for Islands {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            threshold: 0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Noise {
    #[serde(default = "default_noise_scale")]
    pub scale: f64,
    #[serde(default = "default_noise_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub origin: Option<[f64; 2]>,
}
fn default_noise_scale() -> f64 {
    10.0
}
fn default_noise_threshold() -> f64 {
    0.5
}
impl Default for Noise {
    fn default() -> Self {
        Self {
            scale: default_noise_scale(),
            threshold: default_noise_threshold(),
            origin: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IslandPolicy {
    None,
    KeepLargest,
    DropSmallerThan(i64),
}

impl IslandPolicy {
    /// Resolves a policy name from configuration. `threshold` only applies to `drop_smaller_than`.
    pub fn parse(name: &str, threshold: i64) -> Result<Self, GenError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(IslandPolicy::None),
            "keep_largest" => Ok(IslandPolicy::KeepLargest),
            "drop_smaller_than" => Ok(IslandPolicy::DropSmallerThan(threshold)),
            _ => Err(GenError::InvalidPolicy(name.to_string())),
        }
    }
}

// Flattened parameters handed to a generator (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationParameters {
    pub generations: u32,
    pub ground_probability: f64,
    pub island_policy: IslandPolicy,
    pub noise_scale: f64,
    pub noise_threshold: f64,
    /// Fixed noise origin; `None` draws one from the random source when the generator is built.
    pub origin_offset: Option<(f64, f64)>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            generations: default_generations(),
            ground_probability: default_ground_probability(),
            island_policy: IslandPolicy::None,
            noise_scale: default_noise_scale(),
            noise_threshold: default_noise_threshold(),
            origin_offset: None,
        }
    }
}

impl GenerationParameters {
    pub fn from_config(cfg: &MapGenConfig) -> Result<Self, GenError> {
        Ok(Self {
            generations: cfg.automaton.generations,
            ground_probability: cfg.automaton.ground_probability,
            island_policy: IslandPolicy::parse(&cfg.islands.policy, cfg.islands.threshold)?,
            noise_scale: cfg.noise.scale,
            noise_threshold: cfg.noise.threshold,
            origin_offset: cfg.noise.origin.map(|[x, y]| (x, y)),
        })
    }

    pub fn validate(&self) -> Result<(), GenError> {
        self.validate_automaton()?;
        self.validate_noise()
    }

    /// Checks the values the cellular-automaton pipeline reads.
    pub fn validate_automaton(&self) -> Result<(), GenError> {
        check_probability(self.ground_probability)?;
        check_policy(self.island_policy)
    }

    /// Checks the values the noise sampler reads.
    pub fn validate_noise(&self) -> Result<(), GenError> {
        check_scale(self.noise_scale)?;
        check_noise_threshold(self.noise_threshold)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<MapGenConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: MapGenConfig = toml::from_str(&s)?;
    Ok(cfg)
}

pub fn load_params_from_path(path: &Path) -> Result<GenerationParameters, Box<dyn Error>> {
    let cfg = load_config_from_path(path)?;
    Ok(GenerationParameters::from_config(&cfg)?)
}

/// Converts a requested size to grid dimensions, rejecting negative values.
pub fn check_size(size: Size) -> Result<(usize, usize), GenError> {
    size.dims().ok_or_else(|| GenError::invalid_size(size))
}

pub fn check_probability(p: f64) -> Result<(), GenError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(GenError::InvalidProbability(p));
    }
    Ok(())
}

pub fn check_noise_threshold(t: f64) -> Result<(), GenError> {
    if !(0.0..=1.0).contains(&t) {
        return Err(GenError::InvalidThreshold(ThresholdKind::Noise(t)));
    }
    Ok(())
}

pub fn check_scale(s: f64) -> Result<(), GenError> {
    if !(s.is_finite() && s > 0.0) {
        return Err(GenError::InvalidScale(s));
    }
    Ok(())
}

pub fn check_policy(policy: IslandPolicy) -> Result<(), GenError> {
    if let IslandPolicy::DropSmallerThan(t) = policy {
        if t < 0 {
            return Err(GenError::InvalidThreshold(ThresholdKind::IslandSize(t)));
        }
    }
    Ok(())
}
