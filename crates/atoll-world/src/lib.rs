//! Map generation stages, generators, and their configuration.
#![forbid(unsafe_code)]

pub mod automaton;
pub mod error;
pub mod fill;
pub mod generator;
pub mod islands;
pub mod noise_fill;
pub mod overview;
pub mod regions;
pub mod rng;
pub mod workers;
pub mod worldgen;

pub use error::{GenError, ThresholdKind};
pub use generator::{AutomatonGenerator, Generator, MapGenerator, NoiseGenerator};
pub use workers::Workers;
pub use worldgen::{GenerationParameters, GeneratorKind, IslandPolicy, MapGenConfig};
