use fastnoise_lite::{FastNoiseLite, NoiseType};
use rayon::prelude::*;

use atoll_grid::{CellStatus, Grid, Size};

use crate::error::GenError;
use crate::worldgen::{check_noise_threshold, check_scale, check_size};

// Fixed so a given origin always samples the same field.
const NOISE_SEED: i32 = 1337;

/// Coherent-noise field sampled in `[0, 1]`.
pub struct NoiseField {
    noise: FastNoiseLite,
}

impl NoiseField {
    pub fn new() -> Self {
        let mut noise = FastNoiseLite::with_seed(NOISE_SEED);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_frequency(Some(1.0));
        Self { noise }
    }

    #[inline]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let n = self.noise.get_noise_2d(x as f32, y as f32) as f64;
        (n * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new()
    }
}

/// Thresholds the noise field over the grid. Draws nothing from the random source.
pub fn fill(size: Size, scale: f64, threshold: f64, origin: (f64, f64)) -> Result<Grid, GenError> {
    let (width, height) = check_size(size)?;
    check_scale(scale)?;
    check_noise_threshold(threshold)?;
    Ok(sample_fill(&NoiseField::new(), width, height, scale, threshold, origin))
}

pub(crate) fn sample_fill(
    field: &NoiseField,
    width: usize,
    height: usize,
    scale: f64,
    threshold: f64,
    (ox, oy): (f64, f64),
) -> Grid {
    let mut grid = Grid::new(width, height);
    if grid.is_empty() {
        return grid;
    }
    let (w, h) = (width as f64, height as f64);
    grid.cells_mut()
        .par_chunks_mut(height)
        .enumerate()
        .for_each(|(x, column)| {
            let sx = ox + x as f64 / w * scale;
            for (y, cell) in column.iter_mut().enumerate() {
                let sy = oy + y as f64 / h * scale;
                *cell = if field.sample(sx, sy) > threshold {
                    CellStatus::Ground
                } else {
                    CellStatus::Empty
                };
            }
        });
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_in_unit_interval() {
        let field = NoiseField::new();
        for i in 0..200 {
            let v = field.sample(i as f64 * 0.37, i as f64 * 0.91 + 3.0);
            assert!((0.0..=1.0).contains(&v), "sample {}", v);
        }
    }

    #[test]
    fn same_origin_same_grid() {
        let a = fill(Size::new(40, 30), 10.0, 0.5, (12.5, 80.0)).unwrap();
        let b = fill(Size::new(40, 30), 10.0, 0.5, (12.5, 80.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn extreme_thresholds() {
        let none = fill(Size::new(20, 20), 10.0, 1.0, (3.0, 4.0)).unwrap();
        assert_eq!(none.ground_count(), 0);
        let field = NoiseField::new();
        let g = fill(Size::new(20, 20), 10.0, 0.0, (3.0, 4.0)).unwrap();
        for (x, y, status) in g.iter() {
            let s = field.sample(3.0 + x as f64 / 20.0 * 10.0, 4.0 + y as f64 / 20.0 * 10.0);
            assert_eq!(status.is_ground(), s > 0.0);
        }
    }

    #[test]
    fn produces_a_mix_of_cells() {
        let g = fill(Size::new(64, 64), 10.0, 0.5, (100.0, 200.0)).unwrap();
        assert!(g.ground_count() > 0);
        assert!(g.ground_count() < g.len());
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(fill(Size::new(4, 4), 0.0, 0.5, (0.0, 0.0)), Err(GenError::InvalidScale(0.0)));
        assert!(matches!(
            fill(Size::new(4, 4), 1.0, 1.5, (0.0, 0.0)),
            Err(GenError::InvalidThreshold(_))
        ));
        assert!(fill(Size::new(0, 4), 1.0, 0.5, (0.0, 0.0)).unwrap().is_empty());
    }
}
