use rand::Rng;
use rayon::prelude::*;

use atoll_grid::{CellStatus, Grid, Size};

use crate::error::GenError;
use crate::rng;
use crate::worldgen::{check_probability, check_size};

/// Seeds a grid with independent per-cell draws: `Ground` with probability `ground_probability`.
pub fn fill(size: Size, ground_probability: f64) -> Result<Grid, GenError> {
    let (width, height) = check_size(size)?;
    check_probability(ground_probability)?;
    Ok(random_fill(width, height, ground_probability))
}

// Columns are filled in parallel; each worker draws from its own stream.
pub(crate) fn random_fill(width: usize, height: usize, ground_probability: f64) -> Grid {
    let mut grid = Grid::new(width, height);
    if grid.is_empty() {
        return grid;
    }
    grid.cells_mut()
        .par_chunks_mut(height)
        .for_each(|column| {
            rng::with_stream(|rng| {
                for cell in column.iter_mut() {
                    *cell = if rng.gen_range(0.0..1.0) < ground_probability {
                        CellStatus::Ground
                    } else {
                        CellStatus::Empty
                    };
                }
            })
        });
    grid
}
