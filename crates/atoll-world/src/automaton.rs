use rayon::prelude::*;

use atoll_grid::{CellStatus, Grid};

/// Ground cells among the 8 surrounding cells. Out-of-bounds neighbors do not count and do not wrap.
pub fn moore_count(grid: &Grid, x: usize, y: usize) -> u8 {
    let (w, h) = (grid.width() as i64, grid.height() as i64);
    let (cx, cy) = (x as i64, y as i64);
    let mut n = 0u8;
    for dx in -1i64..=1 {
        let nx = cx + dx;
        if nx < 0 || nx >= w {
            continue;
        }
        for dy in -1i64..=1 {
            let ny = cy + dy;
            if (dx == 0 && dy == 0) || ny < 0 || ny >= h {
                continue;
            }
            if grid.get(nx as usize, ny as usize).is_ground() {
                n += 1;
            }
        }
    }
    n
}

/// Birth on 5..=8 neighbors, survival on 1 or 4..=8.
#[inline]
pub fn next_state(current: CellStatus, neighbors: u8) -> CellStatus {
    let alive = match current {
        CellStatus::Ground => neighbors == 1 || (4..=8).contains(&neighbors),
        CellStatus::Empty => (5..=8).contains(&neighbors),
    };
    if alive { CellStatus::Ground } else { CellStatus::Empty }
}

/// One generation. Reads only `grid`, writes a fresh buffer.
pub fn step(grid: &Grid) -> Grid {
    let mut next = Grid::new(grid.width(), grid.height());
    if grid.is_empty() {
        return next;
    }
    next.cells_mut()
        .par_chunks_mut(grid.height())
        .enumerate()
        .for_each(|(x, column)| {
            for (y, cell) in column.iter_mut().enumerate() {
                *cell = next_state(grid.get(x, y), moore_count(grid, x, y));
            }
        });
    next
}

/// Applies `generations` steps in sequence. Zero generations returns the input unchanged.
pub fn run(grid: Grid, generations: u32) -> Grid {
    let mut current = grid;
    for generation in 0..generations {
        current = step(&current);
        log::trace!(
            target: "mapgen",
            "automaton generation {}: {} ground of {}",
            generation + 1,
            current.ground_count(),
            current.len()
        );
    }
    current
}
