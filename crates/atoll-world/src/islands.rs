use atoll_grid::{AreaCounts, AreaMap, CellStatus, Grid, NO_REGION};

use crate::error::GenError;
use crate::regions;
use crate::worldgen::{IslandPolicy, check_policy};

/// Clears ground regions the policy rejects. `areas` and `counts` must come from labeling `grid`;
/// labels of another shape, or ids `counts` does not know, give `LabelMismatch`.
pub fn apply(
    grid: &Grid,
    areas: &AreaMap,
    counts: &AreaCounts,
    policy: IslandPolicy,
) -> Result<Grid, GenError> {
    check_policy(policy)?;
    if !areas.matches(grid) {
        return Err(label_mismatch(grid, areas));
    }
    // Indexed by region id; slot 0 is the background and never consulted.
    let keep: Vec<bool> = match policy {
        IslandPolicy::None | IslandPolicy::DropSmallerThan(0) => return Ok(grid.clone()),
        IslandPolicy::KeepLargest => match counts.largest() {
            Some(winner) => (0..=counts.region_count() as u32).map(|id| id == winner).collect(),
            None => return Ok(grid.clone()),
        },
        IslandPolicy::DropSmallerThan(threshold) => counts
            .as_slice()
            .iter()
            .map(|&count| count as i64 > threshold)
            .collect(),
    };

    let mut out = grid.clone();
    let mut cleared = 0usize;
    for (cell, &id) in out.cells_mut().iter_mut().zip(areas.labels()) {
        if !cell.is_ground() || id == NO_REGION {
            continue;
        }
        let Some(&kept) = keep.get(id as usize) else {
            return Err(label_mismatch(grid, areas));
        };
        if !kept {
            *cell = CellStatus::Empty;
            cleared += 1;
        }
    }
    log::debug!(target: "mapgen", "island filter {:?} cleared {} cells", policy, cleared);
    Ok(out)
}

fn label_mismatch(grid: &Grid, areas: &AreaMap) -> GenError {
    GenError::LabelMismatch {
        grid: (grid.width(), grid.height()),
        labels: (areas.width(), areas.height()),
    }
}

/// Labels `grid` and applies `policy`. `IslandPolicy::None` skips labeling.
pub fn filter_islands(grid: &Grid, policy: IslandPolicy) -> Result<Grid, GenError> {
    if policy == IslandPolicy::None {
        return Ok(grid.clone());
    }
    let (areas, counts) = regions::label(grid);
    apply(grid, &areas, &counts, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_rows(rows: &[&str]) -> Grid {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        Grid::from_fn(width, height, |x, y| {
            if rows[y].as_bytes()[x] == b'#' {
                CellStatus::Ground
            } else {
                CellStatus::Empty
            }
        })
    }

    #[test]
    fn keep_largest_removes_everything_else() {
        let g = grid_from_rows(&["##..#", "##...", "....#", "...##"]);
        let out = filter_islands(&g, IslandPolicy::KeepLargest).unwrap();
        assert_eq!(out, grid_from_rows(&["##...", "##...", ".....", "....."]));
    }

    #[test]
    fn keep_largest_tie_goes_to_first_region() {
        let g = grid_from_rows(&["#.#", "#.#"]);
        let out = filter_islands(&g, IslandPolicy::KeepLargest).unwrap();
        assert_eq!(out, grid_from_rows(&["#..", "#.."]));
    }

    #[test]
    fn drop_smaller_than_is_inclusive() {
        let g = grid_from_rows(&["#..##", "...##", "##...", "....."]);
        let out = filter_islands(&g, IslandPolicy::DropSmallerThan(2)).unwrap();
        assert_eq!(out, grid_from_rows(&["...##", "...##", ".....", "....."]));
    }

    #[test]
    fn zero_threshold_and_none_are_noops() {
        let g = grid_from_rows(&["#.#", "...", "#.#"]);
        assert_eq!(filter_islands(&g, IslandPolicy::DropSmallerThan(0)).unwrap(), g);
        assert_eq!(filter_islands(&g, IslandPolicy::None).unwrap(), g);
    }

    #[test]
    fn no_regions_leaves_grid_unchanged() {
        let g = Grid::new(4, 4);
        assert_eq!(filter_islands(&g, IslandPolicy::KeepLargest).unwrap(), g);
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let g = grid_from_rows(&["#"]);
        let (areas, counts) = regions::label(&g);
        assert!(matches!(
            apply(&g, &areas, &counts, IslandPolicy::DropSmallerThan(-3)),
            Err(GenError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn labels_from_another_grid_are_rejected() {
        let g = grid_from_rows(&["##.", "..#"]);
        let other = grid_from_rows(&["#.", ".#"]);
        let (areas, counts) = regions::label(&other);
        assert_eq!(
            apply(&g, &areas, &counts, IslandPolicy::KeepLargest),
            Err(GenError::LabelMismatch { grid: (3, 2), labels: (2, 2) })
        );
    }

    #[test]
    fn unknown_region_ids_are_rejected() {
        let g = grid_from_rows(&["#.#"]);
        let (areas, _) = regions::label(&g);
        let mut counts = AreaCounts::new();
        counts.push(1);
        assert!(matches!(
            apply(&g, &areas, &counts, IslandPolicy::DropSmallerThan(5)),
            Err(GenError::LabelMismatch { .. })
        ));
    }
}
