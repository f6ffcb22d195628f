//! Connected-component labeling of ground cells.
//!
//! Cells are scanned in storage order (x outer, y inner, both ascending), so the
//! region containing the lowest column-major index gets id 1. Adjacency is 4-way.

use std::collections::VecDeque;

use atoll_grid::{AreaCounts, AreaMap, Grid};

pub fn label(grid: &Grid) -> (AreaMap, AreaCounts) {
    let mut areas = AreaMap::for_grid(grid);
    let mut counts = AreaCounts::new();
    let (w, h) = (grid.width(), grid.height());
    let cells = grid.cells();
    let mut seen = vec![false; cells.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut members: Vec<usize> = Vec::new();

    for start in 0..cells.len() {
        if seen[start] || !cells[start].is_ground() {
            continue;
        }
        members.clear();
        seen[start] = true;
        queue.push_back(start);
        while let Some(i) = queue.pop_front() {
            members.push(i);
            let (x, y) = (i / h, i % h);
            let mut neighbors = [None; 4];
            if x > 0 {
                neighbors[0] = Some(i - h);
            }
            if x + 1 < w {
                neighbors[1] = Some(i + h);
            }
            if y > 0 {
                neighbors[2] = Some(i - 1);
            }
            if y + 1 < h {
                neighbors[3] = Some(i + 1);
            }
            for j in neighbors.into_iter().flatten() {
                if !seen[j] && cells[j].is_ground() {
                    seen[j] = true;
                    queue.push_back(j);
                }
            }
        }
        let id = counts.push(members.len());
        areas.assign(&members, id);
    }
    log::debug!(
        target: "mapgen",
        "labeled {} regions covering {} cells",
        counts.region_count(),
        counts.total()
    );
    (areas, counts)
}
