//! Tile grid data model shared by the generators and their consumers.
#![forbid(unsafe_code)]

use serde::Deserialize;

mod area;

pub use area::{AreaCounts, AreaMap, NO_REGION};

/// Requested map dimensions. Signed so that a bad request can be represented and rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Dimensions as `usize`, or `None` if either one is negative.
    #[inline]
    pub fn dims(&self) -> Option<(usize, usize)> {
        if self.width < 0 || self.height < 0 {
            return None;
        }
        Some((self.width as usize, self.height as usize))
    }

    #[inline]
    pub fn cell_count(&self) -> Option<usize> {
        self.dims().map(|(w, h)| w * h)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(64, 64)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellStatus {
    #[default]
    Empty,
    Ground,
}

impl CellStatus {
    #[inline]
    pub fn is_ground(self) -> bool {
        matches!(self, CellStatus::Ground)
    }

    #[inline]
    pub fn inverted(self) -> Self {
        match self {
            CellStatus::Empty => CellStatus::Ground,
            CellStatus::Ground => CellStatus::Empty,
        }
    }
}

/// Column-major grid of cells: `index = x * height + y`.
///
/// Each column is a contiguous slice, so column workers can split the buffer
/// with `chunks_mut(height)` and never touch each other's cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellStatus>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, CellStatus::Empty)
    }

    pub fn filled(width: usize, height: usize, status: CellStatus) -> Self {
        Self {
            width,
            height,
            cells: vec![status; width * height],
        }
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> CellStatus) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a grid from column-major cells; the buffer is truncated or padded with `Empty`
    /// to exactly `width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<CellStatus>) -> Self {
        let mut c = cells;
        let expect = width * height;
        if c.len() != expect {
            c.resize(expect, CellStatus::Empty);
        }
        Self {
            width,
            height,
            cells: c,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensions as a [`Size`]. Each axis saturates at `i32::MAX`.
    #[inline]
    pub fn size(&self) -> Size {
        let clamp = |n: usize| i32::try_from(n).unwrap_or(i32::MAX);
        Size::new(clamp(self.width), clamp(self.height))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> CellStatus {
        self.cells[self.idx(x, y)]
    }

    /// Bounds-checked read; `None` outside the grid.
    #[inline]
    pub fn get_checked(&self, x: i64, y: i64) -> Option<CellStatus> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.get(x as usize, y as usize))
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, status: CellStatus) {
        let i = self.idx(x, y);
        self.cells[i] = status;
    }

    #[inline]
    pub fn cells(&self) -> &[CellStatus] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [CellStatus] {
        &mut self.cells
    }

    pub fn column(&self, x: usize) -> &[CellStatus] {
        let start = x * self.height;
        &self.cells[start..start + self.height]
    }

    /// Iterates `(x, y, status)` in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, CellStatus)> + '_ {
        let h = self.height;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (i / h, i % h, *c))
    }

    pub fn count(&self, status: CellStatus) -> usize {
        self.cells.iter().filter(|c| **c == status).count()
    }

    #[inline]
    pub fn ground_count(&self) -> usize {
        self.count(CellStatus::Ground)
    }

    pub fn invert(&mut self) {
        for c in &mut self.cells {
            *c = c.inverted();
        }
    }

    pub fn inverted(&self) -> Self {
        let mut out = self.clone();
        out.invert();
        out
    }
}
