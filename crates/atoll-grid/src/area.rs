use crate::Grid;

/// Label of a cell that belongs to no ground region.
pub const NO_REGION: u32 = 0;

/// Per-cell region labels, same dimensions and layout as the [`Grid`] they were computed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaMap {
    width: usize,
    height: usize,
    labels: Vec<u32>,
}

impl AreaMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            labels: vec![NO_REGION; width * height],
        }
    }

    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.width(), grid.height())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.labels[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, label: u32) {
        let i = self.idx(x, y);
        self.labels[i] = label;
    }

    #[inline]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Labels every cell in `cells` (linear indices) with `label`.
    pub fn assign(&mut self, cells: &[usize], label: u32) {
        for &i in cells {
            self.labels[i] = label;
        }
    }

    /// Whether the label buffer lines up with `grid` cell for cell.
    pub fn matches(&self, grid: &Grid) -> bool {
        self.width == grid.width() && self.height == grid.height()
    }
}

/// Cell count per region; index 0 is the unused background slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaCounts(Vec<usize>);

impl AreaCounts {
    pub fn new() -> Self {
        Self(vec![0])
    }

    /// Registers a new region with `cells` cells and returns its id.
    pub fn push(&mut self, cells: usize) -> u32 {
        self.0.push(cells);
        (self.0.len() - 1) as u32
    }

    /// Number of discovered regions (`K`).
    #[inline]
    pub fn region_count(&self) -> usize {
        self.0.len() - 1
    }

    #[inline]
    pub fn get(&self, id: u32) -> usize {
        self.0.get(id as usize).copied().unwrap_or(0)
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn total(&self) -> usize {
        self.0[1..].iter().sum()
    }

    /// Region id with the most cells. Ties go to the first-discovered id.
    pub fn largest(&self) -> Option<u32> {
        let mut best: Option<(u32, usize)> = None;
        for (id, &count) in self.0.iter().enumerate().skip(1) {
            match best {
                Some((_, c)) if count <= c => {}
                _ => best = Some((id as u32, count)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// `(id, count)` for every region, ascending by id.
    pub fn regions(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.0
            .iter()
            .enumerate()
            .skip(1)
            .map(|(id, c)| (id as u32, *c))
    }
}

impl Default for AreaCounts {
    fn default() -> Self {
        Self::new()
    }
}
