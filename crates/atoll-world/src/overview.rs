use atoll_grid::{AreaMap, Grid, NO_REGION};

const EMPTY_RGB: [u8; 3] = [28, 64, 120];
const GROUND_RGB: [u8; 3] = [196, 176, 120];

/// Packed RGB8 rendering of a grid; pixel `(x, y)` is cell `(x, y)`.
#[derive(Clone, Debug)]
pub struct MapOverviewImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl MapOverviewImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let idx = (y * self.width + x) * 3;
        self.data[idx..idx + 3].copy_from_slice(&rgb);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * self.width + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

pub fn render_cells(grid: &Grid) -> MapOverviewImage {
    let mut image = MapOverviewImage::new(grid.width(), grid.height());
    for (x, y, status) in grid.iter() {
        image.put_pixel(x, y, if status.is_ground() { GROUND_RGB } else { EMPTY_RGB });
    }
    image
}

/// Ground cells take a stable color per region id; unlabeled ground keeps the plain ground color.
pub fn render_regions(grid: &Grid, areas: &AreaMap) -> MapOverviewImage {
    let mut image = MapOverviewImage::new(grid.width(), grid.height());
    let labeled = areas.matches(grid);
    for (x, y, status) in grid.iter() {
        let color = if !status.is_ground() {
            EMPTY_RGB
        } else {
            match if labeled { areas.get(x, y) } else { NO_REGION } {
                NO_REGION => GROUND_RGB,
                id => hash_color(id),
            }
        };
        image.put_pixel(x, y, color);
    }
    image
}

fn hash_color(id: u32) -> [u8; 3] {
    let mut hash = 0x811c_9dc5u32;
    for b in id.to_le_bytes() {
        hash = (hash ^ u32::from(b)).wrapping_mul(0x0100_0193);
    }
    // Keep region colors away from the dark water tone.
    [
        (hash & 0xFF) as u8 | 0x40,
        ((hash >> 8) & 0xFF) as u8 | 0x40,
        ((hash >> 16) & 0xFF) as u8 | 0x40,
    ]
}
