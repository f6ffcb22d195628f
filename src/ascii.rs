//! Plain-text map dump: one line per grid row, `#` for ground and `~` for empty.

use atoll_grid::{CellStatus, Grid};

pub const GROUND_CHAR: char = '#';
pub const EMPTY_CHAR: char = '~';

pub fn cell_to_char(status: CellStatus) -> char {
    match status {
        CellStatus::Ground => GROUND_CHAR,
        CellStatus::Empty => EMPTY_CHAR,
    }
}

/// Renders rows top to bottom (`y = 0` first). Every row ends with a newline.
pub fn render(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.push(cell_to_char(grid.get(x, y)));
        }
        out.push('\n');
    }
    out
}
