use super::Cell;

/// The eight (dx, dy) neighbor offsets. Every engine counts neighbors through this table.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Sum of live neighbors of the interior cell (x, y), no wrapping.
#[inline]
pub fn count_live_neighbors(x: usize, y: usize, width: usize, cells: &[Cell]) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .map(|&(dx, dy)| {
            let nx = x.wrapping_add_signed(dx);
            let ny = y.wrapping_add_signed(dy);
            cells[ny * width + nx].weight()
        })
        .sum()
}

/// Next state of interior cell (x, y) in a read-only generation.
///
/// The caller guarantees `1 <= x < width - 1` and `1 <= y < height - 1`.
/// Border cells are never passed here and stay dead.
#[inline]
pub fn next_state(x: usize, y: usize, width: usize, cells: &[Cell]) -> Cell {
    let neighbors = count_live_neighbors(x, y, width, cells);
    cells[y * width + x].evolve(neighbors)
}
