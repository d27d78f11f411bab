use super::Cell;
use super::error::{LifeError, Result};
use rand::Rng;

/// Smallest edge that still leaves one interior cell.
pub const MIN_EDGE: usize = 3;

/// Grid holds one generation as a flat row-major cell buffer.
/// The length is fixed at construction and never changes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Fail fast on grids without an interior.
pub fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width < MIN_EDGE || height < MIN_EDGE {
        return Err(LifeError::InvalidDimensions { width, height });
    }
    Ok(())
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        })
    }

    /// Wrap an existing row-major buffer, checking its length.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width * height;
        if cells.len() != expected {
            return Err(LifeError::DimensionMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    /// Every cell, border included, is alive with probability 0.5.
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        grid.cells
            .iter_mut()
            .for_each(|cell| *cell = Cell::from(rng.random_bool(0.5)));
        Ok(grid)
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells the rule is ever evaluated on
    pub const fn interior_len(&self) -> usize {
        (self.width - 2) * (self.height - 2)
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub const fn is_interior(&self, x: usize, y: usize) -> bool {
        x > 0 && y > 0 && x < self.width - 1 && y < self.height - 1
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[self.index(x, y)])
    }

    /// Set cell at position; out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Kill every cell on the outermost ring.
    pub fn clear_border(&mut self) {
        let (w, h) = (self.width, self.height);
        self.cells[..w].fill(Cell::Dead);
        self.cells[(h - 1) * w..].fill(Cell::Dead);
        for y in 1..h - 1 {
            self.cells[y * w] = Cell::Dead;
            self.cells[y * w + w - 1] = Cell::Dead;
        }
    }

    pub fn border_is_dead(&self) -> bool {
        self.iter_cells()
            .filter(|&(x, y, _)| !self.is_interior(x, y))
            .all(|(_, _, cell)| !cell.is_alive())
    }

    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % width, i / width, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rejects_grids_without_interior() {
        assert_eq!(
            Grid::new(2, 5),
            Err(LifeError::InvalidDimensions { width: 2, height: 5 })
        );
        assert!(Grid::new(5, 2).is_err());
        assert!(Grid::new(3, 3).is_ok());
    }

    #[test]
    fn test_from_cells_checks_length() {
        let err = Grid::from_cells(4, 4, vec![Cell::Dead; 15]).unwrap_err();
        assert_eq!(err, LifeError::DimensionMismatch { expected: 16, actual: 15 });
    }

    #[test]
    fn test_row_major_indexing() {
        let mut grid = Grid::new(5, 4).unwrap();
        grid.set(3, 2, Cell::Alive);
        assert_eq!(grid.cells()[2 * 5 + 3], Cell::Alive);
        assert_eq!(grid.get(3, 2), Some(Cell::Alive));
        assert_eq!(grid.get(5, 0), None);
    }

    #[test]
    fn test_random_is_seed_reproducible() {
        let a = Grid::random(32, 16, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = Grid::random(32, 16, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        // Roughly half alive
        let alive = a.count_alive();
        assert!(alive > 32 * 16 / 4 && alive < 32 * 16 * 3 / 4, "alive = {alive}");
    }

    #[test]
    fn test_clear_border() {
        let mut grid = Grid::from_cells(4, 3, vec![Cell::Alive; 12]).unwrap();
        assert!(!grid.border_is_dead());
        grid.clear_border();
        assert!(grid.border_is_dead());
        assert_eq!(grid.count_alive(), 2);
        assert_eq!(grid.get(1, 1), Some(Cell::Alive));
        assert_eq!(grid.get(2, 1), Some(Cell::Alive));
    }
}
