//! Workgroup-tiled evolution.
//!
//! The full grid is covered by square tiles of `edge` cells. Each tile is
//! one dispatch group of `edge * edge` workers, and worker `(lx, ly)` owns
//! exactly one cell of its tile. Tiles overlapping the border skip their
//! border cells individually.
//!
//! Tile counts round up and the last tile on each axis is clamped to the
//! grid, so dimensions that `edge` does not divide are still fully evaluated.

use super::engine::{StepEngine, assert_same_dimensions};
use super::error::{LifeError, Result};
use super::{Grid, next_state};
use crate::device::{CellWriter, Device};

#[derive(Clone, Debug)]
pub struct TiledEngine {
    device: Device,
    edge: usize,
}

/// Placement of tiles over a grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileLayout {
    pub edge: usize,
    pub tiles_x: usize,
    pub tiles_y: usize,
}

impl TileLayout {
    pub fn new(width: usize, height: usize, edge: usize) -> Result<Self> {
        if edge == 0 {
            return Err(LifeError::InvalidTileEdge(edge));
        }
        Ok(Self::covering(width, height, edge))
    }

    /// `edge` must be non-zero.
    const fn covering(width: usize, height: usize, edge: usize) -> Self {
        Self {
            edge,
            tiles_x: width.div_ceil(edge),
            tiles_y: height.div_ceil(edge),
        }
    }

    pub const fn tile_count(&self) -> usize {
        self.tiles_x * self.tiles_y
    }

    pub const fn group_size(&self) -> usize {
        self.edge * self.edge
    }

    /// Global coordinates of worker `local` in tile `tile`. May fall past the
    /// grid on the clamped last row or column of tiles.
    #[inline]
    pub const fn cell_of(&self, tile: usize, local: usize) -> (usize, usize) {
        let tx = tile % self.tiles_x;
        let ty = tile / self.tiles_x;
        (tx * self.edge + local % self.edge, ty * self.edge + local / self.edge)
    }
}

impl TiledEngine {
    pub fn new(device: Device, edge: usize) -> Result<Self> {
        if edge == 0 {
            return Err(LifeError::InvalidTileEdge(edge));
        }
        Ok(Self { device, edge })
    }

    pub fn edge(&self) -> usize {
        self.edge
    }
}

impl StepEngine for TiledEngine {
    fn name(&self) -> &'static str {
        "Tiled"
    }

    fn step(&self, previous: &Grid, current: &mut Grid) {
        assert_same_dimensions(previous, current);
        let (width, height) = previous.dimensions();
        let layout = TileLayout::covering(width, height, self.edge);
        let cells = previous.cells();
        let writer = CellWriter::new(current.cells_mut());

        self.device
            .dispatch_groups(layout.tile_count(), layout.group_size(), |tile, local| {
                let (x, y) = layout.cell_of(tile, local);
                if x > 0 && x < width - 1 && y > 0 && y < height - 1 {
                    let next = next_state(x, y, width, cells);
                    // SAFETY: tiles are disjoint and each worker maps to a distinct
                    // cell within its tile.
                    unsafe { writer.write(y * width + x, next) };
                }
            });
    }
}
