//! One device work unit per interior cell.

use super::engine::{StepEngine, assert_same_dimensions};
use super::{Grid, next_state};
use crate::device::{CellWriter, Device};

#[derive(Clone, Debug)]
pub struct FlatParallelEngine {
    device: Device,
}

impl FlatParallelEngine {
    pub fn new(device: Device) -> Self {
        Self { device }
    }
}

/// Map a linear interior index to its grid coordinates.
#[inline]
pub const fn interior_coords(index: usize, width: usize) -> (usize, usize) {
    let inner = width - 2;
    (index % inner + 1, index / inner + 1)
}

impl StepEngine for FlatParallelEngine {
    fn name(&self) -> &'static str {
        "FlatParallel"
    }

    fn step(&self, previous: &Grid, current: &mut Grid) {
        assert_same_dimensions(previous, current);
        let width = previous.width();
        let count = previous.interior_len();
        let cells = previous.cells();
        let writer = CellWriter::new(current.cells_mut());

        self.device.dispatch(count, |i| {
            let (x, y) = interior_coords(i, width);
            let next = next_state(x, y, width, cells);
            // SAFETY: interior_coords is injective over 0..count, so every unit
            // writes its own cell.
            unsafe { writer.write(y * width + x, next) };
        });
    }
}
