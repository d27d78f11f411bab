//! Row-partitioned evolution on the device's rayon pool.
//!
//! Each worker owns whole rows of the output buffer and sweeps them in order.

use super::engine::{StepEngine, assert_same_dimensions};
use super::{Grid, next_state};
use crate::device::Device;
use rayon::prelude::*;

#[derive(Clone, Debug)]
pub struct SequentialEngine {
    device: Device,
}

impl SequentialEngine {
    pub fn new(device: Device) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

impl Default for SequentialEngine {
    fn default() -> Self {
        Self::new(Device::global())
    }
}

impl StepEngine for SequentialEngine {
    fn name(&self) -> &'static str {
        "Sequential"
    }

    fn step(&self, previous: &Grid, current: &mut Grid) {
        assert_same_dimensions(previous, current);
        let (width, height) = previous.dimensions();
        let cells = previous.cells();
        let rows = current.cells_mut();

        self.device.run_on(|| {
            rows.par_chunks_mut(width)
                .enumerate()
                .skip(1)
                .take(height - 2)
                .for_each(|(y, row)| {
                    for x in 1..width - 1 {
                        row[x] = next_state(x, y, width, cells);
                    }
                });
        });
    }
}
