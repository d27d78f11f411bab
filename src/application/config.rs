use rand::SeedableRng;
use rand::rngs::StdRng;

use super::Retention;
use crate::device::DeviceSelector;
use crate::domain::{DEFAULT_TILE_EDGE, EngineKind, Grid, Result, check_dimensions};

/// Full description of one simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    pub iterations: usize,
    pub engine: EngineKind,
    pub device: DeviceSelector,
    /// Seed for the initial grid. `None` draws one from entropy.
    pub seed: Option<u64>,
    pub retention: Retention,
    /// Run the sequential engine if the device cannot be selected
    pub fallback_to_sequential: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            iterations: 1000,
            engine: EngineKind::FlatParallel,
            device: DeviceSelector::Global,
            seed: None,
            retention: Retention::All,
            fallback_to_sequential: true,
        }
    }
}

impl SimulationConfig {
    pub fn dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn engine(mut self, engine: EngineKind) -> Self {
        self.engine = engine;
        self
    }

    pub fn device(mut self, device: DeviceSelector) -> Self {
        self.device = device;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    pub fn fallback_to_sequential(mut self, enabled: bool) -> Self {
        self.fallback_to_sequential = enabled;
        self
    }

    /// Check everything that can be rejected before an engine starts.
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.width, self.height)?;
        self.engine.validate()
    }

    /// Generator used for the initial grid.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Random initial grid of the configured size.
    pub fn initial_grid(&self) -> Result<Grid> {
        Grid::random(self.width, self.height, &mut self.rng())
    }
}
