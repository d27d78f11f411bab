use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{debug, info, warn};

use super::{FrameCollector, Retention, SimulationConfig};
use crate::device::Device;
use crate::domain::{EngineKind, Grid, LifeError, Result, SequentialEngine, StepEngine, check_dimensions};

/// Lifecycle of a run. Generations complete atomically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Stepping { generation: usize },
    Done { generations: usize },
    Cancelled { generation: usize },
}

/// Shared flag for stopping a run between generations.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// The previous/current buffer pair.
struct DoubleBuffer {
    previous: Grid,
    current: Grid,
}

impl DoubleBuffer {
    fn new(initial: &Grid) -> Result<Self> {
        let (width, height) = initial.dimensions();
        Ok(Self {
            previous: initial.clone(),
            current: Grid::new(width, height)?,
        })
    }

    fn step(&mut self, engine: &dyn StepEngine) {
        engine.step(&self.previous, &mut self.current);
    }

    /// Promote `current` and recycle the old `previous` as the next write target.
    fn swap(&mut self) {
        mem::swap(&mut self.previous, &mut self.current);
        // Only the initial grid can carry a live border into the recycled buffer.
        self.current.clear_border();
    }

    fn latest(&self) -> &Grid {
        &self.previous
    }
}

/// Drives one engine over a fixed number of generations.
pub struct Simulation {
    engine: Box<dyn StepEngine>,
    retention: Retention,
    cancel: CancelToken,
    state: RunState,
}

impl Simulation {
    pub fn new(engine: Box<dyn StepEngine>) -> Self {
        Self {
            engine,
            retention: Retention::All,
            cancel: CancelToken::new(),
            state: RunState::Idle,
        }
    }

    /// Select the device and build the configured engine.
    ///
    /// When the device is unavailable and fallback is enabled, the sequential
    /// engine runs on the global pool instead.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let engine = match Device::select(config.device) {
            Ok(device) => config.engine.build(&device)?,
            Err(LifeError::DeviceUnavailable(reason)) if config.fallback_to_sequential => {
                warn!(%reason, engine = config.engine.name(), "Device unavailable, falling back to sequential engine");
                Box::new(SequentialEngine::default())
            }
            Err(e) => return Err(e),
        };
        Ok(Self::new(engine).with_retention(config.retention))
    }

    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Compute `iterations` generations from `initial` and return them in order.
    pub fn run(
        &mut self,
        width: usize,
        height: usize,
        iterations: usize,
        initial: &Grid,
    ) -> Result<Vec<Grid>> {
        self.run_collect(width, height, iterations, initial)
            .map(FrameCollector::into_frames)
    }

    pub fn run_collect(
        &mut self,
        width: usize,
        height: usize,
        iterations: usize,
        initial: &Grid,
    ) -> Result<FrameCollector> {
        check_dimensions(width, height)?;
        if initial.dimensions() != (width, height) {
            return Err(LifeError::DimensionMismatch {
                expected: width * height,
                actual: initial.cells().len(),
            });
        }

        self.state = RunState::Idle;
        let mut buffers = DoubleBuffer::new(initial)?;
        let mut frames = FrameCollector::with_capacity(self.retention, iterations);
        let start = Instant::now();

        for generation in 1..=iterations {
            if self.cancel.is_cancelled() {
                self.state = RunState::Cancelled { generation };
                warn!(generation, engine = self.engine.name(), "Run cancelled");
                return Err(LifeError::Cancelled { generation });
            }
            self.state = RunState::Stepping { generation };
            buffers.step(self.engine.as_ref());
            buffers.swap();
            frames.record(buffers.latest());
            debug!(generation, "Generation complete");
        }

        self.state = RunState::Done { generations: iterations };
        info!(
            engine = self.engine.name(),
            width,
            height,
            iterations,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Run complete"
        );
        Ok(frames)
    }
}

/// Run `kind` on `device` without building a [`Simulation`] by hand.
pub fn run(
    kind: EngineKind,
    device: &Device,
    width: usize,
    height: usize,
    iterations: usize,
    initial: &Grid,
) -> Result<Vec<Grid>> {
    Simulation::new(kind.build(device)?).run(width, height, iterations, initial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceSelector;
    use crate::domain::{Cell, presets};

    fn sequential() -> Simulation {
        Simulation::new(Box::new(SequentialEngine::default()))
    }

    #[test]
    fn test_state_transitions() {
        let mut sim = sequential();
        assert_eq!(sim.state(), RunState::Idle);
        let grid = Grid::new(5, 5).unwrap();
        sim.run(5, 5, 3, &grid).unwrap();
        assert_eq!(sim.state(), RunState::Done { generations: 3 });
    }

    #[test]
    fn test_zero_iterations_yield_no_frames() {
        let grid = Grid::new(5, 5).unwrap();
        assert!(sequential().run(5, 5, 0, &grid).unwrap().is_empty());
    }

    #[test]
    fn test_mismatched_initial_grid() {
        let grid = Grid::new(6, 5).unwrap();
        assert_eq!(
            sequential().run(5, 5, 1, &grid),
            Err(LifeError::DimensionMismatch { expected: 25, actual: 30 })
        );
    }

    #[test]
    fn test_invalid_dimensions_fail_fast() {
        let grid = Grid::new(5, 5).unwrap();
        assert_eq!(
            sequential().run(2, 5, 1, &grid),
            Err(LifeError::InvalidDimensions { width: 2, height: 5 })
        );
    }

    #[test]
    fn test_cancelled_before_start() {
        let mut sim = sequential();
        sim.cancel_token().cancel();
        let grid = Grid::new(5, 5).unwrap();
        assert_eq!(sim.run(5, 5, 4, &grid), Err(LifeError::Cancelled { generation: 1 }));
        assert_eq!(sim.state(), RunState::Cancelled { generation: 1 });
    }

    /// Cancels its token once the first generation has been written.
    struct CancelAfterFirstStep {
        inner: SequentialEngine,
        cancel: CancelToken,
    }

    impl StepEngine for CancelAfterFirstStep {
        fn name(&self) -> &'static str {
            "CancelAfterFirstStep"
        }

        fn step(&self, previous: &Grid, current: &mut Grid) {
            self.inner.step(previous, current);
            self.cancel.cancel();
        }
    }

    #[test]
    fn test_cancelled_between_generations() {
        let cancel = CancelToken::new();
        let engine = CancelAfterFirstStep {
            inner: SequentialEngine::default(),
            cancel: cancel.clone(),
        };
        let mut sim = Simulation::new(Box::new(engine)).with_cancel_token(cancel);
        let mut grid = Grid::new(5, 5).unwrap();
        presets::blinker().place_on(&mut grid, 1, 1);

        assert_eq!(sim.run(5, 5, 5, &grid), Err(LifeError::Cancelled { generation: 2 }));
        assert_eq!(sim.state(), RunState::Cancelled { generation: 2 });
    }

    #[test]
    fn test_live_initial_border_dies() {
        let initial = Grid::from_cells(6, 6, vec![Cell::Alive; 36]).unwrap();
        let frames = sequential().run(6, 6, 4, &initial).unwrap();
        assert!(frames.iter().all(Grid::border_is_dead));
    }

    #[test]
    fn test_latest_retention() {
        let mut grid = Grid::new(5, 5).unwrap();
        presets::blinker().place_on(&mut grid, 1, 1);
        let mut sim = sequential().with_retention(Retention::Latest);
        let collector = sim.run_collect(5, 5, 3, &grid).unwrap();
        assert_eq!(collector.generations(), 3);
        assert_eq!(collector.frames().len(), 1);
        // Odd generation of a blinker is vertical
        assert_eq!(collector.latest().and_then(|g| g.get(2, 1)), Some(Cell::Alive));
    }

    #[test]
    fn test_fallback_on_unavailable_device() {
        let config = SimulationConfig::default()
            .dimensions(8, 8)
            .engine(EngineKind::Tiled { tile_edge: 4 })
            .device(DeviceSelector::Threads(0))
            .seed(17);
        let mut sim = Simulation::from_config(&config).unwrap();
        assert_eq!(sim.engine_name(), "Sequential");

        let initial = Grid::random(8, 8, &mut config.rng()).unwrap();
        let frames = sim.run(8, 8, 3, &initial).unwrap();
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(Grid::border_is_dead));
        assert_eq!(sim.state(), RunState::Done { generations: 3 });

        let expected = sequential().run(8, 8, 3, &initial).unwrap();
        assert_eq!(frames, expected);

        let strict = config.fallback_to_sequential(false);
        assert!(matches!(
            Simulation::from_config(&strict),
            Err(LifeError::DeviceUnavailable(_))
        ));
    }

    #[test]
    fn test_free_run_function() {
        let device = Device::select(DeviceSelector::Global).unwrap();
        let grid = Grid::new(5, 5).unwrap();
        let frames = run(EngineKind::Tiled { tile_edge: 2 }, &device, 5, 5, 2, &grid).unwrap();
        assert_eq!(frames.len(), 2);
    }
}
