// Domain layer - Cells, grids, the rule and the step engines
pub mod domain;

// Application layer - Run configuration and orchestration
pub mod application;

// Infrastructure layer - Execution device, rendering, input
pub mod device;
pub mod rendering;
pub mod input;
pub mod cli;

// Re-exports for convenience
pub use domain::{Cell, EngineKind, Grid, LifeError, Pattern, Result, StepEngine, presets};
pub use application::{CancelToken, FrameCollector, Retention, RunState, Simulation, SimulationConfig, run};
pub use device::{Device, DeviceSelector};
