mod config;
mod frames;
mod simulation;

pub use config::SimulationConfig;
pub use frames::{FrameCollector, Retention};
pub use simulation::{CancelToken, RunState, Simulation, run};
