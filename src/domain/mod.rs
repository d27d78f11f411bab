mod cell;
mod error;
mod grid;
mod patterns;
mod engine;
pub mod rules;
pub mod sequential;
pub mod flat_parallel;
pub mod tiled;

pub use cell::Cell;
pub use error::{LifeError, Result};
pub use grid::{Grid, MIN_EDGE, check_dimensions};
pub use patterns::{Pattern, presets};
pub use rules::{NEIGHBOR_OFFSETS, next_state};
pub use engine::{DEFAULT_TILE_EDGE, EngineKind, StepEngine};
pub use sequential::SequentialEngine;
pub use flat_parallel::FlatParallelEngine;
pub use tiled::{TileLayout, TiledEngine};
