//! Step engine contract and engine selection.
//!
//! Every engine derives one generation from the previous one through the
//! same rule and neighbor table. They differ only in how the interior is
//! split into parallel work.

use super::error::{LifeError, Result};
use super::{Grid, flat_parallel::FlatParallelEngine, sequential::SequentialEngine, tiled::TiledEngine};
use crate::device::Device;

/// Tile edge used when none is configured.
pub const DEFAULT_TILE_EDGE: usize = 4;

/// One generation step over a double buffer.
pub trait StepEngine: Send + Sync {
    /// Display name for logs and benchmark tables
    fn name(&self) -> &'static str;

    /// Write the next generation of `previous` into the interior of `current`.
    ///
    /// Only interior cells of `current` are written, and `previous` is never
    /// modified.
    ///
    /// # Panics
    /// If `previous` and `current` differ in dimensions.
    fn step(&self, previous: &Grid, current: &mut Grid);
}

/// Precondition shared by every [`StepEngine::step`].
#[inline]
pub(crate) fn assert_same_dimensions(previous: &Grid, current: &Grid) {
    assert_eq!(
        previous.dimensions(),
        current.dimensions(),
        "previous and current generations must have the same dimensions"
    );
}

/// Available step engines, from coarsest to finest dispatch granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// One host worker per row
    #[default]
    Sequential,
    /// One device work unit per interior cell
    FlatParallel,
    /// Square tiles, one cooperative worker group per tile
    Tiled { tile_edge: usize },
}

impl EngineKind {
    pub fn all(tile_edge: usize) -> Vec<EngineKind> {
        vec![
            EngineKind::Sequential,
            EngineKind::FlatParallel,
            EngineKind::Tiled { tile_edge },
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::Sequential => "Sequential",
            EngineKind::FlatParallel => "FlatParallel",
            EngineKind::Tiled { .. } => "Tiled",
        }
    }

    /// Build the engine on `device`.
    pub fn build(self, device: &Device) -> Result<Box<dyn StepEngine>> {
        Ok(match self {
            EngineKind::Sequential => Box::new(SequentialEngine::new(device.clone())),
            EngineKind::FlatParallel => Box::new(FlatParallelEngine::new(device.clone())),
            EngineKind::Tiled { tile_edge } => {
                Box::new(TiledEngine::new(device.clone(), tile_edge)?)
            }
        })
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match *self {
            EngineKind::Tiled { tile_edge: 0 } => Err(LifeError::InvalidTileEdge(0)),
            _ => Ok(()),
        }
    }
}
