//! Command-line plumbing shared by the viewer and the benchmark.

use clap::{Args, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::application::{Retention, SimulationConfig};
use crate::device::DeviceSelector;
use crate::domain::{DEFAULT_TILE_EDGE, EngineKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineChoice {
    Sequential,
    Flat,
    Tiled,
}

/// Grid and device flags
#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    #[arg(long, default_value_t = 1920)]
    pub width: usize,

    #[arg(long, default_value_t = 1080)]
    pub height: usize,

    /// Number of generations to compute
    #[arg(long, default_value_t = 1000)]
    pub iterations: usize,

    /// Seed for the random initial grid (entropy when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dedicated device pool size (global rayon pool when omitted)
    #[arg(long)]
    pub threads: Option<usize>,

    #[arg(long, default_value_t = DEFAULT_TILE_EDGE)]
    pub tile_edge: usize,
}

impl RunArgs {
    pub fn engine_kind(&self, choice: EngineChoice) -> EngineKind {
        match choice {
            EngineChoice::Sequential => EngineKind::Sequential,
            EngineChoice::Flat => EngineKind::FlatParallel,
            EngineChoice::Tiled => EngineKind::Tiled { tile_edge: self.tile_edge },
        }
    }

    pub fn device_selector(&self) -> DeviceSelector {
        self.threads.map_or(DeviceSelector::Global, DeviceSelector::Threads)
    }

    pub fn to_config(&self, choice: EngineChoice, retention: Retention) -> SimulationConfig {
        let config = SimulationConfig::default()
            .dimensions(self.width, self.height)
            .iterations(self.iterations)
            .engine(self.engine_kind(choice))
            .device(self.device_selector())
            .retention(retention);
        match self.seed {
            Some(seed) => config.seed(seed),
            None => config,
        }
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
