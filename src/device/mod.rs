//! Execution device shared by every step engine.
//!
//! A device dispatches one closure per index over a range and returns only
//! once every index has run. That return is the barrier between generations.

use std::marker::PhantomData;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::info;

use crate::domain::{Cell, LifeError, Result};

/// Which execution target to run dispatches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DeviceSelector {
    /// The process-wide rayon pool
    #[default]
    Global,
    /// A dedicated pool with exactly this many workers
    Threads(usize),
}

#[derive(Clone)]
pub struct Device {
    name: String,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device").field("name", &self.name).finish()
    }
}

impl Device {
    /// The process-wide rayon pool. Selecting it cannot fail.
    pub fn global() -> Self {
        Self {
            name: format!("host pool ({} threads)", rayon::current_num_threads()),
            pool: None,
        }
    }

    pub fn select(selector: DeviceSelector) -> Result<Self> {
        let device = match selector {
            DeviceSelector::Global => Self::global(),
            DeviceSelector::Threads(0) => {
                return Err(LifeError::DeviceUnavailable(
                    "a device needs at least one worker".to_owned(),
                ));
            }
            DeviceSelector::Threads(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("life-device-{i}"))
                    .build()
                    .map_err(|e| LifeError::DeviceUnavailable(e.to_string()))?;
                Self {
                    name: format!("dedicated pool ({n} threads)"),
                    pool: Some(Arc::new(pool)),
                }
            }
        };
        info!(device = %device.name, "Running on device");
        Ok(device)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_workers(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Run `op` inside this device's pool, so rayon work it spawns stays there.
    pub(crate) fn run_on<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Run `kernel(i)` for every `i` in `0..count` with no ordering guarantee.
    /// Blocks until all of them have finished.
    pub fn dispatch<F>(&self, count: usize, kernel: F)
    where
        F: Fn(usize) + Send + Sync,
    {
        self.run_on(|| (0..count).into_par_iter().for_each(&kernel));
    }

    /// Run `kernel(group, local)` for `groups` groups of `group_size` workers each.
    /// Blocks until every group has finished.
    pub fn dispatch_groups<F>(&self, groups: usize, group_size: usize, kernel: F)
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        self.run_on(|| {
            (0..groups).into_par_iter().for_each(|group| {
                (0..group_size)
                    .into_par_iter()
                    .for_each(|local| kernel(group, local));
            });
        });
    }
}

/// Write handle into a cell buffer shared by dispatched work units.
///
/// The buffer stays exclusively borrowed for `'a`, so nothing else can read
/// or write it while units run.
pub(crate) struct CellWriter<'a> {
    ptr: *mut Cell,
    len: usize,
    _buffer: PhantomData<&'a mut [Cell]>,
}

// SAFETY: units only ever write distinct indices (see `write`), and `Cell` is Copy.
unsafe impl Send for CellWriter<'_> {}
unsafe impl Sync for CellWriter<'_> {}

impl<'a> CellWriter<'a> {
    pub(crate) fn new(cells: &'a mut [Cell]) -> Self {
        Self {
            ptr: cells.as_mut_ptr(),
            len: cells.len(),
            _buffer: PhantomData,
        }
    }

    /// # Safety
    /// No two concurrent calls may pass the same `index`.
    #[inline]
    pub(crate) unsafe fn write(&self, index: usize, cell: Cell) {
        assert!(index < self.len, "cell index {index} out of bounds ({})", self.len);
        // SAFETY: in bounds, and the caller guarantees exclusive ownership of `index`.
        unsafe { self.ptr.add(index).write(cell) }
    }
}
