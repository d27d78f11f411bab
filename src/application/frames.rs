use crate::domain::Grid;

/// How much of the generation history a run keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Retention {
    /// Every generation, in order
    #[default]
    All,
    /// Only the most recent generation
    Latest,
}

/// Append-only record of completed generations.
/// Frame `i` holds generation `i + 1` when every frame is retained.
#[derive(Clone, Debug, Default)]
pub struct FrameCollector {
    retention: Retention,
    frames: Vec<Grid>,
    generations: usize,
}

impl FrameCollector {
    pub fn new(retention: Retention) -> Self {
        Self {
            retention,
            frames: Vec::new(),
            generations: 0,
        }
    }

    pub fn with_capacity(retention: Retention, iterations: usize) -> Self {
        let capacity = match retention {
            Retention::All => iterations,
            Retention::Latest => 1,
        };
        Self {
            retention,
            frames: Vec::with_capacity(capacity),
            generations: 0,
        }
    }

    pub fn record(&mut self, generation: &Grid) {
        match self.retention {
            Retention::All => self.frames.push(generation.clone()),
            Retention::Latest => match self.frames.first_mut() {
                Some(last) => last.clone_from(generation),
                None => self.frames.push(generation.clone()),
            },
        }
        self.generations += 1;
    }

    /// Number of generations recorded, retained or not
    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn frames(&self) -> &[Grid] {
        &self.frames
    }

    pub fn latest(&self) -> Option<&Grid> {
        self.frames.last()
    }

    pub fn into_frames(self) -> Vec<Grid> {
        self.frames
    }
}
