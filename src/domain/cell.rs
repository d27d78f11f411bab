/// Cell represents the fundamental unit in Conway's Game of Life.
/// Each cell can be either Dead or Alive, stored as a single byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Numeric weight used when summing neighbors
    #[inline]
    pub const fn weight(self) -> u8 {
        self as u8
    }

    /// Pure function to compute the next state from the live neighbor count (B3/S23):
    /// fewer than 2 or more than 3 neighbors kills the cell, exactly 3 makes it
    /// alive, exactly 2 leaves it as it was.
    #[inline]
    pub const fn evolve(self, neighbors: u8) -> Self {
        match neighbors {
            3 => Cell::Alive,
            2 => self,
            _ => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}
