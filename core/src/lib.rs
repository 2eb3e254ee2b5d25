#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use color::*;
pub use error::*;
pub use generator::*;
pub use progression::*;
pub use session::*;
pub use types::*;

mod board;
mod color;
mod error;
mod generator;
mod progression;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
}

impl BoardConfig {
    /// Board size of the standard game.
    pub const DEFAULT_SIZE: Coord2 = (30, 30);

    pub const fn new_unchecked(size: Coord2) -> Self {
        Self { size }
    }

    pub fn new((size_x, size_y): Coord2) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        Self::new_unchecked((size_x, size_y))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE)
    }
}
