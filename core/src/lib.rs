//! Minesweeper board engine.
//!
//! The crate holds the grid data model, deferred mine placement, flood-fill
//! reveal, flag and chord interactions, and win/loss evaluation. There is no
//! rendering, input handling, or timing here; a presentation layer drives the
//! four mutators ([`Board::reveal`], [`Board::toggle_flag`], [`Board::chord`],
//! [`Board::reset`]) and polls [`Board::status`] and [`Board::cell_state`]
//! after each call.
//!
//! Mines are placed on the first reveal, never at construction, so the first
//! clicked cell and its whole neighborhood are always mine-free.
//!
//! ```
//! use minado_core::{Board, GameError, GameStatus};
//!
//! let mut board = Board::new(9, 9, 10)?;
//! board.reveal((4, 4));
//! assert_ne!(board.status(), GameStatus::Lost);
//! # Ok::<(), GameError>(())
//! ```

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use grid::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod grid;
mod placement;
mod types;

/// First-click cell plus its Moore neighborhood, kept mine-free by placement.
const SAFE_REGION_CELLS: CellCount = 9;

/// Validated board dimensions and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    /// Rejects configurations that cannot host a mine-free first-click
    /// neighborhood: boards smaller than 3x3, zero mines, or more mines than
    /// `width * height - 9`.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width < 3 || height < 3 {
            return Err(GameError::InvalidConfiguration);
        }
        let total = mult(width, height);
        if mines < 1 || mines > total.saturating_sub(SAFE_REGION_CELLS) {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self::new_unchecked(width, height, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Number of cells that must be opened to win.
    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }
}
