use serde::{Deserialize, Serialize};

/// One grid position as stored by the board.
///
/// A cell is never open and flagged at the same time, `adjacent_mines` is
/// meaningful only once placement has run, and stays 0 for mine cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) open: bool,
    pub(crate) flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn is_open(self) -> bool {
        self.open
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Player-visible view of this cell.
    pub const fn state(self) -> CellState {
        match (self.open, self.mine, self.flagged) {
            (true, true, _) => CellState::OpenMine,
            (true, false, _) => CellState::OpenNumber(self.adjacent_mines),
            (false, _, true) => CellState::CoveredFlagged,
            (false, _, false) => CellState::Covered,
        }
    }
}

/// Canonical player-visible state exposed to a presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Covered,
    CoveredFlagged,
    OpenMine,
    OpenNumber(u8),
}
