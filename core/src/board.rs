use core::ops::BitOr;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
/// - any -> InProgress (full reset only)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One-time mine placement lifecycle. The transition to `Done` happens on the
/// first successful reveal and is never reversed except by a full reset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum Placement {
    Deferred,
    Done,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Toggled,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Toggled)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Opened,
    Exploded,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Used to merge per-neighbor outcomes when chording.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (Exploded, _) => Exploded,
            (_, Exploded) => Exploded,
            (Won, _) => Won,
            (_, Won) => Won,
            (Opened, _) => Opened,
            (_, Opened) => Opened,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// The board engine: grid state, deferred mine placement, reveal with flood
/// fill, flag toggling, chording, and win/loss evaluation.
///
/// The board exclusively owns its cells and performs no I/O; a presentation
/// layer calls the four mutators and reads state back through the queries.
/// Out-of-bounds coordinates, repeated reveals, and moves after the game has
/// ended are silent no-ops, reported as `NoChange`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    grid: Grid,
    placement: Placement,
    opened_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
    seed: u64,
}

impl Board {
    /// Creates a board with all cells covered and mine placement deferred to
    /// the first reveal.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Ok(Self::from_config(BoardConfig::new(width, height, mines)?))
    }

    /// Like [`Board::new`] but with a fixed placement seed, so the mine
    /// layout is reproducible for a given first click.
    pub fn with_seed(width: Coord, height: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let mut board = Self::new(width, height, mines)?;
        board.seed = seed;
        Ok(board)
    }

    pub fn from_config(config: BoardConfig) -> Self {
        Self {
            grid: Grid::new(config.width, config.height),
            config,
            placement: Placement::Deferred,
            opened_count: 0,
            flagged_count: 0,
            status: GameStatus::InProgress,
            triggered_mine: None,
            seed: rand::random(),
        }
    }

    /// Builds a board with an explicit, already placed mine layout.
    ///
    /// Skips deferred placement entirely; the first reveal may hit a mine.
    /// The layout must satisfy the usual configuration limits and must not
    /// repeat coordinates.
    pub fn with_mines(width: Coord, height: Coord, mines: &[Coord2]) -> Result<Self> {
        let config = BoardConfig::new(width, height, mines.len() as CellCount)?;
        let mut board = Self::from_config(config);

        for &coords in mines {
            let cell = board.grid.get_mut(coords)?;
            if cell.mine {
                return Err(GameError::InvalidConfiguration);
            }
            cell.mine = true;
        }

        placement::compute_adjacency(&mut board.grid);
        board.placement = Placement::Done;
        Ok(board)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn opened_count(&self) -> CellCount {
        self.opened_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags placed; negative when over-flagged. Presentation
    /// clamps to zero for display.
    pub fn remaining_mine_estimate(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flagged_count)
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        self.grid.get(coords).map(|cell| cell.state())
    }

    /// Read-only view of the whole grid, for rendering.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn has_mine_at(&self, coords: Coord2) -> Result<bool> {
        Ok(self.grid.get(coords)?.mine)
    }

    /// Whether mine placement has happened yet.
    pub fn is_placed(&self) -> bool {
        matches!(self.placement, Placement::Done)
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Opens a cell. The first successful reveal places the mines with the
    /// target and its whole neighborhood guaranteed safe; later reveals of a
    /// zero-adjacency cell flood-fill its region and numbered border.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        if self.status.is_finished() {
            return NoChange;
        }
        let Ok(&cell) = self.grid.get(coords) else {
            return NoChange;
        };
        if cell.open || cell.flagged {
            return NoChange;
        }

        if matches!(self.placement, Placement::Deferred) {
            placement::place_mines(&mut self.grid, coords, self.config.mines, self.seed);
            self.placement = Placement::Done;
        }

        if self.grid[coords].mine {
            self.triggered_mine = Some(coords);
            self.finish_lost();
            return Exploded;
        }

        self.flood_fill(coords);

        if self.opened_count == self.config.safe_cell_count() {
            self.finish_won();
            Won
        } else {
            Opened
        }
    }

    /// Inverts the flag on a covered cell. Open cells, out-of-bounds
    /// coordinates, and finished games are no-ops.
    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        use FlagOutcome::*;

        if self.status.is_finished() {
            return NoChange;
        }
        let Ok(cell) = self.grid.get_mut(coords) else {
            return NoChange;
        };
        if cell.open {
            return NoChange;
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Toggled
    }

    /// Reveals every covered, unflagged neighbor of an open numbered cell
    /// when its flagged-neighbor count matches its number. Flags are trusted
    /// by position, so a misplaced flag can lose the game here.
    pub fn chord(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        if self.status.is_finished() {
            return NoChange;
        }
        let Ok(&cell) = self.grid.get(coords) else {
            return NoChange;
        };
        if !cell.open || cell.adjacent_mines == 0 {
            return NoChange;
        }

        let flagged_neighbors = self
            .grid
            .neighbors(coords)
            .filter(|&pos| self.grid[pos].flagged)
            .count() as u8;
        if flagged_neighbors != cell.adjacent_mines {
            return NoChange;
        }

        self.grid
            .neighbors(coords)
            .map(|pos| self.reveal(pos))
            .reduce(BitOr::bitor)
            .unwrap_or(NoChange)
    }

    /// Returns the board to its construction-time state: all cells covered
    /// and unflagged, placement deferred again with a fresh seed.
    pub fn reset(&mut self) {
        log::debug!("resetting board {:?}", self.config);
        *self = Self::from_config(self.config);
    }

    fn flood_fill(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit) = to_visit.pop_front() {
            let cell = self.grid[visit];
            if cell.open || cell.flagged {
                continue;
            }
            self.grid[visit].open = true;
            self.opened_count += 1;
            log::trace!("opened {:?}, adjacent mines: {}", visit, cell.adjacent_mines);

            if cell.adjacent_mines == 0 {
                // flag state is rechecked at pop time, not here
                to_visit.extend(self.grid.neighbors(visit).filter(|&pos| {
                    let neighbor = self.grid[pos];
                    !neighbor.open && !neighbor.mine
                }));
            }
        }
    }

    fn finish_lost(&mut self) {
        self.status = GameStatus::Lost;
        // force-open every mine for display; a flag on a mine is dropped so a
        // cell is never open and flagged at once, flags elsewhere stay put
        for cell in self.grid.iter_mut() {
            if cell.mine && !cell.open {
                cell.open = true;
                self.opened_count += 1;
                if cell.flagged {
                    cell.flagged = false;
                    self.flagged_count -= 1;
                }
            }
        }
        log::debug!("mine hit at {:?}", self.triggered_mine);
    }

    fn finish_won(&mut self) {
        self.status = GameStatus::Won;
        // flag leftover mines for display; this never goes through toggle_flag
        for cell in self.grid.iter_mut() {
            if cell.mine && !cell.flagged {
                cell.flagged = true;
                self.flagged_count += 1;
            }
        }
        log::debug!("all {} safe cells opened", self.opened_count);
    }
}
