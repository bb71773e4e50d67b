use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{Cell, CellCount, Coord, Coord2, GameError, NeighborIter, Result};

/// Bounds-checked two-dimensional cell storage, row-major.
///
/// The grid itself has no game behavior; all reveal and flag semantics live
/// in [`crate::Board`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(width: Coord, height: Coord) -> Self {
        Self {
            cells: Array2::default((height as usize, width as usize)),
        }
    }

    pub fn width(&self) -> Coord {
        self.cells.dim().1 as Coord
    }

    pub fn height(&self) -> Coord {
        self.cells.dim().0 as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        row < self.height() && col < self.width()
    }

    pub fn get(&self, coords: Coord2) -> Result<&Cell> {
        if self.contains(coords) {
            Ok(&self[coords])
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        if self.contains(coords) {
            Ok(&mut self[coords])
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Up to eight in-bounds Moore neighbors of `coords`, no wraparound.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, (self.height(), self.width()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub(crate) fn as_slice_mut(&mut self) -> &mut [Cell] {
        self.cells
            .as_slice_mut()
            .expect("grid layout should be standard row-major")
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, (row, col): Coord2) -> &mut Self::Output {
        &mut self.cells[(row as usize, col as usize)]
    }
}
