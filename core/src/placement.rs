use rand::prelude::*;

use crate::{CellCount, Coord2, Grid};

/// Places `mine_count` mines uniformly at random, keeping the safe cell and
/// its whole neighborhood mine-free, then fills in adjacency counts.
///
/// Runs exactly once per board lifetime, on the first successful reveal; the
/// caller guards re-entry with its placement tag. The configuration is
/// validated at construction, so the banned region (at most 9 cells) always
/// leaves enough free slots.
pub(crate) fn place_mines(grid: &mut Grid, safe: Coord2, mine_count: CellCount, seed: u64) {
    let banned: Vec<Coord2> = core::iter::once(safe).chain(grid.neighbors(safe)).collect();

    // pre-mark the banned region so the slot scan below skips it
    for &pos in &banned {
        grid[pos].mine = true;
    }

    let mut free_cells = grid.total_cells() - banned.len() as CellCount;
    let mut mines_placed = 0;

    let mut rng = SmallRng::seed_from_u64(seed);
    {
        let cells = grid.as_slice_mut();
        while mines_placed < mine_count {
            if free_cells == 0 {
                break;
            }
            let mut slot = rng.random_range(0..free_cells);
            for cell in cells.iter_mut() {
                if cell.mine {
                    continue;
                }
                if slot == 0 {
                    cell.mine = true;
                    mines_placed += 1;
                    free_cells -= 1;
                    break;
                }
                slot -= 1;
            }
        }
    }

    // undo the banned markers
    for &pos in &banned {
        grid[pos].mine = false;
    }

    // double check mine count
    let count = grid.iter().filter(|cell| cell.mine).count() as CellCount;
    if count != mine_count {
        log::warn!(
            "placed mine count mismatch, actual: {}, requested: {}",
            count,
            mine_count
        );
    }

    compute_adjacency(grid);

    log::debug!(
        "placed {} mines avoiding {:?} and its neighborhood (seed {})",
        count,
        safe,
        seed
    );
}

/// Writes the mine-neighbor count into every non-mine cell; mine cells keep 0.
pub(crate) fn compute_adjacency(grid: &mut Grid) {
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let coords = (row, col);
            if grid[coords].mine {
                continue;
            }
            let adjacent = grid
                .neighbors(coords)
                .filter(|&pos| grid[pos].mine)
                .count() as u8;
            grid[coords].adjacent_mines = adjacent;
        }
    }
}
