use std::ops::ControlFlow;

use anyhow::ensure;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{CellState, Grid, Point};

/// Carve a maze into the grid with iterative randomized depth-first search
/// (recursive backtracking).
///
/// The whole grid is first walled up, then passages are carved between the
/// odd-coordinate cells, with the even-coordinate cells in between acting as
/// removable walls. The result is a spanning tree over the odd-coordinate
/// cells: every one of them is connected to every other, with no cycles.
///
/// `on_step` is invoked once per carve or backtrack so the caller can render
/// the growing maze; returning `ControlFlow::Break` stops carving cleanly.
/// Any `rand::Rng` works; tests pass a seeded one for reproducible layouts.
pub fn generate_maze(
    grid: &mut Grid,
    rng: &mut impl Rng,
    mut on_step: impl FnMut(&Grid) -> ControlFlow<()>,
) -> Result<(), anyhow::Error> {
    ensure!(
        grid.rows >= 3 && grid.columns >= 3,
        "maze generation needs at least a 3x3 grid, got {}x{}",
        grid.rows,
        grid.columns
    );

    grid.fill(CellState::Barrier);

    // passages must sit on odd coordinates to leave room for walls
    let start = Point {
        row: 1 + 2 * rng.random_range(0..grid.rows / 2),
        col: 1 + 2 * rng.random_range(0..grid.columns / 2),
    };
    grid.reset(start);

    let mut visited = grid.create_storage(false);
    *visited.get_mut(start) = true;
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        // candidate cells two steps away, in random order
        let mut candidates = Vec::with_capacity(4);
        if current.row >= 2 {
            candidates.push(Point {
                row: current.row - 2,
                col: current.col,
            });
        }
        if current.row + 2 < grid.rows {
            candidates.push(Point {
                row: current.row + 2,
                col: current.col,
            });
        }
        if current.col >= 2 {
            candidates.push(Point {
                row: current.row,
                col: current.col - 2,
            });
        }
        if current.col + 2 < grid.columns {
            candidates.push(Point {
                row: current.row,
                col: current.col + 2,
            });
        }
        candidates.shuffle(rng);

        match candidates.into_iter().find(|&c| !visited.get(c)) {
            Some(next) => {
                // knock out the wall cell between the two passages
                let wall = Point {
                    row: (current.row + next.row) / 2,
                    col: (current.col + next.col) / 2,
                };
                grid.reset(wall);
                grid.reset(next);
                *visited.get_mut(next) = true;
                stack.push(next);
            }
            None => {
                // dead end, backtrack
                stack.pop();
            }
        }

        if on_step(grid).is_break() {
            return Ok(());
        }
    }

    debug!("maze carved, started from {:?}", start);
    Ok(())
}
