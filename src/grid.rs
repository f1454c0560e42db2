use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Classification of a single grid cell.
///
/// A cell is in exactly one state at a time; searches move cells between
/// states through [`Grid::set_state`] and [`Grid::reset`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum CellState {
    /// Untouched, traversable.
    #[default]
    Default,
    /// Discovered but not yet expanded (in some frontier).
    Open,
    /// Fully expanded.
    Closed,
    /// Excluded from traversal.
    Barrier,
    Start,
    End,
    /// Part of a reconstructed path.
    Path,
}

impl CellState {
    pub fn is_barrier(self) -> bool {
        matches!(self, CellState::Barrier)
    }
}

impl Display for CellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CellState::Default => " ",
                CellState::Open => "o",
                CellState::Closed => ".",
                CellState::Barrier => "X",
                CellState::Start => "S",
                CellState::End => "E",
                CellState::Path => "*",
            }
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

/// A rectangular grid of classified cells.
///
/// The grid is the single authoritative mapping from `(row, col)` to a
/// [`CellState`]; all mutation goes through the explicit state-transition
/// methods so a cell can never hold more than one classification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub columns: usize,
    cells: Vec<Vec<CellState>>,
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![CellState::Default; columns]; rows],
        }
    }

    pub fn is_valid(&self, node: Point) -> bool {
        node.row < self.rows && node.col < self.columns
    }

    pub fn state(&self, node: Point) -> CellState {
        self.cells[node.row][node.col]
    }

    pub fn set_state(&mut self, node: Point, state: CellState) {
        self.cells[node.row][node.col] = state;
    }

    /// Put a single cell back to [`CellState::Default`].
    pub fn reset(&mut self, node: Point) {
        self.cells[node.row][node.col] = CellState::Default;
    }

    /// Set every cell to the given state.
    pub fn fill(&mut self, state: CellState) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell = state;
            }
        }
    }

    /// Clear the trace a search leaves behind (`Open`/`Closed`/`Path`),
    /// keeping barriers and the start/end markers so the same query can be
    /// run again.
    pub fn clear_trace(&mut self) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                if matches!(cell, CellState::Open | CellState::Closed | CellState::Path) {
                    *cell = CellState::Default;
                }
            }
        }
    }

    /// Resize in place, keeping the overlapping cells and defaulting the rest.
    pub fn resize(&mut self, columns: usize, rows: usize) {
        let mut new_cells = vec![vec![CellState::default(); columns]; rows];

        for row in 0..self.rows.min(rows) {
            for col in 0..self.columns.min(columns) {
                new_cells[row][col] = self.cells[row][col];
            }
        }

        self.rows = rows;
        self.columns = columns;
        self.cells = new_cells;
    }

    /// Return an iterator over the traversable 4-directional neighbors of the
    /// provided node, in down/up/right/left discovery order.
    ///
    /// Adjacency is recomputed on every call, so the result always reflects
    /// the current barrier layout.
    pub fn neighbors_of(&self, node: Point) -> impl Iterator<Item = Point> {
        let mut points = Vec::with_capacity(4);

        if self.cells[node.row][node.col].is_barrier() {
            return points.into_iter();
        }

        if node.row < self.rows - 1 {
            points.push(Point {
                row: node.row + 1,
                col: node.col,
            });
        }
        if node.row > 0 {
            points.push(Point {
                row: node.row - 1,
                col: node.col,
            });
        }
        if node.col < self.columns - 1 {
            points.push(Point {
                col: node.col + 1,
                row: node.row,
            });
        }
        if node.col > 0 {
            points.push(Point {
                col: node.col - 1,
                row: node.row,
            });
        }

        // filter to only keep traversable cells
        points.retain(|p| !self.cells[p.row][p.col].is_barrier());

        points.into_iter()
    }

    /// Create a per-cell storage for auxiliary search bookkeeping.
    pub fn create_storage<T: Copy + 'static>(&self, default_value: T) -> CellStorage<T> {
        CellStorage(vec![vec![default_value; self.columns]; self.rows])
    }
}

impl Default for Grid {
    /// The 50x50 grid the interactive shell starts with.
    fn default() -> Self {
        Self::new(50, 50)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Per-cell auxiliary storage (a vec in a vec), aligned with a [`Grid`].
// TODO: flatten into a single vec indexed by row * columns + col
#[derive(Debug)]
pub struct CellStorage<T>(Vec<Vec<T>>);

impl<T: Copy + 'static> CellStorage<T> {
    pub fn get(&self, node: Point) -> T {
        self.0[node.row][node.col]
    }

    pub fn get_mut(&mut self, node: Point) -> &mut T {
        &mut self.0[node.row][node.col]
    }
}

impl<T: Display> Display for CellStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.0 {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn neighbors_skip_bounds_and_barriers() {
        let mut grid = Grid::new(3, 3);
        grid.set_state(Point { row: 1, col: 2 }, CellState::Barrier);

        let neighbors: Vec<Point> = grid.neighbors_of(Point { row: 1, col: 1 }).collect();

        // down, up, left; right is a barrier
        assert_eq!(
            neighbors,
            vec![
                Point { row: 2, col: 1 },
                Point { row: 0, col: 1 },
                Point { row: 1, col: 0 },
            ]
        );
    }

    #[test]
    fn corner_has_two_neighbors() {
        let grid = Grid::new(3, 3);
        assert_eq!(grid.neighbors_of(Point { row: 0, col: 0 }).count(), 2);
        assert_eq!(grid.neighbors_of(Point { row: 2, col: 2 }).count(), 2);
    }

    #[test]
    fn barrier_cell_has_no_neighbors() {
        let mut grid = Grid::new(3, 3);
        grid.set_state(Point { row: 1, col: 1 }, CellState::Barrier);
        assert_eq!(grid.neighbors_of(Point { row: 1, col: 1 }).count(), 0);
    }

    #[test]
    fn clear_trace_keeps_layout() {
        let mut grid = Grid::new(3, 3);
        grid.set_state(Point { row: 0, col: 0 }, CellState::Start);
        grid.set_state(Point { row: 0, col: 1 }, CellState::Open);
        grid.set_state(Point { row: 1, col: 1 }, CellState::Closed);
        grid.set_state(Point { row: 2, col: 1 }, CellState::Path);
        grid.set_state(Point { row: 1, col: 0 }, CellState::Barrier);
        grid.set_state(Point { row: 2, col: 2 }, CellState::End);

        grid.clear_trace();

        assert_eq!(grid.state(Point { row: 0, col: 0 }), CellState::Start);
        assert_eq!(grid.state(Point { row: 0, col: 1 }), CellState::Default);
        assert_eq!(grid.state(Point { row: 1, col: 1 }), CellState::Default);
        assert_eq!(grid.state(Point { row: 2, col: 1 }), CellState::Default);
        assert_eq!(grid.state(Point { row: 1, col: 0 }), CellState::Barrier);
        assert_eq!(grid.state(Point { row: 2, col: 2 }), CellState::End);
    }

    #[test]
    fn resize_keeps_content() {
        let mut grid = Grid::new(2, 2);
        grid.set_state(Point { row: 1, col: 1 }, CellState::Barrier);

        grid.resize(4, 3);

        assert_eq!(grid.rows, 3);
        assert_eq!(grid.columns, 4);
        assert_eq!(grid.state(Point { row: 1, col: 1 }), CellState::Barrier);
        assert_eq!(grid.state(Point { row: 2, col: 3 }), CellState::Default);
    }

    #[test]
    fn serde_round_trip() {
        let mut grid = Grid::new(3, 3);
        grid.set_state(Point { row: 0, col: 2 }, CellState::Barrier);
        grid.set_state(Point { row: 1, col: 1 }, CellState::Start);

        let json = serde_json::to_string(&grid).unwrap();
        let restored: Grid = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.to_string(), grid.to_string());
    }
}
