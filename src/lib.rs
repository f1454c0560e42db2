//! Engine for a grid pathfinding visualizer: BFS, DFS, Dijkstra and A*
//! searches plus a recursive-backtracking maze generator, all stepping one
//! expansion at a time so a frontend can render the intermediate state.
//!
//! The engine owns no windowing or input handling; it only mutates
//! [`CellState`]s on a [`Grid`] and yields through a per-step callback, which
//! doubles as the cancellation signal.

pub mod find;
pub mod grid;
pub mod maze;
pub mod util;

pub use find::{search, Algorithm, PathResult, Search, SearchState};
pub use grid::{CellState, CellStorage, Grid, Point};
pub use maze::generate_maze;
