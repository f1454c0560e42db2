use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt::Display;
use std::ops::ControlFlow;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::grid::{CellState, CellStorage, Grid, Point};
use crate::util::{manhattan, reconstruct_path};

/// The search strategy driving the frontier.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Algorithm::Bfs => "BFS",
                Algorithm::Dfs => "DFS",
                Algorithm::Dijkstra => "Dijkstra",
                Algorithm::AStar => "A*",
            }
        )
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" => Ok(Algorithm::AStar),
            _ => Err(anyhow::anyhow!("Invalid algorithm: {}", s)),
        }
    }
}

/// The objects that we store in the priority queue
#[derive(Debug)]
struct ToVisit {
    cost: usize,
    seq: usize,
    point: Point,
}

impl Ord for ToVisit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // the insertion sequence breaks exact cost ties deterministically
        (self.cost, self.seq)
            .cmp(&(other.cost, other.seq))
            .reverse() // reverse for BinaryHeap to be a min-heap
    }
}

impl PartialOrd for ToVisit {
    fn partial_cmp(&self, other: &ToVisit) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ToVisit {
    fn eq(&self, other: &ToVisit) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ToVisit {}

/// Frontier of discovered-but-unexpanded cells, ordered per strategy.
#[derive(Debug)]
enum Frontier {
    /// FIFO, for BFS.
    Queue(VecDeque<Point>),
    /// LIFO, for DFS.
    Stack(Vec<Point>),
    /// Min-ordered by (cost, insertion sequence), for Dijkstra and A*.
    Heap(BinaryHeap<ToVisit>),
}

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct PathResult {
    pub path: Vec<Point>,
    pub start: Point,
    pub goal: Point,
    pub total_cost: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Computing,
    NoPathFound,
    PathFound(PathResult),
    Cancelled,
}

impl SearchState {
    fn is_done(&self) -> bool {
        !matches!(self, SearchState::Computing)
    }
}

/// An in-progress search over a [`Grid`].
///
/// The search runs one popped-cell iteration per [`Search::step`] call and
/// reports its progress through the returned [`SearchState`], so a caller can
/// render the grid between steps. [`search`] wraps the whole loop for callers
/// that only care about the outcome.
#[derive(Debug)]
pub struct Search {
    algorithm: Algorithm,
    start: Point,
    goal: Point,
    frontier: Frontier,
    came_from: CellStorage<Option<Point>>,
    /// Best known path cost from start; only consulted by Dijkstra and A*.
    g_score: CellStorage<usize>,
    /// Visited set for BFS/DFS; open-set membership for Dijkstra/A*.
    seen: CellStorage<bool>,
    seq: usize,
    state: SearchState,
}

impl Search {
    pub fn new(algorithm: Algorithm, grid: &Grid, start: Point, goal: Point) -> Self {
        let mut seen = grid.create_storage(false);
        *seen.get_mut(start) = true;

        let mut g_score = grid.create_storage(usize::MAX);
        *g_score.get_mut(start) = 0;

        let frontier = match algorithm {
            Algorithm::Bfs => Frontier::Queue(VecDeque::from([start])),
            Algorithm::Dfs => Frontier::Stack(vec![start]),
            Algorithm::Dijkstra => Frontier::Heap(BinaryHeap::from([ToVisit {
                cost: 0,
                seq: 0,
                point: start,
            }])),
            Algorithm::AStar => Frontier::Heap(BinaryHeap::from([ToVisit {
                cost: manhattan(start, goal),
                seq: 0,
                point: start,
            }])),
        };

        Self {
            algorithm,
            start,
            goal,
            frontier,
            came_from: grid.create_storage(None),
            g_score,
            seen,
            seq: 0,
            state: SearchState::Computing,
        }
    }

    /// Run the search to completion.
    pub fn finish(
        mut self,
        grid: &mut Grid,
        on_step: &mut dyn FnMut(&Grid) -> ControlFlow<()>,
    ) -> SearchState {
        loop {
            match self.step(grid, on_step) {
                SearchState::Computing => {}
                state => return state,
            }
        }
    }

    /// Expand a single cell from the frontier.
    ///
    /// Invokes `on_step` once after the cell's neighbors have been processed;
    /// a `ControlFlow::Break` return cancels the search with no path marked.
    pub fn step(
        &mut self,
        grid: &mut Grid,
        on_step: &mut dyn FnMut(&Grid) -> ControlFlow<()>,
    ) -> SearchState {
        if self.state.is_done() {
            return self.state.clone();
        }

        let Some(current) = self.pop_frontier() else {
            // exhausted without reaching the goal; the Open/Closed trace is
            // left on the grid on purpose
            self.state = SearchState::NoPathFound;
            return self.state.clone();
        };

        if current == self.goal {
            let path = reconstruct_path(&self.came_from, self.goal, grid, on_step);

            // the search may have overwritten these with Open/Closed
            grid.set_state(self.goal, CellState::End);
            grid.set_state(self.start, CellState::Start);

            let total_cost = path.len() - 1;
            debug!("{}: goal reached, cost={}", self.algorithm, total_cost);

            self.state = SearchState::PathFound(PathResult {
                path,
                start: self.start,
                goal: self.goal,
                total_cost,
            });
            return self.state.clone();
        }

        match self.algorithm {
            Algorithm::Bfs | Algorithm::Dfs => {
                let mut neighbors: Vec<Point> = grid.neighbors_of(current).collect();
                if self.algorithm == Algorithm::Dfs {
                    // push in reversed order so the stack explores neighbors
                    // in their discovery order
                    neighbors.reverse();
                }

                for neighbor in neighbors {
                    if !self.seen.get(neighbor) {
                        *self.came_from.get_mut(neighbor) = Some(current);
                        *self.seen.get_mut(neighbor) = true;
                        self.push_frontier(neighbor, 0);
                        grid.set_state(neighbor, CellState::Open);
                    }
                }
            }
            Algorithm::Dijkstra | Algorithm::AStar => {
                let tentative = self.g_score.get(current) + 1;

                for neighbor in grid.neighbors_of(current).collect::<Vec<_>>() {
                    // standard relaxation: only a strictly cheaper route
                    // updates a neighbor, and a cell never re-enters the
                    // frontier while its membership flag is set (no
                    // decrease-key; sound for uniform edge costs)
                    if tentative < self.g_score.get(neighbor) {
                        *self.came_from.get_mut(neighbor) = Some(current);
                        *self.g_score.get_mut(neighbor) = tentative;

                        if !self.seen.get(neighbor) {
                            let cost = match self.algorithm {
                                Algorithm::AStar => tentative + manhattan(neighbor, self.goal),
                                _ => tentative,
                            };
                            self.push_frontier(neighbor, cost);
                            *self.seen.get_mut(neighbor) = true;
                            grid.set_state(neighbor, CellState::Open);
                        }
                    }
                }
            }
        }

        if on_step(grid).is_break() {
            self.state = SearchState::Cancelled;
            return self.state.clone();
        }

        if current != self.start {
            grid.set_state(current, CellState::Closed);
        }

        self.state.clone()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    fn pop_frontier(&mut self) -> Option<Point> {
        match &mut self.frontier {
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Stack(stack) => stack.pop(),
            Frontier::Heap(heap) => {
                let point = heap.pop().map(|visit| visit.point);
                if let Some(point) = point {
                    // a popped cell leaves the open-set membership hash
                    *self.seen.get_mut(point) = false;
                }
                point
            }
        }
    }

    fn push_frontier(&mut self, point: Point, cost: usize) {
        match &mut self.frontier {
            Frontier::Queue(queue) => queue.push_back(point),
            Frontier::Stack(stack) => stack.push(point),
            Frontier::Heap(heap) => {
                self.seq += 1;
                heap.push(ToVisit {
                    cost,
                    seq: self.seq,
                    point,
                });
            }
        }
    }
}

/// Run `algorithm` from `start` to `goal` over the grid and report whether a
/// path was found.
///
/// `on_step` is invoked after every expansion step and every path mark so the
/// caller can render intermediate state; returning `ControlFlow::Break`
/// cancels the search. Start and end cells are assumed to be in bounds and
/// not barriers; enforcing that is the caller's job.
pub fn search(
    algorithm: Algorithm,
    grid: &mut Grid,
    start: Point,
    goal: Point,
    mut on_step: impl FnMut(&Grid) -> ControlFlow<()>,
) -> bool {
    let state = Search::new(algorithm, grid, start, goal).finish(grid, &mut on_step);
    matches!(state, SearchState::PathFound(_))
}
