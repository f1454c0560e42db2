use std::ops::ControlFlow;

use gridpath::{generate_maze, search, Algorithm, CellState, Grid, Point};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let algorithm = args
        .next()
        .map(|s| s.parse::<Algorithm>())
        .transpose()?
        .unwrap_or(Algorithm::AStar);
    let seed = args
        .next()
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(42);

    let mut grid = Grid::new(21, 21);
    let mut rng = StdRng::seed_from_u64(seed);
    generate_maze(&mut grid, &mut rng, |_| ControlFlow::Continue(()))?;

    println!("{}", grid);

    let start = Point { row: 1, col: 1 };
    let goal = Point {
        row: grid.rows - 2,
        col: grid.columns - 2,
    };
    grid.set_state(start, CellState::Start);
    grid.set_state(goal, CellState::End);

    let found = search(algorithm, &mut grid, start, goal, |_| {
        ControlFlow::Continue(())
    });

    println!("{}", grid);
    println!(
        "{}: {}",
        algorithm,
        if found { "path found" } else { "no path" }
    );

    Ok(())
}
