use std::ops::ControlFlow;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridpath::{generate_maze, Algorithm, Grid, Point, Search, SearchState};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn carve_maze(size: usize, seed: u64) -> Grid {
    let mut grid = Grid::new(size, size);
    let mut rng = StdRng::seed_from_u64(seed);
    generate_maze(&mut grid, &mut rng, |_| ControlFlow::Continue(())).unwrap();
    grid
}

fn bench_algorithm(c: &mut Criterion, algorithm: Algorithm) {
    let grid = carve_maze(51, 7);
    let start = Point { row: 1, col: 1 };
    let goal = Point { row: 49, col: 49 };

    c.bench_function(&format!("maze_51_{}", algorithm), |b| {
        b.iter(|| {
            let mut grid = grid.clone();
            let state = Search::new(black_box(algorithm), &grid, black_box(start), black_box(goal))
                .finish(&mut grid, &mut |_| ControlFlow::Continue(()));
            assert!(matches!(state, SearchState::PathFound(_)));
        })
    });
}

pub fn bfs(c: &mut Criterion) {
    bench_algorithm(c, Algorithm::Bfs);
}

pub fn dfs(c: &mut Criterion) {
    bench_algorithm(c, Algorithm::Dfs);
}

pub fn dijkstra(c: &mut Criterion) {
    bench_algorithm(c, Algorithm::Dijkstra);
}

pub fn astar(c: &mut Criterion) {
    bench_algorithm(c, Algorithm::AStar);
}

criterion_group!(benches, bfs, dfs, dijkstra, astar);
criterion_main!(benches);
