//! Benchmarks for planning on generated mazes.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use mazerun_core::Grid;
use mazerun_gen::{Difficulty, MazeGenerator};
use mazerun_solver::{DefaultSolver, PathPlanner, PlannerConfig, VisibilityState};

fn maze(difficulty: Difficulty) -> Grid {
    let (w, h) = difficulty.maze_size();
    MazeGenerator::from_seed(1234)
        .generate_connected(w, h, difficulty.powerups(), 8)
        .expect("odd-sized preset mazes are connected")
}

/// A* with the goal in sight, per difficulty.
fn bench_shortest_path(c: &mut Criterion) {
    let mut solver = DefaultSolver::default();
    let mut group = c.benchmark_group("shortest_path");
    for difficulty in Difficulty::ALL {
        let grid = maze(difficulty);
        let (start, goal) = (grid.start().unwrap(), grid.goal().unwrap());
        group.bench_function(difficulty.name(), |b| {
            b.iter(|| solver.shortest_path(black_box(&grid), start, goal))
        });
    }
    group.finish();
}

/// One exploration decision from the start under a small vision range.
fn bench_explore(c: &mut Criterion) {
    let mut solver = DefaultSolver::default();
    let grid = maze(Difficulty::Hard);
    let (start, goal) = (grid.start().unwrap(), grid.goal().unwrap());
    let vis = VisibilityState::new(2).with_visited([start]);

    c.bench_function("explore_hard", |b| {
        b.iter(|| solver.solve(black_box(&grid), start, goal, &vis))
    });
}

/// A full fogged walk from start until the planner stops.
fn bench_fogged_walk(c: &mut Criterion) {
    let grid = maze(Difficulty::Medium);
    let (start, goal) = (grid.start().unwrap(), grid.goal().unwrap());

    c.bench_function("fogged_walk_medium", |b| {
        b.iter(|| {
            let mut planner = PathPlanner::new(PlannerConfig::default());
            let mut vis = VisibilityState::new(3);
            let mut pos = start;
            for _ in 0..2000 {
                vis.visit(pos);
                match planner.next_step(pos, goal, &grid, &vis) {
                    Some(dir) if pos != goal => pos = pos + dir.delta(),
                    _ => break,
                }
            }
            pos
        })
    });
}

criterion_group!(benches, bench_shortest_path, bench_explore, bench_fogged_walk);
criterion_main!(benches);
