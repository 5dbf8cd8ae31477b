//! Post-generation reachability checks.

use mazerun_core::{Grid, Point};
use mazerun_paths::{PathRange, Walkable};

/// Whether the grid's start marker can reach its goal marker.
///
/// Returns `false` when either marker is missing.
pub fn is_connected(grid: &Grid) -> bool {
    is_connected_in(&mut PathRange::new(grid.bounds()), grid)
}

/// [`is_connected`] on a caller-owned search cache.
pub fn is_connected_in(pr: &mut PathRange, grid: &Grid) -> bool {
    match (grid.start(), grid.goal()) {
        (Some(start), Some(goal)) => reachable_in(pr, grid, start, goal),
        _ => false,
    }
}

/// Whether `to` can be reached from `from` moving orthogonally over
/// non-wall tiles.
pub fn reachable(grid: &Grid, from: Point, to: Point) -> bool {
    reachable_in(&mut PathRange::new(grid.bounds()), grid, from, to)
}

/// [`reachable`] on a caller-owned search cache, resized to `grid`.
pub fn reachable_in(pr: &mut PathRange, grid: &Grid, from: Point, to: Point) -> bool {
    if !grid.is_traversable(from) || !grid.is_traversable(to) {
        return false;
    }
    pr.set_bounds(grid.bounds());
    pr.flood(&Walkable::new(grid), from);
    pr.flooded(to)
}
