//! The built-in solving strategy.
//!
//! With the goal in sight the strategy runs A* over the known cells. With
//! the goal hidden it explores: it scores the frontier of known territory
//! by how well each cell lines up with the goal direction and how close it
//! is, then walks to the best frontier cell it can reach.
//!
//! All searches run on a masked view in which unknown cells are walls, so
//! the strategy never plans through territory the agent has not seen.

use log::debug;
use mazerun_core::{Direction, Grid, Path, Point};
use mazerun_paths::{PathRange, Walkable, manhattan};

use crate::config::PlannerConfig;
use crate::visibility::VisibilityState;

/// A frontier cell with its exploration score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredFrontier {
    pub pos: Point,
    pub score: f64,
}

/// The default strategy: its tuning parameters plus a search cache that is
/// reused across calls and resized to each grid it is given.
#[derive(Debug, Clone)]
pub struct DefaultSolver {
    paths: PathRange,
    vision_factor: f64,
    frontier_candidates: usize,
    alignment_weight: f64,
    proximity_weight: f64,
    explore_when_blocked: bool,
}

impl Default for DefaultSolver {
    fn default() -> Self {
        Self::new(&PlannerConfig::default())
    }
}

impl DefaultSolver {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            paths: PathRange::default(),
            vision_factor: config.vision_factor,
            frontier_candidates: config.frontier_candidates,
            alignment_weight: config.alignment_weight,
            proximity_weight: config.proximity_weight,
            explore_when_blocked: config.explore_when_blocked,
        }
    }

    /// Plan from `start` toward `goal` using only what `visibility` reveals
    /// of `grid`.
    ///
    /// Returns a path beginning at `start`. A single-element path means
    /// "stay".
    pub fn solve(&mut self, grid: &Grid, start: Point, goal: Point, visibility: &VisibilityState) -> Path {
        let view = visibility.mask(grid, start, self.vision_factor);
        let goal_visible = visibility.is_visible(goal, start, self.vision_factor);
        self.solve_view(&view, start, goal, goal_visible)
    }

    /// Plan on an already masked view.
    pub fn solve_view(&mut self, view: &Grid, start: Point, goal: Point, goal_visible: bool) -> Path {
        if !view.is_traversable(start) {
            debug!("start {start} is not walkable, staying");
            return vec![start];
        }
        if goal_visible && view.is_traversable(goal) {
            let path = self.shortest_path(view, start, goal);
            if path.len() > 1 || start == goal || !self.explore_when_blocked {
                debug!("goal {goal} visible, A* path of {} cells", path.len());
                return path;
            }
            debug!("goal {goal} visible but no known route, exploring");
        }
        self.explore(view, start, goal)
    }

    /// A* shortest path with a Manhattan heuristic. Returns `[start]` when
    /// the goal cannot be reached.
    pub fn shortest_path(&mut self, grid: &Grid, start: Point, goal: Point) -> Path {
        self.paths.set_bounds(grid.bounds());
        self.paths
            .astar_path(&Walkable::new(grid), start, goal)
            .unwrap_or_else(|| vec![start])
    }

    /// Breadth-first shortest path. Returns `[start]` when the goal cannot
    /// be reached.
    pub fn bfs_path(&mut self, grid: &Grid, start: Point, goal: Point) -> Path {
        self.paths.set_bounds(grid.bounds());
        self.paths
            .bfs_path(&Walkable::new(grid), start, goal)
            .unwrap_or_else(|| vec![start])
    }

    /// Frontier exploration toward a goal that is not (reachably) known.
    ///
    /// Tries a breadth-first path to each of the best-scored frontier cells
    /// in order; if none is reachable, takes any single walkable step; if
    /// there is none, stays.
    pub fn explore(&mut self, grid: &Grid, start: Point, goal: Point) -> Path {
        let scored = self.rank_frontiers(grid, start, goal);
        self.paths.set_bounds(grid.bounds());
        let walkable = Walkable::new(grid);

        for candidate in scored.iter().take(self.frontier_candidates) {
            if let Some(path) = self.paths.bfs_path(&walkable, start, candidate.pos) {
                debug!(
                    "exploring toward frontier {} (score {:.3}, {} steps)",
                    candidate.pos,
                    candidate.score,
                    path.len() - 1
                );
                return path;
            }
        }

        any_valid_move(grid, start)
    }

    /// Frontier cells of `grid` other than `start`, best first.
    ///
    /// Equal scores are ordered by position (row-major).
    pub fn rank_frontiers(&self, grid: &Grid, start: Point, goal: Point) -> Vec<ScoredFrontier> {
        let mut scored: Vec<ScoredFrontier> = frontier_cells(grid)
            .into_iter()
            .filter(|&p| p != start)
            .map(|pos| ScoredFrontier {
                pos,
                score: self.frontier_score(start, pos, goal),
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.pos.cmp(&b.pos)));
        scored
    }

    /// `alignment_weight × alignment + proximity_weight / (1 + distance)`.
    pub fn frontier_score(&self, start: Point, frontier: Point, goal: Point) -> f64 {
        let alignment = direction_alignment(start, frontier, goal);
        let proximity = 1.0 / (1.0 + f64::from(manhattan(start, frontier)));
        self.alignment_weight * alignment + self.proximity_weight * proximity
    }
}

/// Walkable cells with at least one neighbor that is a wall or lies outside
/// the grid, in row-major order.
pub fn frontier_cells(grid: &Grid) -> Vec<Point> {
    grid.iter()
        .filter(|&(_, t)| t.is_traversable())
        .filter(|&(p, _)| p.neighbors_4().iter().any(|&n| !grid.is_traversable(n)))
        .map(|(p, _)| p)
        .collect()
}

/// Cosine similarity between `start → frontier` and `start → goal`, mapped
/// from \[-1, 1\] to \[0, 1\]. A zero-length vector scores a neutral 0.5.
pub fn direction_alignment(start: Point, frontier: Point, goal: Point) -> f64 {
    let v1 = frontier - start;
    let v2 = goal - start;
    let (x1, y1) = (f64::from(v1.x), f64::from(v1.y));
    let (x2, y2) = (f64::from(v2.x), f64::from(v2.y));
    let m1 = x1.hypot(y1);
    let m2 = x2.hypot(y2);
    if m1 == 0.0 || m2 == 0.0 {
        return 0.5;
    }
    let dot = (x1 / m1) * (x2 / m2) + (y1 / m1) * (y2 / m2);
    (dot + 1.0) / 2.0
}

/// `[start, n]` for the first walkable neighbor `n` in [`Direction::ALL`]
/// order, or `[start]` if boxed in.
pub fn any_valid_move(grid: &Grid, start: Point) -> Path {
    Direction::ALL
        .iter()
        .map(|d| start + d.delta())
        .find(|&n| grid.is_traversable(n))
        .map_or_else(|| vec![start], |n| vec![start, n])
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazerun_core::Tile;
    use proptest::prelude::*;

    /// 5×5 open grid with the anti-diagonal walled off except for a gap at
    /// the centre.
    fn gap_grid() -> Grid {
        let mut g = Grid::new(5, 5, Tile::Path);
        for x in 0..5 {
            let p = Point::new(x, 4 - x);
            if p != Point::new(2, 2) {
                g.set(p, Tile::Wall);
            }
        }
        g
    }

    #[test]
    fn visible_goal_routes_through_the_gap() {
        let g = gap_grid();
        let mut solver = DefaultSolver::default();
        let (start, goal) = (Point::new(0, 0), Point::new(4, 4));
        let path = solver.solve(&g, start, goal, &VisibilityState::unlimited());
        assert!(path.contains(&Point::new(2, 2)));
        assert_eq!(path.len(), 9);

        let bfs = solver.bfs_path(&g, start, goal);
        assert!(bfs.contains(&Point::new(2, 2)));
        assert_eq!(bfs.len(), path.len());
    }

    #[test]
    fn hidden_goal_picks_aligned_adjacent_frontier() {
        let g = gap_grid();
        let mut solver = DefaultSolver::default();
        let start = Point::new(0, 0);
        let visibility = VisibilityState::new(0).with_visited([start]);
        let path = solver.solve(&g, start, Point::new(4, 4), &visibility);
        assert_eq!(path.len(), 2);
        assert_eq!(path[0], start);
        let step = path[1] - start;
        assert!(step == Point::new(1, 0) || step == Point::new(0, 1));
    }

    #[test]
    fn unreachable_goal_stays() {
        let mut g = Grid::new(5, 5, Tile::Path);
        for y in 0..5 {
            g.set(Point::new(2, y), Tile::Wall);
        }
        let mut solver = DefaultSolver::default();
        let (start, goal) = (Point::new(0, 0), Point::new(4, 4));
        assert_eq!(solver.shortest_path(&g, start, goal), vec![start]);
        assert_eq!(solver.bfs_path(&g, start, goal), vec![start]);
        assert_eq!(
            solver.solve(&g, start, goal, &VisibilityState::unlimited()),
            vec![start]
        );
    }

    #[test]
    fn blocked_goal_can_fall_back_to_exploration() {
        let mut g = Grid::new(5, 5, Tile::Path);
        for y in 0..5 {
            g.set(Point::new(2, y), Tile::Wall);
        }
        let config = PlannerConfig {
            explore_when_blocked: true,
            ..PlannerConfig::default()
        };
        let mut solver = DefaultSolver::new(&config);
        let start = Point::new(0, 2);
        let path = solver.solve(&g, start, Point::new(4, 2), &VisibilityState::unlimited());
        assert!(path.len() > 1);
        assert_eq!(path[0], start);
    }

    #[test]
    fn walled_in_start_stays() {
        let g = Grid::from_codes(&[[1u8, 1, 1], [1, 0, 1], [1, 1, 1]]).unwrap();
        let mut solver = DefaultSolver::default();
        let start = Point::new(1, 1);
        assert_eq!(solver.explore(&g, start, Point::new(0, 0)), vec![start]);
    }

    #[test]
    fn wall_start_stays() {
        let g = Grid::from_codes(&[[1u8, 0]]).unwrap();
        let mut solver = DefaultSolver::default();
        let start = Point::new(0, 0);
        assert_eq!(
            solver.solve(&g, start, Point::new(1, 0), &VisibilityState::unlimited()),
            vec![start]
        );
    }

    #[test]
    fn alignment_scores() {
        let o = Point::ZERO;
        let goal = Point::new(4, 0);
        assert!((direction_alignment(o, Point::new(2, 0), goal) - 1.0).abs() < 1e-12);
        assert!(direction_alignment(o, Point::new(-2, 0), goal).abs() < 1e-12);
        assert!((direction_alignment(o, Point::new(0, 3), goal) - 0.5).abs() < 1e-12);
        assert_eq!(direction_alignment(o, o, goal), 0.5);
        assert_eq!(direction_alignment(o, Point::new(1, 1), o), 0.5);
    }

    #[test]
    fn frontier_includes_border_and_wall_neighbours() {
        let g = Grid::from_codes(&[[0u8, 0, 0], [0, 0, 0], [0, 0, 1]]).unwrap();
        let f = frontier_cells(&g);
        assert!(!f.contains(&Point::new(1, 1)));
        assert!(f.contains(&Point::new(0, 0)));
        assert!(f.contains(&Point::new(2, 1)));
        assert!(!f.contains(&Point::new(2, 2)));
    }

    #[test]
    fn interior_cell_is_not_frontier() {
        let g = Grid::new(3, 3, Tile::Path);
        assert!(!frontier_cells(&g).contains(&Point::new(1, 1)));
        assert_eq!(frontier_cells(&g).len(), 8);
    }

    #[test]
    fn ranking_prefers_alignment_then_position() {
        let g = Grid::new(3, 3, Tile::Path);
        let solver = DefaultSolver::default();
        let ranked = solver.rank_frontiers(&g, Point::new(1, 1), Point::new(2, 1));
        assert_eq!(ranked[0].pos, Point::new(2, 1));
        let tied: Vec<Point> = ranked
            .iter()
            .filter(|s| (s.score - ranked[1].score).abs() < 1e-12)
            .map(|s| s.pos)
            .collect();
        let mut sorted = tied.clone();
        sorted.sort();
        assert_eq!(tied, sorted);
    }

    #[test]
    fn fallback_step_follows_direction_order() {
        let g = Grid::from_codes(&[[0u8, 0], [0, 1]]).unwrap();
        assert_eq!(
            any_valid_move(&g, Point::new(0, 0)),
            vec![Point::new(0, 0), Point::new(0, 1)]
        );
    }

    #[test]
    fn repeated_solves_are_identical() {
        let g = gap_grid();
        let mut solver = DefaultSolver::default();
        let v = VisibilityState::new(1).with_visited([Point::new(0, 0)]);
        let a = solver.solve(&g, Point::new(0, 0), Point::new(4, 4), &v);
        let b = solver.solve(&g, Point::new(0, 0), Point::new(4, 4), &v);
        assert_eq!(a, b);
    }

    #[test]
    fn one_solver_serves_grids_of_any_size() {
        let mut solver = DefaultSolver::default();
        let small = gap_grid();
        let large = Grid::new(9, 7, Tile::Path);
        let corner = |g: &Grid| Point::new(g.width() - 1, g.height() - 1);
        for g in [&small, &large, &small, &large] {
            let reused = solver.shortest_path(g, Point::ZERO, corner(g));
            let fresh = DefaultSolver::default().shortest_path(g, Point::ZERO, corner(g));
            assert_eq!(reused, fresh);
            assert_eq!(solver.bfs_path(g, Point::ZERO, corner(g)).len(), fresh.len());
        }
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (2usize..9, 2usize..9).prop_flat_map(|(w, h)| {
            proptest::collection::vec(proptest::bool::weighted(0.35), w * h).prop_map(
                move |walls| {
                    let rows: Vec<Vec<u8>> = walls
                        .chunks(w)
                        .map(|r| r.iter().map(|&b| u8::from(b)).collect())
                        .collect();
                    Grid::from_codes(&rows).unwrap()
                },
            )
        })
    }

    proptest! {
        #[test]
        fn exploration_moves_when_a_neighbour_is_open(g in arb_grid(), vision in 0i32..4) {
            let mut solver = DefaultSolver::default();
            let start = Point::new(0, 0);
            let goal = Point::new(g.width() - 1, g.height() - 1);
            prop_assume!(g.is_traversable(start));
            let path = solver.solve(&g, start, goal, &VisibilityState::new(vision));
            prop_assert!(!path.is_empty());
            prop_assert_eq!(path[0], start);
            prop_assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
            let has_open_neighbour = start.neighbors_4().iter().any(|&n| g.is_traversable(n));
            if has_open_neighbour && !VisibilityState::new(vision).is_visible(goal, start, 1.5) {
                prop_assert!(path.len() > 1);
            }
        }
    }
}
