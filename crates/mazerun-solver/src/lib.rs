//! Maze path planning under fog of war.
//!
//! The crate is built around [`PathPlanner`], which a game loop asks for
//! one [`Direction`](mazerun_core::Direction) per tick:
//!
//! ```
//! use mazerun_core::Grid;
//! use mazerun_solver::{PathPlanner, PlannerConfig, VisibilityState};
//!
//! let grid = Grid::from_codes(&[[2u8, 0, 0], [1, 1, 0], [0, 0, 3]]).unwrap();
//! let (start, goal) = (grid.start().unwrap(), grid.goal().unwrap());
//!
//! let mut planner = PathPlanner::new(PlannerConfig::default());
//! let mut visibility = VisibilityState::new(2);
//! let mut pos = start;
//! while let Some(dir) = planner.next_step(pos, goal, &grid, &visibility) {
//!     pos = pos + dir.delta();
//!     visibility.visit(pos);
//! }
//! assert_eq!(pos, goal);
//! ```
//!
//! - [`DefaultSolver`]: A* when the goal is visible, frontier exploration
//!   otherwise.
//! - [`MazeSolver`] / [`SolverRegistry`]: external strategies, bound by
//!   name or injected directly.
//! - [`Sandbox`]: runs external strategies under a time budget and checks
//!   their answers.

mod config;
mod default;
mod planner;
mod plugin;
mod sandbox;
mod visibility;

pub use config::PlannerConfig;
pub use default::{DefaultSolver, ScoredFrontier, any_valid_move, direction_alignment, frontier_cells};
pub use planner::{PathPlanner, Strategy};
pub use plugin::{BfsSolver, BoxError, ExplorerSolver, FnSolver, MazeSolver, PluginLoadError, SolverRegistry};
pub use sandbox::{Sandbox, SolverExecutionError, validate_path};
pub use visibility::VisibilityState;
