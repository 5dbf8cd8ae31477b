//! Pluggable solving strategies.
//!
//! An external strategy is any type implementing [`MazeSolver`]. Strategies
//! are bound to a planner either directly ([`PathPlanner::bind_solver`]) or
//! by name through a [`SolverRegistry`], which maps names to loader
//! functions.
//!
//! [`PathPlanner::bind_solver`]: crate::PathPlanner::bind_solver

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use mazerun_core::{Grid, Path, Point};
use mazerun_paths::{PathRange, Walkable};

use crate::config::PlannerConfig;
use crate::default::DefaultSolver;

/// Error type returned by solver and loader callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A solving strategy.
///
/// `grid` is the capability-limited view of the maze: every cell the agent
/// does not know is a wall. The returned path must begin at `start` and
/// move one orthogonal step at a time. An empty path means "no path".
pub trait MazeSolver: Send + Sync {
    fn name(&self) -> &str;

    fn solve(&self, grid: &Grid, start: Point, goal: Point) -> Result<Path, BoxError>;
}

/// Adapter turning a closure into a [`MazeSolver`].
pub struct FnSolver<F> {
    name: String,
    f: F,
}

impl<F> FnSolver<F>
where
    F: Fn(&Grid, Point, Point) -> Result<Path, BoxError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> MazeSolver for FnSolver<F>
where
    F: Fn(&Grid, Point, Point) -> Result<Path, BoxError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn solve(&self, grid: &Grid, start: Point, goal: Point) -> Result<Path, BoxError> {
        (self.f)(grid, start, goal)
    }
}

impl<F> fmt::Debug for FnSolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSolver").field("name", &self.name).finish()
    }
}

/// Plain breadth-first search over the supplied view.
#[derive(Debug, Default)]
pub struct BfsSolver {
    paths: Mutex<PathRange>,
}

impl MazeSolver for BfsSolver {
    fn name(&self) -> &str {
        "bfs"
    }

    fn solve(&self, grid: &Grid, start: Point, goal: Point) -> Result<Path, BoxError> {
        // A search that panicked leaves only stale stamps behind.
        let mut pr = self.paths.lock().unwrap_or_else(PoisonError::into_inner);
        pr.set_bounds(grid.bounds());
        Ok(pr
            .bfs_path(&Walkable::new(grid), start, goal)
            .unwrap_or_default())
    }
}

/// The default strategy packaged as a plugin.
///
/// It only sees the masked view, so it treats the goal as visible exactly
/// when the view shows it as walkable.
#[derive(Debug, Default)]
pub struct ExplorerSolver {
    inner: Mutex<DefaultSolver>,
}

impl ExplorerSolver {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            inner: Mutex::new(DefaultSolver::new(config)),
        }
    }
}

impl MazeSolver for ExplorerSolver {
    fn name(&self) -> &str {
        "explorer"
    }

    fn solve(&self, grid: &Grid, start: Point, goal: Point) -> Result<Path, BoxError> {
        let goal_visible = grid.is_traversable(goal);
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.solve_view(grid, start, goal, goal_visible))
    }
}

/// Errors raised when a solver cannot be bound.
#[derive(Debug)]
pub enum PluginLoadError {
    /// No loader registered under this name.
    NotFound { name: String, available: Vec<String> },
    /// The loader ran but failed to produce a solver.
    Init { name: String, reason: String },
}

impl fmt::Display for PluginLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name, available } if available.is_empty() => {
                write!(f, "plugin: no solver named {name:?} (registry is empty)")
            }
            Self::NotFound { name, available } => write!(
                f,
                "plugin: no solver named {name:?} (available: {})",
                available.join(", ")
            ),
            Self::Init { name, reason } => {
                write!(f, "plugin: solver {name:?} failed to initialize: {reason}")
            }
        }
    }
}

impl std::error::Error for PluginLoadError {}

type Loader = Box<dyn Fn() -> Result<Arc<dyn MazeSolver>, BoxError> + Send + Sync>;

/// Name → loader table for external strategies.
#[derive(Default)]
pub struct SolverRegistry {
    loaders: BTreeMap<String, Loader>,
}

impl SolverRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the `bfs` and `explorer` strategies.
    pub fn with_builtins(config: &PlannerConfig) -> Self {
        let mut reg = Self::new();
        reg.register_solver(BfsSolver::default());
        reg.register_solver(ExplorerSolver::new(config));
        reg
    }

    /// Register a loader under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, loader: F)
    where
        F: Fn() -> Result<Arc<dyn MazeSolver>, BoxError> + Send + Sync + 'static,
    {
        self.loaders.insert(name.into(), Box::new(loader));
    }

    /// Register a ready-made solver under its own name.
    pub fn register_solver<S: MazeSolver + 'static>(&mut self, solver: S) {
        let name = solver.name().to_string();
        let solver: Arc<dyn MazeSolver> = Arc::new(solver);
        self.register(name, move || Ok(Arc::clone(&solver)));
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.loaders.keys().cloned().collect()
    }

    /// Run the loader registered under `name`.
    pub fn load(&self, name: &str) -> Result<Arc<dyn MazeSolver>, PluginLoadError> {
        let loader = self
            .loaders
            .get(name)
            .ok_or_else(|| PluginLoadError::NotFound {
                name: name.to_string(),
                available: self.names(),
            })?;
        loader().map_err(|e| PluginLoadError::Init {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Debug for SolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverRegistry")
            .field("names", &self.names())
            .finish()
    }
}
