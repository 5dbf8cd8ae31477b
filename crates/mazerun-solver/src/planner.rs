//! Stepwise path planning.
//!
//! [`PathPlanner`] owns the current plan and hands the caller one
//! [`Direction`] per tick. It plans lazily, replans whenever the plan runs
//! out or the caller is no longer where the plan expects, and delegates the
//! search to a bound external solver when there is one, falling back to
//! [`DefaultSolver`] whenever that solver fails.

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use mazerun_core::{Direction, Grid, Path, Point};

use crate::config::PlannerConfig;
use crate::default::DefaultSolver;
use crate::plugin::{MazeSolver, SolverRegistry};
use crate::sandbox::Sandbox;
use crate::visibility::VisibilityState;

/// Which strategy answers the next planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Default,
    External(String),
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::External(name) => write!(f, "external:{name}"),
        }
    }
}

/// The current plan and how far along it the agent has moved.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlanState {
    path: Path,
    cursor: usize,
}

pub struct PathPlanner {
    config: PlannerConfig,
    default: DefaultSolver,
    sandbox: Sandbox,
    registry: SolverRegistry,
    external: Option<Arc<dyn MazeSolver>>,
    state: Option<PlanState>,
    replans: usize,
    fallbacks: usize,
}

impl Default for PathPlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl PathPlanner {
    /// A planner using the default strategy, with the built-in solvers
    /// available to [`load_external_solver`](Self::load_external_solver).
    pub fn new(config: PlannerConfig) -> Self {
        let registry = SolverRegistry::with_builtins(&config);
        Self::with_registry(registry, config)
    }

    pub fn with_registry(registry: SolverRegistry, config: PlannerConfig) -> Self {
        Self {
            default: DefaultSolver::new(&config),
            sandbox: Sandbox::new(config.time_budget),
            config,
            registry,
            external: None,
            state: None,
            replans: 0,
            fallbacks: 0,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn registry(&self) -> &SolverRegistry {
        &self.registry
    }

    /// Bind the solver registered under `name`.
    ///
    /// On failure the error is logged and the current strategy stays
    /// active. Success only means the solver could be constructed; whether
    /// it answers correctly is checked on every call.
    pub fn load_external_solver(&mut self, name: &str) -> bool {
        match self.registry.load(name) {
            Ok(solver) => {
                info!("bound external solver {:?}", solver.name());
                self.external = Some(solver);
                true
            }
            Err(err) => {
                warn!("{err}; keeping {} strategy", self.active_strategy());
                false
            }
        }
    }

    /// Bind `solver` directly, bypassing the registry.
    pub fn bind_solver(&mut self, solver: Arc<dyn MazeSolver>) {
        info!("bound external solver {:?}", solver.name());
        self.external = Some(solver);
    }

    /// Return to the default strategy.
    pub fn unbind_solver(&mut self) {
        self.external = None;
    }

    pub fn active_strategy(&self) -> Strategy {
        match &self.external {
            Some(solver) => Strategy::External(solver.name().to_string()),
            None => Strategy::Default,
        }
    }

    /// Plan from `start` to `goal` with the active strategy and make the
    /// result the current plan, with its cursor on the first cell.
    ///
    /// A failing external solver is logged and the request is answered by
    /// the default strategy; the external solver stays bound.
    pub fn compute_path(
        &mut self,
        start: Point,
        goal: Point,
        grid: &Grid,
        visibility: &VisibilityState,
    ) -> &[Point] {
        let path = match &self.external {
            Some(solver) => {
                let view = visibility.mask(grid, start, self.config.vision_factor);
                match self.sandbox.run(solver, &view, start, goal) {
                    Ok(path) => path,
                    Err(err) => {
                        warn!("{:?}: {err}; using default strategy", solver.name());
                        self.fallbacks += 1;
                        self.default.solve(grid, start, goal, visibility)
                    }
                }
            }
            None => self.default.solve(grid, start, goal, visibility),
        };
        debug!("planned {} cells from {start} toward {goal}", path.len());
        &self.state.insert(PlanState { path, cursor: 0 }).path
    }

    /// The direction of the next move from `current` toward `goal`, or
    /// `None` when no move is available.
    ///
    /// A plan is computed when there is none, when the cursor has reached
    /// its last cell, or when `current` is not the cell under the cursor.
    /// Every returned direction is a single orthogonal step.
    pub fn next_step(
        &mut self,
        current: Point,
        goal: Point,
        grid: &Grid,
        visibility: &VisibilityState,
    ) -> Option<Direction> {
        let fresh = self.needs_plan(current);
        if fresh {
            self.replan(current, goal, grid, visibility);
        }
        if let Some(dir) = self.advance(current) {
            return Some(dir);
        }
        if fresh || self.plan().is_none_or(|p| p.len() < 2) {
            return None;
        }
        debug!("plan does not continue from {current}, replanning");
        self.replan(current, goal, grid, visibility);
        self.advance(current)
    }

    fn needs_plan(&self, current: Point) -> bool {
        match &self.state {
            None => true,
            Some(s) if s.cursor + 1 >= s.path.len() => true,
            Some(s) => {
                let desync = s.path[s.cursor] != current;
                if desync {
                    debug!("agent at {current}, plan expected {}", s.path[s.cursor]);
                }
                desync
            }
        }
    }

    fn replan(&mut self, current: Point, goal: Point, grid: &Grid, visibility: &VisibilityState) {
        if self.state.is_some() {
            self.replans += 1;
        }
        self.compute_path(current, goal, grid, visibility);
    }

    /// Step along the plan if its next cell is one move from `current`.
    fn advance(&mut self, current: Point) -> Option<Direction> {
        let state = self.state.as_mut()?;
        let next = *state.path.get(state.cursor + 1)?;
        if state.path[state.cursor] != current {
            return None;
        }
        let dir = Direction::from_delta(next - current)?;
        state.cursor += 1;
        Some(dir)
    }

    /// Forget the current plan. The bound solver, if any, stays bound.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// The current plan, if one has been computed since the last reset.
    pub fn plan(&self) -> Option<&[Point]> {
        self.state.as_ref().map(|s| s.path.as_slice())
    }

    /// Index of the plan cell the agent is expected to stand on.
    pub fn cursor(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.cursor)
    }

    /// Plans recomputed because an existing plan ran out or went stale.
    pub fn replans(&self) -> usize {
        self.replans
    }

    /// Requests the external solver failed and the default strategy answered.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }
}

impl fmt::Debug for PathPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPlanner")
            .field("strategy", &self.active_strategy())
            .field("plan", &self.state)
            .field("replans", &self.replans)
            .field("fallbacks", &self.fallbacks)
            .finish()
    }
}
