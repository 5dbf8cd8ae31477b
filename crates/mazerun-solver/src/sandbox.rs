//! Isolated execution of external solvers.
//!
//! A [`Sandbox`] runs one solver call, turns every way it can go wrong into
//! a [`SolverExecutionError`] and checks the returned path against the view
//! the solver was given.
//!
//! With a time budget the call runs on its own named thread and the caller
//! waits at most that long. A solver that overruns is abandoned: its thread
//! keeps running detached and its eventual result is dropped. While that
//! thread is still alive every further call fails with
//! [`SolverExecutionError::Busy`] without starting another one, so a solver
//! that never returns costs one thread, not one per call.

use std::any::Any;
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;
use mazerun_core::{Grid, Path, Point};

use crate::plugin::{BoxError, MazeSolver};

/// Errors raised while running an external solver.
#[derive(Debug)]
pub enum SolverExecutionError {
    /// The solver returned an error.
    Failed(String),
    /// The solver panicked.
    Panicked(String),
    /// The solver did not answer within its budget.
    TimedOut(Duration),
    /// The worker of an earlier timed-out call is still running.
    Busy(String),
    /// The worker thread could not be started.
    Spawn(io::Error),
    /// The solver answered with a path that cannot be followed.
    InvalidPath(String),
}

impl fmt::Display for SolverExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(msg) => write!(f, "solver failed: {msg}"),
            Self::Panicked(msg) => write!(f, "solver panicked: {msg}"),
            Self::TimedOut(budget) => write!(f, "solver exceeded its {budget:?} budget"),
            Self::Busy(worker) => write!(f, "{worker} is still running an abandoned call"),
            Self::Spawn(err) => write!(f, "solver thread could not start: {err}"),
            Self::InvalidPath(reason) => write!(f, "solver returned an invalid path: {reason}"),
        }
    }
}

impl std::error::Error for SolverExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn(err) => Some(err),
            _ => None,
        }
    }
}

type Outcome = Result<Result<Path, BoxError>, Box<dyn Any + Send>>;

/// Runs solver calls under an optional wall-clock budget.
#[derive(Debug)]
pub struct Sandbox {
    budget: Option<Duration>,
    /// Worker of the last timed-out call, kept until it exits.
    straggler: Option<JoinHandle<()>>,
}

impl Sandbox {
    pub fn new(budget: Option<Duration>) -> Self {
        Self {
            budget,
            straggler: None,
        }
    }

    /// Run `solver` on `view` and validate its answer.
    ///
    /// An empty path is a valid answer meaning "no path".
    pub fn run(
        &mut self,
        solver: &Arc<dyn MazeSolver>,
        view: &Grid,
        start: Point,
        goal: Point,
    ) -> Result<Path, SolverExecutionError> {
        let budget = self.budget;
        let outcome = match budget {
            None => panic::catch_unwind(AssertUnwindSafe(|| solver.solve(view, start, goal))),
            Some(budget) => self.run_threaded(solver, view, start, goal, budget)?,
        };
        let path = match outcome {
            Ok(Ok(path)) => path,
            Ok(Err(err)) => return Err(SolverExecutionError::Failed(err.to_string())),
            Err(payload) => return Err(SolverExecutionError::Panicked(panic_message(&*payload))),
        };
        validate_path(view, start, &path)?;
        debug!("solver {:?} answered with {} cells", solver.name(), path.len());
        Ok(path)
    }

    fn run_threaded(
        &mut self,
        solver: &Arc<dyn MazeSolver>,
        view: &Grid,
        start: Point,
        goal: Point,
        budget: Duration,
    ) -> Result<Outcome, SolverExecutionError> {
        if let Some(straggler) = self.straggler.take() {
            if !straggler.is_finished() {
                let name = straggler.thread().name().unwrap_or("solver thread").to_string();
                self.straggler = Some(straggler);
                return Err(SolverExecutionError::Busy(name));
            }
            debug!("abandoned solver thread has exited");
            // Its answer went to a receiver that no longer exists.
            let _ = straggler.join();
        }

        let (tx, rx) = mpsc::channel();
        let worker = Arc::clone(solver);
        let view = view.clone();
        let handle = thread::Builder::new()
            .name(format!("solver-{}", solver.name()))
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| worker.solve(&view, start, goal)));
                // The receiver is gone once the caller has timed out.
                let _ = tx.send(outcome);
            })
            .map_err(SolverExecutionError::Spawn)?;

        match rx.recv_timeout(budget) {
            Ok(outcome) => Ok(outcome),
            Err(RecvTimeoutError::Timeout) => {
                self.straggler = Some(handle);
                Err(SolverExecutionError::TimedOut(budget))
            }
            Err(RecvTimeoutError::Disconnected) => Err(SolverExecutionError::Panicked(
                "worker exited without an answer".to_string(),
            )),
        }
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new(Some(Duration::from_millis(250)))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Check that `path` can be followed on `view` from `start`.
///
/// The path must begin at `start`, and every later cell must be a walkable
/// cell of the view exactly one orthogonal step from the previous one.
pub fn validate_path(view: &Grid, start: Point, path: &[Point]) -> Result<(), SolverExecutionError> {
    let Some(&first) = path.first() else {
        return Ok(());
    };
    if first != start {
        return Err(SolverExecutionError::InvalidPath(format!(
            "begins at {first}, expected {start}"
        )));
    }
    for (i, w) in path.windows(2).enumerate() {
        let (from, to) = (w[0], w[1]);
        if !from.is_adjacent(to) {
            return Err(SolverExecutionError::InvalidPath(format!(
                "step {i} jumps from {from} to {to}"
            )));
        }
        if !view.is_traversable(to) {
            return Err(SolverExecutionError::InvalidPath(format!(
                "step {i} enters {to}, which is a wall or unknown"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{BfsSolver, FnSolver};
    use mazerun_core::Tile;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn open(w: i32, h: i32) -> Grid {
        Grid::new(w, h, Tile::Path)
    }

    fn arc<S: MazeSolver + 'static>(s: S) -> Arc<dyn MazeSolver> {
        Arc::new(s)
    }

    #[test]
    fn inline_and_threaded_agree() {
        let g = open(4, 4);
        let solver = arc(BfsSolver::default());
        let goal = Point::new(3, 3);
        let a = Sandbox::new(None).run(&solver, &g, Point::ZERO, goal).unwrap();
        let b = Sandbox::default().run(&solver, &g, Point::ZERO, goal).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 7);
    }

    #[test]
    fn solver_error_is_failed() {
        let solver = arc(FnSolver::new("err", |_: &Grid, _: Point, _: Point| {
            Err("no idea".into())
        }));
        for mut sandbox in [Sandbox::new(None), Sandbox::default()] {
            let err = sandbox.run(&solver, &open(2, 2), Point::ZERO, Point::new(1, 1)).unwrap_err();
            assert!(matches!(&err, SolverExecutionError::Failed(m) if m == "no idea"));
        }
    }

    #[test]
    fn panic_is_contained() {
        let solver = arc(FnSolver::new("boom", |_: &Grid, _: Point, _: Point| -> Result<Path, BoxError> {
            panic!("kaboom")
        }));
        for mut sandbox in [Sandbox::new(None), Sandbox::default()] {
            let err = sandbox.run(&solver, &open(2, 2), Point::ZERO, Point::new(1, 1)).unwrap_err();
            assert!(matches!(&err, SolverExecutionError::Panicked(m) if m == "kaboom"));
        }
    }

    #[test]
    fn slow_solver_times_out() {
        let solver = arc(FnSolver::new("slow", |_: &Grid, start: Point, _: Point| {
            thread::sleep(Duration::from_millis(500));
            Ok(vec![start])
        }));
        let budget = Duration::from_millis(20);
        let err = Sandbox::new(Some(budget))
            .run(&solver, &open(2, 2), Point::ZERO, Point::new(1, 1))
            .unwrap_err();
        assert!(matches!(err, SolverExecutionError::TimedOut(b) if b == budget));
    }

    #[test]
    fn stuck_worker_is_not_respawned() {
        let entered = Arc::new(AtomicUsize::new(0));
        let release = Arc::new(AtomicBool::new(false));
        let solver = {
            let (entered, release) = (Arc::clone(&entered), Arc::clone(&release));
            arc(FnSolver::new("stuck", move |_: &Grid, start: Point, _: Point| {
                entered.fetch_add(1, Ordering::SeqCst);
                while !release.load(Ordering::SeqCst) {
                    thread::sleep(Duration::from_millis(1));
                }
                Ok(vec![start])
            }))
        };
        let g = open(2, 2);
        let goal = Point::new(1, 1);
        let mut sandbox = Sandbox::new(Some(Duration::from_millis(50)));

        let first = sandbox.run(&solver, &g, Point::ZERO, goal);
        assert!(matches!(first, Err(SolverExecutionError::TimedOut(_))));
        for _ in 0..20 {
            let err = sandbox.run(&solver, &g, Point::ZERO, goal).unwrap_err();
            assert!(matches!(&err, SolverExecutionError::Busy(name) if name == "solver-stuck"));
        }
        assert_eq!(entered.load(Ordering::SeqCst), 1);

        // Once the abandoned worker exits, calls go through again.
        release.store(true, Ordering::SeqCst);
        let mut answer = sandbox.run(&solver, &g, Point::ZERO, goal);
        for _ in 0..200 {
            if !matches!(answer, Err(SolverExecutionError::Busy(_))) {
                break;
            }
            thread::sleep(Duration::from_millis(5));
            answer = sandbox.run(&solver, &g, Point::ZERO, goal);
        }
        assert_eq!(answer.unwrap(), vec![Point::ZERO]);
        assert_eq!(entered.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn empty_answer_is_accepted() {
        let solver = arc(FnSolver::new("none", |_: &Grid, _: Point, _: Point| Ok(Vec::new())));
        let path = Sandbox::new(None)
            .run(&solver, &open(2, 2), Point::ZERO, Point::new(1, 1))
            .unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn validation_rejects_bad_paths() {
        let g = Grid::from_codes(&[[0u8, 1, 0], [0, 0, 0]]).unwrap();
        let s = Point::ZERO;
        assert!(validate_path(&g, s, &[s, Point::new(0, 1), Point::new(1, 1)]).is_ok());
        assert!(validate_path(&g, s, &[Point::new(0, 1)]).is_err());
        assert!(validate_path(&g, s, &[s, Point::new(1, 1)]).is_err());
        assert!(validate_path(&g, s, &[s, Point::new(1, 0)]).is_err());
        assert!(validate_path(&g, s, &[s, Point::new(-1, 0)]).is_err());
    }
}
