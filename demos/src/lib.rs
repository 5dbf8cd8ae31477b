//! Headless auto-play session shared by the `mazerun` binary.
//!
//! A [`Session`] plays the role of the game loop: it owns the maze, the
//! agent position and the fog-of-war state, asks the planner for one move
//! per tick and applies it. Stepping on a power-up picks it up; a teleport
//! power-up nudges the agent one cell toward the goal, off the planner's
//! plan.

use std::fmt;

use log::{debug, info};
use mazerun_core::{Direction, Grid, Point, PowerupKind, Tile};
use mazerun_solver::{PathPlanner, Strategy, VisibilityState};
use rand::{Rng, RngExt};

/// Errors raised when a session cannot start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    MissingStart,
    MissingGoal,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => write!(f, "session: maze has no start cell"),
            Self::MissingGoal => write!(f, "session: maze has no goal cell"),
        }
    }
}

impl std::error::Error for SessionError {}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Moved(Direction),
    /// The agent was already on the goal.
    Arrived,
    /// The planner had no move to offer.
    Stuck,
}

pub struct Session<R: Rng> {
    grid: Grid,
    planner: PathPlanner,
    visibility: VisibilityState,
    pos: Point,
    goal: Point,
    trail: Vec<Point>,
    collected: Vec<PowerupKind>,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(
        grid: Grid,
        planner: PathPlanner,
        vision_range: i32,
        rng: R,
    ) -> Result<Self, SessionError> {
        let pos = grid.start().ok_or(SessionError::MissingStart)?;
        let goal = grid.goal().ok_or(SessionError::MissingGoal)?;
        let mut visibility = VisibilityState::new(vision_range);
        visibility.visit(pos);
        Ok(Self {
            grid,
            planner,
            visibility,
            pos,
            goal,
            trail: vec![pos],
            collected: Vec::new(),
            rng,
        })
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn planner(&self) -> &PathPlanner {
        &self.planner
    }

    pub fn trail(&self) -> &[Point] {
        &self.trail
    }

    pub fn reached(&self) -> bool {
        self.pos == self.goal
    }

    /// Ask the planner for a move and apply it.
    pub fn tick(&mut self) -> Tick {
        if self.reached() {
            return Tick::Arrived;
        }
        let Some(dir) = self
            .planner
            .next_step(self.pos, self.goal, &self.grid, &self.visibility)
        else {
            return Tick::Stuck;
        };
        let next = self.pos + dir.delta();
        if !self.grid.is_traversable(next) {
            // The planner only plans over walkable cells.
            debug!("planner proposed a blocked move to {next}");
            return Tick::Stuck;
        }
        self.enter(next);
        self.pick_up();
        Tick::Moved(dir)
    }

    fn enter(&mut self, p: Point) {
        self.pos = p;
        self.visibility.visit(p);
        self.trail.push(p);
    }

    fn pick_up(&mut self) {
        let Some(Tile::Powerup(kind)) = self.grid.at(self.pos) else {
            return;
        };
        self.grid.set(self.pos, Tile::Path);
        self.collected.push(kind);
        info!("picked up {} power-up at {}", kind.name(), self.pos);
        if kind == PowerupKind::TELEPORT {
            self.nudge_toward_goal();
        }
    }

    /// Move one cell toward the goal along a randomly chosen axis, if that
    /// cell is walkable.
    fn nudge_toward_goal(&mut self) {
        let d = self.goal - self.pos;
        let step = if self.rng.random_bool(0.5) {
            Point::new(if d.x > 0 { 1 } else { -1 }, 0)
        } else {
            Point::new(0, if d.y > 0 { 1 } else { -1 })
        };
        let target = self.pos + step;
        if self.grid.is_traversable(target) {
            debug!("teleported from {} to {target}", self.pos);
            self.enter(target);
        }
    }

    /// Tick until the agent arrives, gets stuck or `max_steps` moves have
    /// been made. `on_tick` sees the session after every tick.
    pub fn run(&mut self, max_steps: usize, mut on_tick: impl FnMut(&Self, Tick)) -> Summary {
        let mut moves = 0;
        while moves < max_steps {
            let tick = self.tick();
            on_tick(self, tick);
            match tick {
                Tick::Moved(_) => moves += 1,
                Tick::Arrived | Tick::Stuck => break,
            }
        }
        self.summary()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            steps: self.trail.len() - 1,
            replans: self.planner.replans(),
            fallbacks: self.planner.fallbacks(),
            powerups: self.collected.len(),
            strategy: self.planner.active_strategy(),
            reached: self.reached(),
        }
    }

    /// The maze with the walked trail (`.`) and the agent (`@`).
    pub fn render(&self) -> String {
        let mut canvas: Vec<Vec<char>> = (0..self.grid.height())
            .map(|y| {
                (0..self.grid.width())
                    .map(|x| self.grid.at(Point::new(x, y)).map_or('#', Tile::glyph))
                    .collect()
            })
            .collect();
        for &p in &self.trail {
            if self.grid.at(p) == Some(Tile::Path) {
                canvas[p.y as usize][p.x as usize] = '.';
            }
        }
        canvas[self.pos.y as usize][self.pos.x as usize] = '@';
        let mut out = String::new();
        for row in canvas {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

/// Outcome of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub steps: usize,
    pub replans: usize,
    pub fallbacks: usize,
    pub powerups: usize,
    pub strategy: Strategy,
    pub reached: bool,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.reached { "reached the goal" } else { "did not reach the goal" };
        write!(
            f,
            "{outcome} in {} steps ({} replans, {} fallbacks, {} power-ups, strategy {})",
            self.steps, self.replans, self.fallbacks, self.powerups, self.strategy
        )
    }
}
