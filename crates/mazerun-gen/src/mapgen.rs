//! Maze generation.
//!
//! [`MazeGenerator`] carves a perfect maze with a randomized depth-first
//! backtracker. Cells on the even-coordinate sublattice are rooms; the odd
//! cells between two rooms are corridors. Carving starts from the top-left
//! room, after which the top-left cell is marked [`Tile::Start`] and the
//! bottom-right cell [`Tile::Goal`].
//!
//! When a dimension is even the bottom-right cell is not a room and may
//! stay cut off from the carved tree. Use
//! [`generate_connected`](MazeGenerator::generate_connected), or call
//! [`is_connected`](crate::is_connected) yourself, before accepting a grid.

use log::{debug, info};
use mazerun_core::{Direction, Grid, Point, PowerupKind, Tile};
use mazerun_paths::PathRange;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngExt, SeedableRng};

use crate::GenError;
use crate::validate::is_connected_in;

/// One pending room of the backtracker: its directions in shuffled order
/// and how many of them have been tried.
struct Frame {
    room: Point,
    dirs: [Direction; 4],
    next: usize,
}

/// Maze generator owning an explicit random source.
///
/// The carving order depends only on the values drawn from `rng`, so two
/// generators built from the same seed produce identical grids.
pub struct MazeGenerator<R: Rng> {
    pub rng: R,
}

impl MazeGenerator<StdRng> {
    /// Create a generator backed by a [`StdRng`] seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MazeGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a `width × height` maze.
    ///
    /// Fails only when the dimensions cannot hold distinct start and goal
    /// cells.
    pub fn generate(&mut self, width: i32, height: i32) -> Result<Grid, GenError> {
        if width < 1 || height < 1 || (width == 1 && height == 1) {
            return Err(GenError::InvalidSize { width, height });
        }

        let mut grid = Grid::new(width, height, Tile::Wall);
        let origin = Point::ZERO;
        grid.set(origin, Tile::Path);

        let mut stack = vec![self.frame(origin)];
        while let Some(top) = stack.last_mut() {
            if top.next == top.dirs.len() {
                stack.pop();
                continue;
            }
            let d = top.dirs[top.next];
            top.next += 1;
            let room = top.room;

            let target = room + d.delta() * 2;
            if grid.at(target) != Some(Tile::Wall) {
                continue;
            }
            grid.set(room + d.delta(), Tile::Path);
            grid.set(target, Tile::Path);
            let frame = self.frame(target);
            stack.push(frame);
        }

        grid.set(origin, Tile::Start);
        grid.set(Point::new(width - 1, height - 1), Tile::Goal);
        debug!(
            "generated {width}x{height} maze with {} open cells",
            grid.count_fn(|_, t| t.is_traversable())
        );
        Ok(grid)
    }

    fn frame(&mut self, room: Point) -> Frame {
        let mut dirs = Direction::ALL;
        dirs.shuffle(&mut self.rng);
        Frame {
            room,
            dirs,
            next: 0,
        }
    }

    /// Scatter up to `count` power-ups over plain path cells.
    ///
    /// Walls, the start and the goal are never overwritten, so placement
    /// cannot close a corridor. Returns how many power-ups were placed,
    /// which is less than `count` only when the maze runs out of free cells.
    pub fn place_powerups(&mut self, grid: &mut Grid, count: usize) -> usize {
        let mut free: Vec<Point> = grid
            .iter()
            .filter(|&(_, t)| t == Tile::Path)
            .map(|(p, _)| p)
            .collect();

        let mut placed = 0;
        while placed < count && !free.is_empty() {
            let p = free.swap_remove(self.rng.random_range(0..free.len()));
            let kinds = PowerupKind::PLACEABLE;
            let kind = kinds[self.rng.random_range(0..kinds.len())];
            grid.set(p, Tile::Powerup(kind));
            placed += 1;
        }
        placed
    }

    /// Generate mazes until one connects start and goal.
    ///
    /// Each attempt generates a fresh grid, places `powerups` power-ups and
    /// checks reachability. After `max_attempts` failed attempts this gives
    /// up with [`GenError::Disconnected`].
    pub fn generate_connected(
        &mut self,
        width: i32,
        height: i32,
        powerups: usize,
        max_attempts: usize,
    ) -> Result<Grid, GenError> {
        let mut pr = PathRange::default();
        for attempt in 1..=max_attempts {
            let mut grid = self.generate(width, height)?;
            self.place_powerups(&mut grid, powerups);
            if is_connected_in(&mut pr, &grid) {
                return Ok(grid);
            }
            info!("maze attempt {attempt}/{max_attempts} left the goal unreachable, regenerating");
        }
        Err(GenError::Disconnected {
            attempts: max_attempts,
        })
    }
}
