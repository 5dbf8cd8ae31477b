//! Fog of war: what the agent is allowed to know about the maze.

use std::collections::HashSet;

use mazerun_core::{Grid, Point, Tile};
use mazerun_paths::manhattan;

/// Cells the agent has walked on plus the radius it can see around itself.
///
/// The caller owns and updates this state; solvers only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityState {
    visited: HashSet<Point>,
    vision_range: i32,
}

impl VisibilityState {
    /// Vision range that makes every cell of any realistic maze visible.
    pub const UNLIMITED: i32 = i32::MAX;

    pub fn new(vision_range: i32) -> Self {
        Self {
            visited: HashSet::new(),
            vision_range: vision_range.max(0),
        }
    }

    /// A state that sees the whole maze.
    pub fn unlimited() -> Self {
        Self::new(Self::UNLIMITED)
    }

    /// Builder: mark every position of `cells` as visited.
    pub fn with_visited(mut self, cells: impl IntoIterator<Item = Point>) -> Self {
        self.visited.extend(cells);
        self
    }

    /// Record that the agent stood on `p`.
    pub fn visit(&mut self, p: Point) {
        self.visited.insert(p);
    }

    pub fn visited(&self) -> &HashSet<Point> {
        &self.visited
    }

    pub fn vision_range(&self) -> i32 {
        self.vision_range
    }

    pub fn set_vision_range(&mut self, range: i32) {
        self.vision_range = range.max(0);
    }

    /// Whether `cell` is known to an agent standing on `agent`.
    ///
    /// A cell is known if it was visited, if it lies within
    /// `vision_range × factor` (Manhattan) of the agent, or if it is the
    /// agent's own cell or one it could step into.
    pub fn is_visible(&self, cell: Point, agent: Point, factor: f64) -> bool {
        let d = manhattan(cell, agent);
        d <= 1 || self.visited.contains(&cell) || f64::from(d) <= f64::from(self.vision_range) * factor
    }

    /// Capability-limited copy of `grid`: every cell the agent does not
    /// know is replaced by a wall.
    pub fn mask(&self, grid: &Grid, agent: Point, factor: f64) -> Grid {
        grid.map(|p, t| {
            if self.is_visible(p, agent, factor) {
                t
            } else {
                Tile::Wall
            }
        })
    }
}
