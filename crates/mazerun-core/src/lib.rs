//! **mazerun-core**: shared maze types.
//!
//! This crate provides the data model used across the *mazerun* workspace:
//! geometry primitives, the tile legend and the grid snapshot handed to
//! generators, solvers and the planner.

pub mod geom;
pub mod grid;
pub mod tile;

pub use geom::{Bounds, Direction, Point};
pub use grid::{Grid, GridError};
pub use tile::{PowerupKind, Tile};

/// An ordered sequence of positions. The first element is where the walk
/// starts; a path of length 0 or 1 means there is nowhere to go.
pub type Path = Vec<Point>;
