//! Maze generation for mazerun: a seeded recursive backtracker, power-up
//! placement and start/goal connectivity validation.

pub mod difficulty;
pub mod mapgen;
pub mod validate;

use std::fmt;

pub use difficulty::Difficulty;
pub use mapgen::MazeGenerator;
pub use validate::{is_connected, is_connected_in, reachable, reachable_in};

/// Errors raised while generating a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// The requested size cannot hold a distinct start and goal.
    InvalidSize { width: i32, height: i32 },
    /// Every attempt produced a maze whose goal is unreachable from its start.
    Disconnected { attempts: usize },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "maze: invalid size {width}x{height}")
            }
            Self::Disconnected { attempts } => write!(
                f,
                "maze: goal unreachable from start after {attempts} attempt(s)"
            ),
        }
    }
}

impl std::error::Error for GenError {}
