//! Search algorithms for maze grids.
//!
//! - **A\*** shortest-path search ([`PathRange::astar_path`])
//! - **BFS** unweighted shortest-path search ([`PathRange::bfs_path`])
//! - **Flood fill** reachability ([`PathRange::flood`])
//!
//! All algorithms operate through [`PathRange`], which owns and reuses
//! internal caches. [`Walkable`] adapts a [`mazerun_core::Grid`] to the
//! pather traits.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, flood fill |
//! | [`WeightedPather`] : [`Pather`] | (cost model) |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod bfs;
mod distance;
mod flood;
mod pathrange;
mod traits;
mod walkable;

pub use distance::manhattan;
pub use pathrange::PathRange;
pub use traits::{AstarPather, Pather, WeightedPather};
pub use walkable::Walkable;
