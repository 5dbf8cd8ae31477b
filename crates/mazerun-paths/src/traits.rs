use mazerun_core::Point;

/// Movement model for a search: which cells can be entered from `p`.
pub trait Pather {
    /// Push the enterable neighbors of `p` onto `buf`, in the order the
    /// search should expand them. `buf` arrives empty.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// A [`Pather`] whose moves carry a cost.
pub trait WeightedPather: Pather {
    /// Cost of the move `from → to`, always positive. Maze corridors cost
    /// one per step unless overridden.
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

/// A [`WeightedPather`] with a goal-distance estimate for A*.
pub trait AstarPather: WeightedPather {
    /// Lower bound on the cost from `from` to `to`. An estimate that
    /// overshoots makes A* return suboptimal paths.
    fn estimate(&self, from: Point, to: Point) -> i32;
}
