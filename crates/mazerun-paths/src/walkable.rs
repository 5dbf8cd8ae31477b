use mazerun_core::{Grid, Point};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Unit-cost 4-connected pather over a [`Grid`]: every tile except a wall
/// can be entered.
pub struct Walkable<'a> {
    grid: &'a Grid,
}

impl<'a> Walkable<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }
}

impl Pather for Walkable<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(
            p.neighbors_4()
                .into_iter()
                .filter(|&n| self.grid.is_traversable(n)),
        );
    }
}

impl WeightedPather for Walkable<'_> {}

impl AstarPather for Walkable<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

#[cfg(test)]
mod tests {
    use mazerun_core::Tile;

    use super::*;

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let g = Grid::from_codes(&[[0u8, 4, 0], [1, 0, 0]]).unwrap();
        let mut buf = Vec::new();
        Walkable::new(&g).neighbors(Point::new(0, 0), &mut buf);
        // Down is a wall, Up and Left leave the grid; power-ups are walkable.
        assert_eq!(buf, vec![Point::new(1, 0)]);
        assert_eq!(g.at(Point::new(1, 0)).map(Tile::is_traversable), Some(true));

        buf.clear();
        Walkable::new(&g).neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf, vec![Point::new(2, 1), Point::new(1, 0)]);
    }
}
