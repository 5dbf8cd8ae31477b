//! Reachability by flood fill.

use mazerun_core::Point;

use crate::PathRange;
use crate::pathrange::next_generation;
use crate::traits::Pather;

impl PathRange {
    /// Every cell reachable from `from`, `from` included, in the order the
    /// fill reached them. Empty when `from` is out of bounds.
    ///
    /// Afterwards [`flooded`](Self::flooded) answers membership queries for
    /// the same fill.
    pub fn flood<P: Pather>(&mut self, pather: &P, from: Point) -> Vec<Point> {
        let cur_gen = next_generation(&mut self.flood_generation, &mut self.flood_seen);
        let Some(si) = self.idx(from) else {
            return Vec::new();
        };

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut reached = vec![from];
        self.flood_seen[si] = cur_gen;
        self.flood_stack.clear();
        self.flood_stack.push(si);

        while let Some(ci) = self.flood_stack.pop() {
            nbuf.clear();
            pather.neighbors(self.point(ci), &mut nbuf);
            for &np in &nbuf {
                match self.idx(np) {
                    Some(ni) if self.flood_seen[ni] != cur_gen => {
                        self.flood_seen[ni] = cur_gen;
                        self.flood_stack.push(ni);
                        reached.push(np);
                    }
                    _ => {}
                }
            }
        }

        self.nbuf = nbuf;
        reached
    }

    /// Whether the last [`flood`](Self::flood) reached `p`.
    pub fn flooded(&self, p: Point) -> bool {
        self.flood_generation != 0
            && self
                .idx(p)
                .is_some_and(|i| self.flood_seen[i] == self.flood_generation)
    }
}

#[cfg(test)]
mod tests {
    use mazerun_core::{Grid, Point, Tile};

    use crate::{PathRange, Walkable};

    #[test]
    fn fill_stops_at_walls() {
        let mut g = Grid::new(4, 3, Tile::Path);
        for y in 0..3 {
            g.set(Point::new(2, y), Tile::Wall);
        }
        let mut pr = PathRange::new(g.bounds());
        let filled = pr.flood(&Walkable::new(&g), Point::new(0, 0));
        assert_eq!(filled.len(), 6);
        assert!(pr.flooded(Point::new(1, 2)));
        assert!(!pr.flooded(Point::new(3, 0)));
        assert!(!pr.flooded(Point::new(9, 9)));

        // A second fill forgets the first.
        pr.flood(&Walkable::new(&g), Point::new(3, 0));
        assert!(pr.flooded(Point::new(3, 2)));
        assert!(!pr.flooded(Point::new(0, 0)));
    }

    #[test]
    fn nothing_is_flooded_before_a_fill() {
        let g = Grid::new(2, 2, Tile::Path);
        let pr = PathRange::new(g.bounds());
        assert!(!pr.flooded(Point::new(0, 0)));
    }
}
