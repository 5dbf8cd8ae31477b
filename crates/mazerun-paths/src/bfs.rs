use mazerun_core::Point;

use crate::PathRange;
use crate::pathrange::{NONE, next_generation};
use crate::traits::Pather;

impl PathRange {
    /// Compute an unweighted shortest path from `from` to `to` with a
    /// breadth-first search.
    ///
    /// Neighbors are expanded in the order the pather yields them and each
    /// cell records the first predecessor that reached it, so the result is
    /// deterministic. Returns the full path (including both endpoints) or
    /// `None` if `to` cannot be reached within the current range.
    pub fn bfs_path<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        let cur_gen = next_generation(&mut self.bfs_generation, &mut self.bfs_seen);

        self.bfs_queue.clear();
        self.bfs_seen[start_idx] = cur_gen;
        self.bfs_parent[start_idx] = NONE;
        self.bfs_queue.push_back(start_idx);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        'search: while let Some(ci) = self.bfs_queue.pop_front() {
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_seen[ni] == cur_gen {
                    continue;
                }
                self.bfs_seen[ni] = cur_gen;
                self.bfs_parent[ni] = ci;
                if ni == goal_idx {
                    found = true;
                    break 'search;
                }
                self.bfs_queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;

        if !found {
            return None;
        }
        Some(self.trace(goal_idx, |i| self.bfs_parent[i]))
    }
}
