use std::collections::BinaryHeap;

use mazerun_core::Point;

use crate::PathRange;
use crate::pathrange::{Node, NodeRef};
use crate::traits::AstarPather;

impl PathRange {
    /// Compute a shortest path from `from` to `to` with A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if `to`
    /// cannot be reached inside the current bounds. With an admissible
    /// estimate the path is optimal, and equal-cost alternatives are always
    /// resolved the same way.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;
        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        self.astar_generation = self.astar_generation.wrapping_add(1);
        if self.astar_generation == 0 {
            self.astar_nodes.fill(Node::default());
            self.astar_generation = 1;
        }
        let cur_gen = self.astar_generation;

        self.astar_nodes[start_idx] = Node {
            g: 0,
            parent: crate::pathrange::NONE,
            generation: cur_gen,
            closed: false,
        };
        let h0 = pather.estimate(from, to);
        let mut open = BinaryHeap::from([NodeRef {
            idx: start_idx,
            f: h0,
            h: h0,
        }]);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while let Some(NodeRef { idx: ci, f, h }) = open.pop() {
            let node = self.astar_nodes[ci];
            // An entry superseded by a cheaper one, or already expanded.
            if node.closed || f - h != node.g {
                continue;
            }
            if ci == goal_idx {
                found = true;
                break;
            }
            self.astar_nodes[ci].closed = true;

            let cp = self.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            for &np in &nbuf {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let g = node.g + pather.cost(cp, np);
                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen && (n.closed || g >= n.g) {
                    continue;
                }
                *n = Node {
                    g,
                    parent: ci,
                    generation: cur_gen,
                    closed: false,
                };
                let h = pather.estimate(np, to);
                open.push(NodeRef { idx: ni, f: g + h, h });
            }
        }

        self.nbuf = nbuf;
        found.then(|| self.trace(goal_idx, |i| self.astar_nodes[i].parent))
    }
}
