use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use mazerun_core::{Bounds, Point};

/// Index value meaning "no cell".
pub(crate) const NONE: usize = usize::MAX;

/// Per-cell A* record. Only meaningful when `generation` matches the
/// search in progress.
#[derive(Clone, Copy)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: NONE,
            generation: 0,
            closed: false,
        }
    }
}

/// Open-list entry of an A* search.
///
/// The heap pops the smallest `f` first; ties go to the smaller heuristic
/// `h`, then to the smaller row-major cell index, so equal-cost searches
/// always expand cells in the same order.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) h: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so every key compares reversed.
        (other.f, other.h, other.idx).cmp(&(self.f, self.h, self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable search state for one maze size.
///
/// Every search stamps the cells it touches with a fresh generation number
/// instead of clearing its arrays, so repeated queries on same-sized mazes
/// cost no allocation and no reset pass. Keep one per solver and hand it
/// each grid through [`set_bounds`](Self::set_bounds).
#[derive(Clone)]
pub struct PathRange {
    pub(crate) bounds: Bounds,
    // A*
    pub(crate) astar_nodes: Vec<Node>,
    pub(crate) astar_generation: u32,
    // BFS
    pub(crate) bfs_parent: Vec<usize>,
    pub(crate) bfs_seen: Vec<u32>,
    pub(crate) bfs_generation: u32,
    pub(crate) bfs_queue: VecDeque<usize>,
    // flood fill
    pub(crate) flood_seen: Vec<u32>,
    pub(crate) flood_generation: u32,
    pub(crate) flood_stack: Vec<usize>,
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    pub fn new(bounds: Bounds) -> Self {
        let len = bounds.len();
        Self {
            bounds,
            astar_nodes: vec![Node::default(); len],
            astar_generation: 0,
            bfs_parent: vec![NONE; len],
            bfs_seen: vec![0; len],
            bfs_generation: 0,
            bfs_queue: VecDeque::new(),
            flood_seen: vec![0; len],
            flood_generation: 0,
            flood_stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Switch to another maze size. Buffers only grow; a smaller maze
    /// reuses the existing ones. Same bounds keep every stamp.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        let len = bounds.len();
        if len > self.astar_nodes.len() {
            self.astar_nodes.resize(len, Node::default());
            self.bfs_parent.resize(len, NONE);
            self.bfs_seen.resize(len, 0);
            self.flood_seen.resize(len, 0);
        }
        // Indices now map to different cells: invalidate every stamp.
        self.astar_nodes.fill(Node::default());
        self.bfs_seen.fill(0);
        self.flood_seen.fill(0);
        self.astar_generation = 0;
        self.bfs_generation = 0;
        self.flood_generation = 0;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.bounds.index(p)
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.bounds.point(idx)
    }

    /// Follow `parent` links back from `end` and return the forward path.
    pub(crate) fn trace(&self, end: usize, parent: impl Fn(usize) -> usize) -> Vec<Point> {
        let mut path: Vec<Point> = std::iter::successors(Some(end), |&i| {
            let p = parent(i);
            (p != NONE).then_some(p)
        })
        .map(|i| self.point(i))
        .collect();
        path.reverse();
        path
    }
}

impl Default for PathRange {
    /// An empty range; the first [`set_bounds`](Self::set_bounds) sizes it.
    fn default() -> Self {
        Self::new(Bounds::new(0, 0))
    }
}

impl fmt::Debug for PathRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathRange")
            .field("bounds", &self.bounds)
            .field("capacity", &self.astar_nodes.len())
            .finish_non_exhaustive()
    }
}

/// Advance a generation counter. When it wraps, the stamps are cleared so
/// that old entries cannot alias the new generation.
pub(crate) fn next_generation(generation: &mut u32, stamps: &mut [u32]) -> u32 {
    *generation = generation.wrapping_add(1);
    if *generation == 0 {
        stamps.fill(0);
        *generation = 1;
    }
    *generation
}
