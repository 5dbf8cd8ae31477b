//! Geometry primitives: [`Point`], [`Direction`] and maze [`Bounds`].

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer maze position. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four orthogonal neighbours, in [`Direction::ALL`] order
    /// (down, right, up, left).
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        Direction::ALL.map(|d| self + d.delta())
    }

    /// Whether `self` is exactly one orthogonal step away from `other`.
    #[inline]
    pub fn is_adjacent(self, other: Point) -> bool {
        Direction::from_delta(other - self).is_some()
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One orthogonal unit move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

impl Direction {
    /// Fixed expansion order shared by every search and by the
    /// exploration fallback.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    /// Unit vector of the move.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Direction::Down => Point::new(0, 1),
            Direction::Right => Point::new(1, 0),
            Direction::Up => Point::new(0, -1),
            Direction::Left => Point::new(-1, 0),
        }
    }

    /// The direction whose [`delta`](Self::delta) equals `d`, or `None` if
    /// `d` is not a unit orthogonal vector.
    #[inline]
    pub const fn from_delta(d: Point) -> Option<Direction> {
        match (d.x, d.y) {
            (0, 1) => Some(Direction::Down),
            (1, 0) => Some(Direction::Right),
            (0, -1) => Some(Direction::Up),
            (-1, 0) => Some(Direction::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Down => "down",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Left => "left",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The extent of a maze: every point with `0 <= x < width` and
/// `0 <= y < height`. Cells are numbered row-major from the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// Negative dimensions are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    /// Row-major index of `p`, or `None` outside the bounds.
    #[inline]
    pub fn index(self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| p.y as usize * self.width as usize + p.x as usize)
    }

    /// The point with row-major index `i`. `i` must be below [`len`](Self::len).
    #[inline]
    pub fn point(self, i: usize) -> Point {
        let w = self.width.max(1) as usize;
        Point::new((i % w) as i32, (i / w) as i32)
    }

    /// Every point, row by row.
    pub fn iter(self) -> impl Iterator<Item = Point> + Clone {
        let w = self.width;
        (0..self.height).flat_map(move |y| (0..w).map(move |x| Point::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1, 2);
        let b = Point::new(3, 4);
        assert_eq!(a + b, Point::new(4, 6));
        assert_eq!(b - a, Point::new(2, 2));
        assert_eq!(a * 3, Point::new(3, 6));
    }

    #[test]
    fn point_order_is_row_major() {
        let mut pts = vec![Point::new(2, 0), Point::new(0, 1), Point::new(1, 0)];
        pts.sort();
        assert_eq!(pts, vec![Point::new(1, 0), Point::new(2, 0), Point::new(0, 1)]);
    }

    #[test]
    fn neighbors_follow_direction_order() {
        let n = Point::new(5, 5).neighbors_4();
        assert_eq!(
            n,
            [
                Point::new(5, 6),
                Point::new(6, 5),
                Point::new(5, 4),
                Point::new(4, 5)
            ]
        );
    }

    #[test]
    fn direction_delta_round_trip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_delta(d.delta()), Some(d));
        }
        assert_eq!(Direction::from_delta(Point::new(1, 1)), None);
        assert_eq!(Direction::from_delta(Point::new(2, 0)), None);
        assert_eq!(Direction::from_delta(Point::ZERO), None);
    }

    #[test]
    fn adjacency() {
        let p = Point::new(3, 3);
        assert!(p.is_adjacent(Point::new(3, 4)));
        assert!(!p.is_adjacent(Point::new(4, 4)));
        assert!(!p.is_adjacent(p));
    }

    #[test]
    fn bounds_index_round_trip() {
        let b = Bounds::new(3, 2);
        assert_eq!(b.len(), 6);
        for (i, p) in b.iter().enumerate() {
            assert_eq!(b.index(p), Some(i));
            assert_eq!(b.point(i), p);
        }
        assert_eq!(b.index(Point::new(3, 0)), None);
        assert_eq!(b.index(Point::new(0, -1)), None);
    }

    #[test]
    fn bounds_iterate_row_major() {
        let pts: Vec<Point> = Bounds::new(3, 2).iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[2], Point::new(2, 0));
        assert_eq!(pts[3], Point::new(0, 1));
        let mut sorted = pts.clone();
        sorted.sort();
        assert_eq!(sorted, pts);
    }

    #[test]
    fn degenerate_bounds_are_empty() {
        let b = Bounds::new(0, 5);
        assert!(b.is_empty());
        assert_eq!(b.iter().count(), 0);
        assert_eq!(Bounds::new(-2, 3), Bounds::new(0, 3));
    }
}
