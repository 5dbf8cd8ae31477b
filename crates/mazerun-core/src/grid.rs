//! An immutable-by-default maze snapshot.
//!
//! [`Grid`] stores its [`Tile`] matrix in shared backing storage
//! (`Arc<Vec<Tile>>`): cloning a grid is cheap, which lets the planner hand
//! a snapshot to a solver thread, and [`Grid::set`] copies the buffer only
//! when it is shared.

use std::fmt;
use std::sync::Arc;

use crate::geom::{Bounds, Point};
use crate::tile::Tile;

/// Errors raised when decoding a grid from its integer matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or a first row without cells.
    Empty,
    /// A row whose length differs from the first row.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The matrix does not fit `i32` coordinates.
    TooLarge,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::TooLarge => write!(f, "grid: dimensions exceed coordinate range"),
        }
    }
}

impl std::error::Error for GridError {}

/// A `width × height` matrix of [`Tile`] values, indexed `cell[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")
)]
pub struct Grid {
    cells: Arc<Vec<Tile>>,
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a grid with every cell set to `fill`.
    ///
    /// Negative dimensions are clamped to zero.
    pub fn new(width: i32, height: i32, fill: Tile) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: Arc::new(vec![fill; (width as usize) * (height as usize)]),
            width,
            height,
        }
    }

    /// Decode a grid from rows of integer tile codes (`rows[y][x]`).
    pub fn from_codes<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let expected = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if expected == 0 {
            return Err(GridError::Empty);
        }
        let width = i32::try_from(expected).map_err(|_| GridError::TooLarge)?;
        let height = i32::try_from(rows.len()).map_err(|_| GridError::TooLarge)?;
        let mut cells = Vec::with_capacity(expected * rows.len());
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != expected {
                return Err(GridError::Ragged {
                    row,
                    expected,
                    found: r.len(),
                });
            }
            cells.extend(r.iter().map(|&c| Tile::from_code(c)));
        }
        Ok(Self {
            cells: Arc::new(cells),
            width,
            height,
        })
    }

    /// Encode the grid as rows of integer tile codes.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height as usize];
        }
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|t| t.code()).collect())
            .collect()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the grid contains the given point.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Get the tile at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.bounds().index(p).map(|i| self.cells[i])
    }

    /// Set the tile at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, tile: Tile) {
        if let Some(i) = self.bounds().index(p) {
            Arc::make_mut(&mut self.cells)[i] = tile;
        }
    }

    /// Fill the entire grid with the given tile.
    pub fn fill(&mut self, tile: Tile) {
        Arc::make_mut(&mut self.cells).fill(tile);
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_traversable(&self, p: Point) -> bool {
        self.at(p).is_some_and(Tile::is_traversable)
    }

    /// First position (row-major) holding `tile`.
    pub fn find(&self, tile: Tile) -> Option<Point> {
        self.iter().find(|&(_, t)| t == tile).map(|(p, _)| p)
    }

    /// Position of the start marker, if any.
    pub fn start(&self) -> Option<Point> {
        self.find(Tile::Start)
    }

    /// Position of the goal marker, if any.
    pub fn goal(&self) -> Option<Point> {
        self.find(Tile::Goal)
    }

    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, Tile) -> bool) -> usize {
        self.iter().filter(|&(p, t)| f(p, t)).count()
    }

    /// Build a new grid by transforming every cell.
    pub fn map(&self, mut f: impl FnMut(Point, Tile) -> Tile) -> Grid {
        let cells = self.iter().map(|(p, t)| f(p, t)).collect();
        Grid {
            cells: Arc::new(cells),
            width: self.width,
            height: self.height,
        }
    }

    /// Iterate over `(Point, Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds()
            .iter()
            .zip(self.cells.iter().copied())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let t = self.at(Point::new(x, y)).unwrap_or(Tile::Wall);
                write!(f, "{}", t.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, GridError> {
        Grid::from_codes(&rows)
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(g: Grid) -> Self {
        g.to_codes()
    }
}
