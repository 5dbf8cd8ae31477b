//! The [`Tile`] type and its integer legend.
//!
//! | code | tile |
//! |---|---|
//! | 0 | [`Tile::Path`] |
//! | 1 | [`Tile::Wall`] |
//! | 2 | [`Tile::Start`] |
//! | 3 | [`Tile::Goal`] |
//! | ≥ 4 | [`Tile::Powerup`] |

use std::fmt;

/// A typed power-up. The wrapped value is the tile code (always ≥ 4).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerupKind(u8);

impl PowerupKind {
    pub const SPEED: Self = Self(4);
    pub const REVEAL: Self = Self(5);
    pub const TELEPORT: Self = Self(6);

    /// Kinds the maze generator knows how to place.
    pub const PLACEABLE: [PowerupKind; 3] = [Self::SPEED, Self::REVEAL, Self::TELEPORT];

    /// Wrap a raw tile code. Returns `None` for codes below 4.
    pub const fn from_code(code: u8) -> Option<Self> {
        if code >= 4 { Some(Self(code)) } else { None }
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    /// Human-readable name for the known kinds.
    pub fn name(self) -> &'static str {
        match self.0 {
            4 => "speed",
            5 => "reveal",
            6 => "teleport",
            _ => "unknown",
        }
    }
}

impl fmt::Display for PowerupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name(), self.0)
    }
}

/// One cell of the maze matrix.
///
/// Everything except [`Tile::Wall`] can be walked on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Path,
    Wall,
    Start,
    Goal,
    Powerup(PowerupKind),
}

impl Tile {
    /// Decode a tile from the integer legend. Total: every code maps to a tile.
    pub const fn from_code(code: u8) -> Tile {
        match code {
            0 => Tile::Path,
            1 => Tile::Wall,
            2 => Tile::Start,
            3 => Tile::Goal,
            c => Tile::Powerup(PowerupKind(c)),
        }
    }

    /// Encode the tile with the integer legend.
    pub const fn code(self) -> u8 {
        match self {
            Tile::Path => 0,
            Tile::Wall => 1,
            Tile::Start => 2,
            Tile::Goal => 3,
            Tile::Powerup(kind) => kind.0,
        }
    }

    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, Tile::Wall)
    }

    #[inline]
    pub const fn is_traversable(self) -> bool {
        !self.is_wall()
    }

    /// Glyph used by the grid's text rendering.
    pub const fn glyph(self) -> char {
        match self {
            Tile::Path => ' ',
            Tile::Wall => '#',
            Tile::Start => 'S',
            Tile::Goal => 'G',
            Tile::Powerup(_) => '*',
        }
    }
}

impl From<u8> for Tile {
    fn from(code: u8) -> Self {
        Tile::from_code(code)
    }
}

impl From<Tile> for u8 {
    fn from(t: Tile) -> Self {
        t.code()
    }
}
