//! Difficulty presets for generated mazes.

use std::fmt;
use std::str::FromStr;

/// Maze size and power-up count presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Maze `(width, height)`. Always odd, so start and goal are rooms.
    pub const fn maze_size(self) -> (i32, i32) {
        match self {
            Difficulty::Easy => (15, 15),
            Difficulty::Medium => (19, 19),
            Difficulty::Hard => (23, 23),
        }
    }

    /// Number of power-ups scattered over the maze.
    pub const fn powerups(self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError(String);

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty \u{201c}{}\u{201d} (expected easy, medium or hard)", self.0)
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_grow_with_difficulty() {
        assert_eq!(Difficulty::Easy.maze_size(), (15, 15));
        assert_eq!(Difficulty::Hard.powerups(), 3);
        for d in Difficulty::ALL {
            let (w, h) = d.maze_size();
            assert!(w % 2 == 1 && h % 2 == 1);
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("nightmare".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default().to_string(), "medium");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_lowercase_names() {
        let json = serde_json::to_string(&Difficulty::Easy).unwrap();
        assert_eq!(json, "\"easy\"");
    }
}
