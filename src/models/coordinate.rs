// Coordinate model representing a cell position on a store floor grid

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::distance;

/// Integer `(x, y)` position of a grid cell.
///
/// `x` grows to the right and `y` grows downwards, so "up" is `y - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    /// Creates a new coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate shifted by `(dx, dy)`
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Straight-line distance between two cells
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance::euclidean(self, other)
    }

    /// Number of orthogonal steps between two cells
    pub fn manhattan_distance_to(&self, other: &Coordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Number of king moves between two cells
    pub fn chebyshev_distance_to(&self, other: &Coordinate) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// True when `other` is one of the eight surrounding cells
    pub fn is_adjacent_to(&self, other: &Coordinate) -> bool {
        self.chebyshev_distance_to(other) == 1
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Parses `"x,y"`, optionally wrapped in parentheses as printed by `Display`
impl FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (x, y) = inner
            .split_once(',')
            .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
        let parse = |part: &str| part.trim().parse::<i32>().map_err(|e| e.to_string());
        Ok(Self::new(parse(x)?, parse(y)?))
    }
}
