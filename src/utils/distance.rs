// Distance calculation utilities and search heuristics

use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

use crate::models::Coordinate;

/// Calculate the Euclidean distance between two cells
pub fn euclidean(p1: &Coordinate, p2: &Coordinate) -> f64 {
    let dx = f64::from(p1.x - p2.x);
    let dy = f64::from(p1.y - p2.y);
    (dx * dx + dy * dy).sqrt()
}

/// Calculate the Manhattan distance between two cells
pub fn manhattan(p1: &Coordinate, p2: &Coordinate) -> f64 {
    f64::from(p1.manhattan_distance_to(p2))
}

/// Cost of the cheapest 8-directional move sequence with diagonal cost √2
pub fn octile(p1: &Coordinate, p2: &Coordinate) -> f64 {
    let dx = f64::from(p1.x.abs_diff(p2.x));
    let dy = f64::from(p1.y.abs_diff(p2.y));
    let (short, long) = if dx < dy { (dx, dy) } else { (dy, dx) };
    (SQRT_2 - 1.0) * short + long
}

pub fn chebyshev(p1: &Coordinate, p2: &Coordinate) -> f64 {
    f64::from(p1.chebyshev_distance_to(p2))
}

/// Remaining-cost estimate used by A*.
///
/// Euclidean and octile never overestimate with diagonal cost √2. Manhattan
/// overestimates once diagonals are allowed, trading optimality for speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    #[default]
    Euclidean,
    Octile,
    Manhattan,
    Chebyshev,
}

impl Heuristic {
    pub fn estimate(self, from: &Coordinate, to: &Coordinate) -> f64 {
        match self {
            Heuristic::Euclidean => euclidean(from, to),
            Heuristic::Octile => octile(from, to),
            Heuristic::Manhattan => manhattan(from, to),
            Heuristic::Chebyshev => chebyshev(from, to),
        }
    }
}
