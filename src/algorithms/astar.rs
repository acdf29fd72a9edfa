use priority_queue::PriorityQueue;
use std::cmp::{Ordering, Reverse};
use std::f64::consts::SQRT_2;

use crate::algorithms::{endpoint_indices, reconstruct_path, PathFinder};
use crate::error::Result;
use crate::models::{Coordinate, DiagonalMovement, Grid, Path};
use crate::utils::distance::Heuristic;

// Custom wrapper to make f64 implement Eq
#[derive(PartialEq, Copy, Clone, Debug)]
struct F64Wrapper(f64);

impl Eq for F64Wrapper {}

impl PartialOrd for F64Wrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for F64Wrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

/// A* search over the store grid.
///
/// Orthogonal moves cost 1 and diagonal moves √2. With the default
/// [`DiagonalMovement::OnlyWhenNoObstacles`] a diagonal never cuts the corner of
/// a blocked cell. The open set is an addressable priority queue keyed by
/// `f = g + weight * h`, so improving a queued cell updates it in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AStarFinder {
    pub diagonal_movement: DiagonalMovement,
    pub heuristic: Heuristic,
    pub weight: f64,
}

impl Default for AStarFinder {
    fn default() -> Self {
        Self {
            diagonal_movement: DiagonalMovement::OnlyWhenNoObstacles,
            heuristic: Heuristic::Euclidean,
            weight: 1.0,
        }
    }
}

impl AStarFinder {
    pub fn new(diagonal_movement: DiagonalMovement, heuristic: Heuristic) -> Self {
        Self {
            diagonal_movement,
            heuristic,
            weight: 1.0,
        }
    }

    /// Scales the heuristic; weights above 1 search faster but may return longer paths
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    fn step_cost(from: Coordinate, to: Coordinate) -> f64 {
        if from.x != to.x && from.y != to.y {
            SQRT_2
        } else {
            1.0
        }
    }
}

impl PathFinder for AStarFinder {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn find_path(&self, grid: &Grid, start: Coordinate, end: Coordinate) -> Result<Path> {
        let (start_index, end_index) = endpoint_indices(grid, start, end)?;
        if start_index == end_index {
            return Ok(Path::single(start));
        }

        let mut g_score = vec![f64::INFINITY; grid.len()];
        let mut parents: Vec<Option<usize>> = vec![None; grid.len()];
        let mut closed = vec![false; grid.len()];
        let mut open = PriorityQueue::new();

        g_score[start_index] = 0.0;
        let start_f = self.weight * self.heuristic.estimate(&start, &end);
        open.push(start_index, Reverse(F64Wrapper(start_f)));

        while let Some((current, _)) = open.pop() {
            if current == end_index {
                return Ok(reconstruct_path(grid, &parents, end_index));
            }
            closed[current] = true;

            let here = grid.coordinate(current);
            for next in grid.neighbors(here, self.diagonal_movement) {
                let Some(next_index) = grid.index(next) else {
                    continue;
                };
                if closed[next_index] {
                    continue;
                }

                let tentative = g_score[current] + Self::step_cost(here, next);
                if tentative < g_score[next_index] {
                    g_score[next_index] = tentative;
                    parents[next_index] = Some(current);
                    let f = tentative + self.weight * self.heuristic.estimate(&next, &end);
                    // push on a queued item replaces its priority
                    open.push(next_index, Reverse(F64Wrapper(f)));
                }
            }
        }

        Ok(Path::unreachable())
    }
}
