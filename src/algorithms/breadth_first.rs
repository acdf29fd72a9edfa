use std::collections::VecDeque;

use crate::algorithms::{endpoint_indices, reconstruct_path, PathFinder};
use crate::error::Result;
use crate::models::{Coordinate, Grid, Path};

/// Breadth-first search with orthogonal moves; shortest by step count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreadthFirstFinder;

impl PathFinder for BreadthFirstFinder {
    fn name(&self) -> &'static str {
        "breadth_first"
    }

    fn find_path(&self, grid: &Grid, start: Coordinate, end: Coordinate) -> Result<Path> {
        let (start_index, end_index) = endpoint_indices(grid, start, end)?;
        if start_index == end_index {
            return Ok(Path::single(start));
        }

        let mut visited = vec![false; grid.len()];
        let mut parents: Vec<Option<usize>> = vec![None; grid.len()];
        let mut queue = VecDeque::new();

        visited[start_index] = true;
        queue.push_back(start_index);

        while let Some(current) = queue.pop_front() {
            for next in grid.orthogonal_neighbors(grid.coordinate(current)) {
                let Some(next_index) = grid.index(next) else {
                    continue;
                };
                if visited[next_index] {
                    continue;
                }
                visited[next_index] = true;
                parents[next_index] = Some(current);

                if next_index == end_index {
                    return Ok(reconstruct_path(grid, &parents, end_index));
                }
                queue.push_back(next_index);
            }
        }

        Ok(Path::unreachable())
    }
}
