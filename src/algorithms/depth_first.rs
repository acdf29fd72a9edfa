use crate::algorithms::{endpoint_indices, reconstruct_path, PathFinder};
use crate::error::Result;
use crate::models::{Coordinate, Grid, Path};

/// Depth-first search with orthogonal moves.
///
/// Returns the first path the stack reaches, which is usually not the
/// shortest one. Kept as a comparison strategy next to the shortest-path finders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthFirstFinder;

impl PathFinder for DepthFirstFinder {
    fn name(&self) -> &'static str {
        "depth_first"
    }

    fn find_path(&self, grid: &Grid, start: Coordinate, end: Coordinate) -> Result<Path> {
        let (start_index, end_index) = endpoint_indices(grid, start, end)?;

        let mut visited = vec![false; grid.len()];
        let mut parents: Vec<Option<usize>> = vec![None; grid.len()];
        let mut stack = vec![start_index];
        visited[start_index] = true;

        while let Some(current) = stack.pop() {
            if current == end_index {
                return Ok(reconstruct_path(grid, &parents, end_index));
            }

            // cells are marked on push, so each one gets a single parent
            for next in grid.orthogonal_neighbors(grid.coordinate(current)) {
                let Some(next_index) = grid.index(next) else {
                    continue;
                };
                if !visited[next_index] {
                    visited[next_index] = true;
                    parents[next_index] = Some(current);
                    stack.push(next_index);
                }
            }
        }

        Ok(Path::unreachable())
    }
}
