pub mod access;
pub mod astar;
pub mod breadth_first;
pub mod depth_first;
pub mod optimizer;
pub mod route_planner;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::models::{Coordinate, Grid, Path};

pub use self::astar::AStarFinder;
pub use self::breadth_first::BreadthFirstFinder;
pub use self::depth_first::DepthFirstFinder;

/// Point-to-point search over a store grid
pub trait PathFinder: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Find a path from `start` to `end`, both included.
    ///
    /// Returns an empty path when `end` cannot be reached, and
    /// `InvalidEndpoint` when either endpoint is outside the grid or blocked.
    fn find_path(&self, grid: &Grid, start: Coordinate, end: Coordinate) -> Result<Path>;
}

/// Available path finders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// 8-directional A*, the production strategy
    #[default]
    #[serde(rename = "astar")]
    AStar,
    /// 4-directional depth-first search; finds a path, not the shortest one
    #[serde(rename = "depth_first")]
    DepthFirst,
    /// 4-directional breadth-first search; shortest by step count
    #[serde(rename = "breadth_first")]
    BreadthFirst,
}

impl Strategy {
    /// Builds the finder for this strategy with the search settings of `config`
    pub fn finder(self, config: &PlannerConfig) -> Arc<dyn PathFinder> {
        match self {
            Strategy::AStar => Arc::new(
                AStarFinder::new(config.diagonal_movement, config.heuristic)
                    .with_weight(config.heuristic_weight),
            ),
            Strategy::DepthFirst => Arc::new(DepthFirstFinder),
            Strategy::BreadthFirst => Arc::new(BreadthFirstFinder),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::AStar => "astar",
            Strategy::DepthFirst => "depth_first",
            Strategy::BreadthFirst => "breadth_first",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid indices of both endpoints, or `InvalidEndpoint` for the first bad one
pub(crate) fn endpoint_indices(
    grid: &Grid,
    start: Coordinate,
    end: Coordinate,
) -> Result<(usize, usize)> {
    let index_of = |at: Coordinate| {
        grid.index(at)
            .filter(|_| grid.is_walkable_at(at))
            .ok_or(PlannerError::InvalidEndpoint { at })
    };
    Ok((index_of(start)?, index_of(end)?))
}

/// Walks parent links back from `end` and returns the path in travel order
pub(crate) fn reconstruct_path(grid: &Grid, parents: &[Option<usize>], end: usize) -> Path {
    let mut cells = vec![grid.coordinate(end)];
    let mut current = end;
    while let Some(parent) = parents[current] {
        cells.push(grid.coordinate(parent));
        current = parent;
    }
    cells.reverse();
    Path::new(cells)
}
